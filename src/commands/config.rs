use crate::Result;
use crate::encoding::VisualScale;
use crate::feed::{
    DEFAULT_CACHE_TTL, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_BASE_DELAY, RetryPolicy, USGS_SUMMARY_BASE_URL,
};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file picked up from the base directory when none is given
pub const DEFAULT_CONFIG_FILE_NAME: &str = "quake-tracker.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Location of the summary feeds
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for one feed request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Total attempts per feed request, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubled after each further failure
    #[serde(default = "default_retry_base_delay", with = "humantime_serde")]
    pub retry_base_delay: Duration,

    /// How long a downloaded feed is reused
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Colors and radii used to draw events
    #[serde(default)]
    pub scale: VisualScale,
}

fn default_base_url() -> String {
    USGS_SUMMARY_BASE_URL.to_string()
}

const fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_retry_base_delay() -> Duration {
    DEFAULT_RETRY_BASE_DELAY
}

const fn default_cache_ttl() -> Duration {
    DEFAULT_CACHE_TTL
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `quake-tracker.toml` in `base_dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The retry settings as a policy for the feed client
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: self.retry_base_delay,
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or inconsistent
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).into_app_err_with(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("base_url must use http or https, got '{}'", url.scheme()));
        }

        if self.max_attempts == 0 {
            return Err(app_err!("max_attempts must be at least 1"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        self.scale.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Rgba;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, USGS_SUMMARY_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_base_delay, Duration::from_secs(1));
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.scale, VisualScale::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_scale_table() {
        let config: Config = toml::from_str(
            r#"
            cache_ttl = "30s"

            [scale]
            significant_threshold = 6.0
            minor_color = [1, 2, 3, 4]
            "#,
        )
        .unwrap();

        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.scale.significant_threshold, 6.0);
        assert_eq!(config.scale.moderate_threshold, 3.0);
        assert_eq!(config.scale.minor_color, Rgba::new(1, 2, 3, 4));
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let _ = toml::from_str::<Config>("retries = 5").unwrap_err();
    }

    #[test]
    fn test_validate_zero_attempts() {
        let config = Config { max_attempts: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { request_timeout: Duration::ZERO, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_bad_base_url() {
        let config = Config { base_url: "not a url".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { base_url: "ftp://example.com/feeds".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_inverted_thresholds() {
        let mut config = Config::default();
        config.scale.moderate_threshold = 5.0;
        config.scale.significant_threshold = 3.0;
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_retry_policy() {
        let config = Config { max_attempts: 5, retry_base_delay: Duration::from_millis(20), ..Config::default() };
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let output_path = base_dir.join("custom.toml");
        Config::save_default(&output_path).unwrap();

        let loaded = Config::load(&base_dir, Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_picks_up_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base_dir.join(DEFAULT_CONFIG_FILE_NAME), "max_attempts = 7\n").unwrap();

        let config = Config::load(&base_dir, None).unwrap();
        assert_eq!(config.max_attempts, 7);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "max_attempts = 0\n").unwrap();

        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let _ = Config::load(&base_dir, Some(&path)).unwrap_err();
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base_dir.join("nope.toml");
        let _ = Config::load(&base_dir, Some(&path)).unwrap_err();
    }
}
