//! Common processing logic shared between the show and interactive commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::feed::{FeedCache, FeedClient};
use crate::pipeline::{NoDataReason, Outcome, Pipeline, Request};
use crate::reports::generate_console;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Args, ValueEnum};
use ohno::EnrichableExt;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the show and interactive commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `quake-tracker.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Location of the summary feeds, overriding the configuration file
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Ignore cached feeds and fetch everything fresh
    #[arg(long)]
    pub ignore_cached: bool,
}

pub struct Common<'a, H: Host> {
    pipeline: Pipeline,
    pub host: &'a mut H,
    use_colors: bool,
}

impl<'a, H: Host> Common<'a, H> {
    /// Set up logging, load the configuration, and build the pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot be created
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        if let Some(base_url) = &args.base_url {
            config.base_url.clone_from(base_url);
            if let Err(e) = config.validate() {
                return Err(e.enrich_with(|| format!("invalid --base-url '{base_url}'")));
            }
        }

        let client = FeedClient::new(Some(&config.base_url), config.request_timeout, config.retry_policy())?;
        let cache = FeedCache::new(config.cache_ttl, args.ignore_cached);
        let pipeline = Pipeline::new(client, cache, config.scale);

        Ok(Self {
            pipeline,
            host,
            use_colors: args.color.use_colors(),
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // A logger may already be installed when commands run more than once in a process
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Render one request as of now
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be retrieved
    pub async fn render(&mut self, request: Request) -> Result<Outcome> {
        self.pipeline.render(request, Utc::now()).await
    }

    /// Write the console report for an outcome
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be formatted
    pub fn print_console(&mut self, request: &Request, outcome: &Outcome) -> Result<()> {
        match outcome {
            Outcome::Events(table) => {
                let mut console_output = String::new();
                generate_console(table, request, self.use_colors, &mut console_output)?;
                let _ = write!(self.host.output(), "{console_output}");
            }
            Outcome::NoData(reason) => self.print_no_data(request, *reason),
        }

        Ok(())
    }

    /// Tell the user that a request has nothing to show
    pub fn print_no_data(&mut self, request: &Request, reason: NoDataReason) {
        let _ = writeln!(
            self.host.output(),
            "No earthquakes to show for the past {} at magnitude {} or more: {reason}",
            request.window.label().to_lowercase(),
            request.min_magnitude
        );
    }
}
