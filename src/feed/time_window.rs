use clap::ValueEnum;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::app_err;
use strum::{EnumIter, IntoEnumIterator};

/// The span of recent activity covered by one USGS summary feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, ValueEnum)]
pub enum TimeWindow {
    /// The past 24 hours
    Day,

    /// The past 7 days
    #[default]
    Week,

    /// The past 30 days
    Month,
}

impl TimeWindow {
    /// Token substituted into the feed URL (`all_{token}.geojson`).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|window| window.token().eq_ignore_ascii_case(s) || window.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| app_err!("unknown time window '{s}', expected one of: day, week, month"))
    }
}
