use std::{fmt::Display, path::PathBuf};

use clap::{Args, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::utils::percentage::Percentage;

/// Options understood by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
    /// Mirror the log into the console. Useful for debugging.
    #[arg(long = "log-console", global = true)]
    pub log_console: bool,
    #[arg(long = "log-filter", global = true)]
    pub log: Option<LevelFilter>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ReportArgs {
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    pub date_style: DateStyle,
    #[arg(short = 'p', long = "percentage", help = "Hide apps below the specified share of the total", default_value_t = Percentage::zero())]
    pub min_percentage: Percentage,
}
