use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sysmon-tui")]
#[command(author = "Anurag Ambuj")]
#[command(version)]
#[command(about = "A terminal dashboard for a system metrics server", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        help = "Base URL of the metrics server (e.g. http://127.0.0.1:5000)",
        env = "SYSMON_TUI_URL"
    )]
    pub url: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "Auto-refresh interval (e.g. 500ms, 5s, 1m)",
        value_parser = parse_duration
    )]
    pub interval: Option<Duration>,

    #[arg(short = 'a', long, help = "Start with auto-refresh enabled")]
    pub auto: bool,

    #[arg(long, help = "Number of points kept in the usage chart")]
    pub history: Option<usize>,

    #[arg(
        short = 'c',
        long,
        help = "Path to configuration file",
        env = "SYSMON_TUI_CONFIG"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

impl Cli {
    /// Command-line flags win over file values.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.refresh_interval = interval;
        }
        if let Some(history) = self.history {
            config.history_size = history;
        }
        if self.auto {
            config.auto_refresh = true;
        }
        config
    }
}

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}
