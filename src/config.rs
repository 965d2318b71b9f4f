//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::state::Preferences;

/// Longest phase the command line accepts, one week in minutes
pub const MAX_PHASE_MINUTES: u64 = 7 * 24 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-loop")]
#[command(about = "A headless Pomodoro timer with a local HTTP control API")]
#[command(version)]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus phase length in minutes
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(..=MAX_PHASE_MINUTES))]
    pub focus: u64,

    /// Short break length in minutes
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(..=MAX_PHASE_MINUTES))]
    pub short_break: u64,

    /// Long break length in minutes
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u64).range(..=MAX_PHASE_MINUTES))]
    pub long_break: u64,

    /// Focus sessions completed before a long break
    #[arg(short = 'n', long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    pub sessions_before_long_break: u32,

    /// Do not show desktop notifications when a phase ends
    #[arg(long)]
    pub no_notifications: bool,

    /// Also write the menubar title to this file on every change
    #[arg(long)]
    pub title_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer preferences described by the command line
    pub fn preferences(&self) -> Preferences {
        Preferences::new(
            self.focus,
            self.short_break,
            self.long_break,
            self.sessions_before_long_break,
        )
        .with_notifications(!self.no_notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let config = Config::try_parse_from(["focus-loop"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.preferences(), Preferences::default());
        assert!(config.title_file.is_none());
    }

    #[test]
    fn flags_flow_into_preferences() {
        let config = Config::try_parse_from([
            "focus-loop", "-f", "50", "-s", "10", "-l", "30", "-n", "2", "--no-notifications", "-v",
        ])
        .unwrap();
        let prefs = config.preferences();
        assert_eq!(prefs, Preferences::new(50, 10, 30, 2).with_notifications(false));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn phase_lengths_beyond_a_week_are_rejected() {
        assert!(Config::try_parse_from(["focus-loop", "-f", "10000000000000"]).is_err());
        assert!(Config::try_parse_from(["focus-loop", "-s", "10081"]).is_err());
        assert!(Config::try_parse_from(["focus-loop", "-l", "99999999"]).is_err());

        let config = Config::try_parse_from(["focus-loop", "-f", "10080", "-s", "0"]).unwrap();
        assert_eq!(config.focus, MAX_PHASE_MINUTES);
        assert_eq!(config.short_break, 0);
    }

    #[test]
    fn zero_sessions_before_long_break_is_rejected() {
        assert!(Config::try_parse_from(["focus-loop", "-n", "0"]).is_err());
    }
}
