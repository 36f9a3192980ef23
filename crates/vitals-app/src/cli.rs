//! CLI argument definitions for the Vitals application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use vitals_core::types::WeekStart;

/// Vitals - ask questions about your health data in plain language.
#[derive(Parser, Debug)]
#[command(name = "vitals", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON file of recorded health samples.
    #[arg(short = 'f', long = "fixture")]
    pub fixture: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// First day of the week (monday or sunday).
    #[arg(long = "week-start")]
    pub week_start: Option<WeekStart>,

    /// Question to answer. Reads questions from stdin when omitted.
    pub query: Vec<String>,
}

impl CliArgs {
    /// The positional words joined into one question, if any were given.
    pub fn query(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VITALS_CONFIG env var > ~/.vitals/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VITALS_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the health fixture path.
    ///
    /// Priority: --fixture flag > VITALS_FIXTURE env var > config file value.
    pub fn resolve_fixture_path(&self, config_path: &str) -> PathBuf {
        if let Some(ref p) = self.fixture {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VITALS_FIXTURE") {
            return expand_home(&p);
        }
        expand_home(config_path)
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Resolve the first day of the week.
    ///
    /// Priority: --week-start flag > config file value.
    pub fn resolve_week_start(&self, config_week_start: WeekStart) -> WeekStart {
        self.week_start.unwrap_or(config_week_start)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".vitals").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    std::env::var(var).ok().map(PathBuf::from)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
    {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
