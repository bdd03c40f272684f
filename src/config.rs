use std::env;
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Runtime configuration sourced from environment variables. Invalid or
/// missing values fall back to the defaults silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How often the looping driver refreshes (`CLAUDE_INTERVAL_SEC`).
    pub interval: Duration,
    /// Verbose diagnostics on stderr (`CLAUDE_DEBUG`).
    pub debug: bool,
    /// Cycle the status icon through spinner frames (`CLAUDE_ANIMATE`).
    pub animate: bool,
    /// Loop on the interval instead of running a single cycle (`CLAUDE_LOOP`).
    pub looping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            interval: DEFAULT_INTERVAL,
            debug: false,
            animate: false,
            looping: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            interval: parse_interval(env::var("CLAUDE_INTERVAL_SEC").ok().as_deref()),
            debug: truthy(env::var("CLAUDE_DEBUG").ok().as_deref()),
            animate: truthy(env::var("CLAUDE_ANIMATE").ok().as_deref()),
            looping: truthy(env::var("CLAUDE_LOOP").ok().as_deref()),
        }
    }
}

fn parse_interval(raw: Option<&str>) -> Duration {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_INTERVAL)
}

fn truthy(raw: Option<&str>) -> bool {
    matches!(raw, Some("1") | Some("true") | Some("TRUE"))
}
