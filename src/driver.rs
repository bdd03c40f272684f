use crate::ccusage::UsageSource;
use crate::config::Config;
use crate::error::Result;
use crate::formatting::{format_compact_text, format_tooltip};
use crate::types::BlockUsage;
use crate::waybar::{ICON_STATIC, Output};
use chrono::Local;
use colored::Colorize;
use std::io::Write;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

// ccusage bills in five-hour blocks
const BLOCK_MINUTES: i64 = 300;

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Drives fetch→format→emit cycles, one at a time, never overlapping.
///
/// Runs a single cycle by default (waybar re-invokes the process per
/// refresh) or loops on the configured interval when `looping` is set. A
/// fetch failure is never fatal: the cycle emits a degraded frame and the
/// driver carries on. Only emit failures propagate out of `run`.
pub struct Driver<S, W> {
    config: Config,
    source: S,
    writer: W,
    shutdown: watch::Receiver<bool>,
    // Animation state is driver-local so the driver stays re-entrant
    frame: usize,
}

impl<S: UsageSource, W: Write> Driver<S, W> {
    pub fn new(config: Config, source: S, writer: W, shutdown: watch::Receiver<bool>) -> Self {
        Driver {
            config,
            source,
            writer,
            shutdown,
            frame: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        Output::loading().write_to(&mut self.writer)?;

        if !self.config.looping {
            return self.cycle().await;
        }

        let mut ticker = time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Consume the tick that fires immediately; the first cycle runs now
        ticker.tick().await;

        loop {
            self.cycle().await?;

            let stop = tokio::select! {
                biased;
                _ = self.shutdown.wait_for(|stop| *stop) => true,
                _ = ticker.tick() => false,
            };
            if stop {
                self.debug("shutdown signal received");
                return Ok(());
            }
        }
    }

    /// One fetch→format→emit cycle. The in-flight fetch is abandoned (and the
    /// child process reaped) if the shutdown flag is raised first.
    async fn cycle(&mut self) -> Result<()> {
        let icon = self.next_icon();

        let fetched = tokio::select! {
            biased;
            res = self.source.fetch() => res,
            _ = self.shutdown.wait_for(|stop| *stop) => return Ok(()),
        };

        let payload = match fetched {
            Ok(usage) => {
                self.debug(&format_compact_text(&usage));
                usage_frame(icon, &usage)
            }
            Err(err) => {
                self.debug(&format!("fetch failed: {err}"));
                Output::degraded(&err.to_string())
            }
        };

        payload.write_to(&mut self.writer)
    }

    fn next_icon(&mut self) -> &'static str {
        if !self.config.animate {
            return ICON_STATIC;
        }
        let icon = SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()];
        self.frame += 1;
        icon
    }

    fn debug(&self, msg: &str) {
        if self.config.debug {
            eprintln!("{} {}", "ccbar:".dimmed(), msg);
        }
    }
}

fn usage_frame(icon: &str, usage: &BlockUsage) -> Output {
    Output {
        text: format!("{} {}", icon, format_compact_text(usage)),
        tooltip: Some(format_tooltip(usage, Local::now())),
        class: None,
        percentage: block_percentage(usage.remaining_minutes),
    }
}

// Share of the five-hour block already elapsed, for waybar CSS hooks. Omitted
// when the projection is absent or out of range.
fn block_percentage(remaining_minutes: i64) -> Option<u8> {
    if remaining_minutes <= 0 || remaining_minutes > BLOCK_MINUTES {
        return None;
    }
    let elapsed = BLOCK_MINUTES - remaining_minutes;
    Some((elapsed * 100 / BLOCK_MINUTES) as u8)
}
