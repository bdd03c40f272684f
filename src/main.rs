use std::io;
use std::process::ExitCode;

use ccbar::ccusage::{CcusageCli, EXEC_TIMEOUT};
use ccbar::config::Config;
use ccbar::driver::Driver;
use colored::Colorize;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "--version") {
        println!("ccbar {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = Config::from_env();

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        let _ = stop_tx.send(true);
    });

    let source = CcusageCli::new(EXEC_TIMEOUT);
    let mut driver = Driver::new(config, source, io::stdout(), stop_rx);

    // The status bar must never see a crash: report emit failures on stderr
    // and exit zero regardless.
    if let Err(err) = driver.run().await {
        eprintln!("{} {err}", "error:".red());
    }
    ExitCode::SUCCESS
}

/// Resolves on SIGINT or SIGTERM. Pends forever if the handlers cannot be
/// installed, keeping the shutdown sender alive either way.
async fn wait_for_signal() {
    match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(mut interrupt), Ok(mut terminate)) => {
            tokio::select! {
                _ = interrupt.recv() => {}
                _ = terminate.recv() => {}
            }
        }
        _ => std::future::pending::<()>().await,
    }
}
