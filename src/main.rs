//! stormkill - RuneLite stuck-client killer
//!
//! Runs in a console window and polls until Ctrl+C.

use std::sync::mpsc::{self, Receiver};
use stormkill::monitor::MonitorStats;
use stormkill::KillerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stormkill=info")),
        )
        .init();

    let config = KillerConfig::default();
    print_banner(&config);

    // Shutdown signal; recv_timeout doubles as the inter-cycle sleep
    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        println!("\n🛑 Shutdown signal received...");
        let _ = shutdown_tx.send(());
    })?;

    let stats = run(config, &shutdown_rx)?;
    print_summary(&stats);

    println!("\n👋 stormkill has exited. Goodbye!");
    Ok(())
}

#[cfg(windows)]
fn run(
    config: KillerConfig,
    shutdown: &Receiver<()>,
) -> Result<MonitorStats, Box<dyn std::error::Error>> {
    use stormkill::monitor::{Monitor, SystemClock};
    use stormkill::winapi_utils::WinProcessSource;

    let mut monitor = Monitor::new(WinProcessSource, SystemClock, config);
    monitor.run(shutdown);
    Ok(monitor.stats())
}

#[cfg(not(windows))]
fn run(
    _config: KillerConfig,
    _shutdown: &Receiver<()>,
) -> Result<MonitorStats, Box<dyn std::error::Error>> {
    Err(stormkill::KillerError::UnsupportedPlatform(
        "main window titles are only available on Windows",
    )
    .into())
}

fn print_banner(config: &KillerConfig) {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              stormkill - RuneLite Client Killer            ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "🎯 Monitoring for {} processes with window title '{}' for more than {} minutes",
        config.process_name,
        config.qualifying_title,
        config.kill_threshold.as_secs() / 60
    );
    println!(
        "   Checking every {} seconds",
        config.poll_interval.as_secs()
    );
    println!("   Press Ctrl+C to exit");
    println!();
}

fn print_summary(stats: &MonitorStats) {
    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("📊 Session Summary");
    println!("════════════════════════════════════════════════════════════════");
    println!("   Cycles:         {}", stats.cycles);
    println!("   Failed Cycles:  {}", stats.failed_cycles);
    println!("   Kills:          {}", stats.kill_attempts());
    println!("     Confirmed:    {}", stats.kills_confirmed);
    println!("     Timed Out:    {}", stats.kills_timed_out);
    println!("     Failed:       {}", stats.kills_failed);
    println!("════════════════════════════════════════════════════════════════");
}
