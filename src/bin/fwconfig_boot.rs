// CLASSIFICATION: COMMUNITY
// Filename: fwconfig_boot.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Replays one firmware configuration boot on the host against a JSON
//! variable snapshot and a simulated CPU clock.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use cohesix_fwconfig::clock::sim::SimulatedClock;
use cohesix_fwconfig::config::FwConfig;
use cohesix_fwconfig::driver::LogPublisher;
use cohesix_fwconfig::store::file::JsonFileStore;
use cohesix_fwconfig::{ClockRate, ConfigDriver, Outcome};

#[derive(Parser)]
#[command(name = "fwconfig-boot", about = "Replay a firmware configuration boot")]
struct Cli {
    /// JSON variable snapshot; created if missing.
    #[arg(long)]
    store: PathBuf,
    /// TOML defaults; falls back to $FWCONFIG_DEFAULTS.
    #[arg(long)]
    defaults: Option<PathBuf>,
    /// Maximum CPU rate the simulated firmware reports, in Hz.
    #[arg(long, default_value_t = 1_400_000_000)]
    max_rate: u32,
    /// CPU rate in effect before the boot, in Hz.
    #[arg(long, default_value_t = 600_000_000)]
    current_rate: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let cfg = match cli.defaults.as_deref() {
        Some(path) => FwConfig::load_or_default(Some(path)),
        None => FwConfig::from_env(),
    };
    let store = JsonFileStore::open(&cli.store)
        .with_context(|| format!("opening {}", cli.store.display()))?;
    let clock = SimulatedClock::new(
        ClockRate::from_hz(cli.max_rate),
        ClockRate::from_hz(cli.current_rate),
    );

    let mut driver = ConfigDriver::new(store, LogPublisher, cfg.defaults);
    let report = driver.initialize(Some(clock))?;
    driver
        .store()
        .save()
        .with_context(|| format!("saving {}", cli.store.display()))?;

    let verdict = match report.outcome() {
        Outcome::Succeeded => "ok",
        Outcome::Degraded => "degraded",
    };
    info!(
        "[fwconfig-boot] {verdict}: policy {} ({}), seeded {}, cpu {}",
        report.clock.policy,
        report.clock.code,
        report.bootstrap.seeded(),
        report
            .clock
            .effective
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".into())
    );
    Ok(())
}
