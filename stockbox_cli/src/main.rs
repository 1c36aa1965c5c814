mod cli;
mod error_fmt;
mod weigh;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::WrapErr;
use stockbox_config::Config;
use stockbox_core::{ProductCatalog, StationError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::weigh::Pace;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = real_main(cli) {
        let code = error_fmt::exit_code_for_error(&e);
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(code);
    }
}

fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    let cfg = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .map_err(|e| StationError::Config(format!("read {}: {e}", p.display())))?;
            stockbox_config::load_toml(&text)
                .map_err(|e| StationError::Config(format!("parse {}: {e}", p.display())))?
        }
        None => Config::default(),
    };
    cfg.validate()
        .map_err(|e| StationError::Config(e.to_string()))?;
    Ok(cfg)
}

fn init_tracing(json: bool, level: Option<&str>, cfg: &stockbox_config::Logging) -> eyre::Result<()> {
    // RUST_LOG wins over --log-level, which wins over [logging].level
    let fallback = level.or(cfg.level.as_deref()).unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .wrap_err_with(|| format!("invalid log level {fallback:?}"))?;

    let file_writer = match cfg.file.as_deref() {
        Some(path) => {
            let p = Path::new(path);
            let dir = p.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = p.file_name().map_or_else(|| "stockbox.log".into(), |n| n.to_os_string());
            let appender = match cfg.rotation.as_deref().unwrap_or("never") {
                "daily" => tracing_appender::rolling::daily(dir, name),
                "hourly" => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (nb, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(nb)
        }
        None => None,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match (json, file_writer) {
        (true, Some(f)) => builder
            .json()
            .with_writer(std::io::stderr.and(f))
            .try_init(),
        (true, None) => builder.json().with_writer(std::io::stderr).try_init(),
        (false, Some(f)) => builder
            .with_ansi(false)
            .with_writer(std::io::stderr.and(f))
            .try_init(),
        (false, None) => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| eyre::eyre!("install tracing subscriber: {e}"))
}

fn real_main(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
            tracing::warn!(error = %e, "ctrl-c handler not installed");
        }
    }

    match cli.cmd {
        Commands::Run { trace, max_ticks } => {
            let summary = weigh::run_trace(&cfg, &trace, Pace::RealTime, max_ticks, shutdown)?;
            print_summary(cli.json, &summary);
        }
        Commands::Replay { trace, max_ticks } => {
            let summary = weigh::run_trace(&cfg, &trace, Pace::Simulated, max_ticks, shutdown)?;
            print_summary(cli.json, &summary);
        }
        Commands::Catalog => {
            let catalog = fetch_catalog(&cfg)?;
            if cli.json {
                println!("{}", serde_json::to_string(catalog.entries())?);
            } else {
                for (i, e) in catalog.entries().iter().enumerate() {
                    println!(
                        "{i}: {} ({} g x {})",
                        e.designation, e.unit_weight, e.units_per_lot
                    );
                }
            }
        }
        Commands::SelfCheck => {
            stockbox_hardware::SystemWallClock::new(cfg.clock.utc_offset_secs)?;
            match fetch_catalog(&cfg) {
                Ok(c) => println!("OK: config valid, catalog has {} product(s)", c.len()),
                Err(e) => {
                    tracing::warn!(error = %e, "catalog check failed");
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

fn fetch_catalog(cfg: &Config) -> eyre::Result<ProductCatalog> {
    let mut source = weigh::catalog_source(cfg)?.ok_or(StationError::CatalogUnavailable)?;
    let mut catalog = ProductCatalog::new(cfg.catalog.capacity);
    catalog.reload(source.as_mut())?;
    Ok(catalog)
}

fn print_summary(json: bool, s: &stockbox_core::RunSummary) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "summary": {
                    "ticks": s.ticks,
                    "skipped": s.skipped,
                    "placements": s.placements,
                    "reports": s.reports,
                    "failed_reports": s.failed_reports,
                    "selections": s.confirmations,
                }
            })
        );
    } else {
        println!(
            "Done: {} tick(s), {} report(s), {} not reported",
            s.ticks, s.reports, s.failed_reports
        );
    }
}
