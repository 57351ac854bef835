//! Entry point for the memory book.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` or the given path.
//! - Load lyrics and the photo manifest.
//! - Launch the GUI application.

mod app;
mod audio;
mod autoplay;
mod config;
mod countdown;
mod gallery;
mod lyrics;

use crate::app::run_app;
use crate::config::{load_config, serialize_config};
use crate::gallery::load_photos;
use crate::lyrics::load_lrc_file;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

struct Args {
    config_path: PathBuf,
    print_config: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args.config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if args.print_config {
        println!("{}", serialize_config(&config)?);
        return Ok(());
    }

    info!(
        config = %args.config_path.display(),
        level = %config.log_level,
        "Starting memory book"
    );

    let lines = match load_lrc_file(Path::new(&config.lrc_path), config.tag_policy) {
        Ok(lines) => lines,
        Err(err) => {
            warn!("Continuing without lyrics: {err:#}");
            Vec::new()
        }
    };
    let photos = load_photos(Path::new(&config.photos_dir));

    run_app(config, lines, photos).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config_path = None;
    let mut print_config = false;
    for arg in args {
        match arg.as_str() {
            "--print-config" => print_config = true,
            flag if flag.starts_with("--") => {
                return Err(anyhow!(
                    "Unknown flag {flag}\nUsage: memory-book [--print-config] [config.toml]"
                ));
            }
            _ if config_path.is_some() => {
                return Err(anyhow!("Usage: memory-book [--print-config] [config.toml]"));
            }
            path => config_path = Some(PathBuf::from(path)),
        }
    }
    Ok(Args {
        config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        print_config,
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    info!("Logging initialized; override level with config log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
