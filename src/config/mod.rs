//! Configuration loading for the memory book.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` (or the path given on the command line). Any missing or
//! invalid entries fall back to sensible defaults so the window can still
//! open.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, HighlightColor, LogLevel, ThemeMode};
