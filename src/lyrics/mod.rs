//! Synced lyrics: LRC parsing, active-line tracking and eased auto-scroll.

mod animation;
mod layout;
mod parser;
mod sync;

pub use layout::{LayoutMetrics, LyricLayout};
pub use parser::{LyricLine, TagPolicy};
pub use sync::{LineGeometry, LyricSynchronizer, SyncSettings, SyncState, Viewport};

use anyhow::{Context, Result};
use parser::parse_lrc;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read and parse an LRC file from disk.
pub fn load_lrc_file(path: &Path, policy: TagPolicy) -> Result<Vec<LyricLine>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading lyrics from {}", path.display()))?;
    let lines = parse_lrc(&raw, policy);
    info!(path = %path.display(), lines = lines.len(), "Loaded lyrics");
    Ok(lines)
}
