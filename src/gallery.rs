//! Photo manifest loading and carousel position.
//!
//! `manifest.json` lists image file names relative to the photos directory.
//! `captions.json` optionally maps a file name to its caption. When the
//! manifest is missing or unreadable a fixed sample set is used so the view
//! still has something to show.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CAPTIONS_FILE: &str = "captions.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub path: PathBuf,
    pub alt: String,
    pub caption: Option<String>,
}

/// Load photos from `dir`, falling back to samples on any manifest error.
pub fn load_photos(dir: &Path) -> Vec<Photo> {
    match load_manifest(dir) {
        Ok(photos) => {
            info!(dir = %dir.display(), count = photos.len(), "Loaded photo manifest");
            photos
        }
        Err(err) => {
            warn!(dir = %dir.display(), "Using sample photos: {err:#}");
            sample_photos(dir)
        }
    }
}

fn load_manifest(dir: &Path) -> Result<Vec<Photo>> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Reading {}", manifest_path.display()))?;
    let names: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing {}", manifest_path.display()))?;
    let captions = load_captions(dir);

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| Photo {
            path: dir.join(&name),
            alt: format!("Photo {}", idx + 1),
            caption: captions.get(&name).cloned(),
        })
        .collect())
}

fn load_captions(dir: &Path) -> HashMap<String, String> {
    let path = dir.join(CAPTIONS_FILE);
    let Ok(raw) = fs::read_to_string(&path) else {
        debug!(path = %path.display(), "No captions file");
        return HashMap::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(path = %path.display(), "Ignoring invalid captions: {err}");
        HashMap::new()
    })
}

fn sample_photos(dir: &Path) -> Vec<Photo> {
    (1..=3)
        .map(|n| Photo {
            path: dir.join(format!("sample-{n}.jpg")),
            alt: format!("Sample {n}"),
            caption: Some(format!("Sample photo {n}")),
        })
        .collect()
}

/// Wrap-around position within a photo list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}
