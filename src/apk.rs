//! Asset file facility
//!
//! Minimal stand-in for the APK side channel: named asset files the pass
//! appends lines to, such as `mixed_mode.txt`.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use crate::common::error::Result;

/// Hands out appendable asset files under a single assets directory
#[derive(Debug, Clone)]
pub struct ApkManager {
    assets_dir: PathBuf,
}

impl ApkManager {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self { assets_dir: assets_dir.into() }
    }

    /// Open an asset file positioned at its end, creating it (and the assets
    /// directory) if needed.
    pub fn new_asset_file(&self, name: &str) -> Result<File> {
        fs::create_dir_all(&self.assets_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.assets_dir.join(name))?;
        Ok(file)
    }
}
