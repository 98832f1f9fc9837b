// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Managed folder of GIF assets.
//!
//! Assets are identified by their file name. Imported files are copied in
//! under a timestamp-derived name, and the library refuses to delete its
//! last remaining asset.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// File name of an asset inside the library folder.
pub type AssetId = String;

/// Result of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The asset is the last one in the library
    Refused,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    /// Open the library at `root`, creating the folder if possible.
    ///
    /// A folder that cannot be created lists as empty; [`AssetLibrary::add`]
    /// tries again and reports the failure.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if let Err(e) = std::fs::create_dir_all(&root) {
            log::warn!("Failed to create asset folder {}: {}", root.display(), e);
        }
        Self { root }
    }

    /// Asset ids sorted by file name. Unreadable folders list as empty.
    pub fn list(&self) -> Vec<AssetId> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to list {}: {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut assets: Vec<AssetId> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_gif(Path::new(name)))
            .collect();
        assets.sort();
        assets
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<AssetId> {
        self.list().into_iter().next()
    }

    pub fn contains(&self, id: &str) -> bool {
        is_plain_name(id) && is_gif(Path::new(id)) && self.root.join(id).is_file()
    }

    pub fn path_of(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Copy `source` into the library under a fresh timestamped name.
    pub fn add(&self, source: &Path) -> Result<AssetId> {
        if !is_gif(source) {
            bail!("Not a GIF file: {}", source.display());
        }
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create asset folder {}", self.root.display()))?;

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let id = self.unique_name(&stamp);
        let destination = self.root.join(&id);

        std::fs::copy(source, &destination).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                destination.display()
            )
        })?;

        log::info!("Added {} to library as {}", source.display(), id);
        Ok(id)
    }

    /// Delete an asset, unless it is the only one left.
    pub fn remove(&self, id: &str) -> Result<RemoveOutcome> {
        if !self.contains(id) {
            return Ok(RemoveOutcome::NotFound);
        }
        if self.len() <= 1 {
            log::info!("Refusing to remove {}, it is the last asset", id);
            return Ok(RemoveOutcome::Refused);
        }

        let path = self.path_of(id);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        log::info!("Removed {} from library", id);
        Ok(RemoveOutcome::Removed)
    }

    fn unique_name(&self, stamp: &str) -> AssetId {
        let base = format!("gif_{stamp}");
        let mut name = format!("{base}.gif");
        let mut counter = 1;
        while self.root.join(&name).exists() {
            name = format!("{base}_{counter}.gif");
            counter += 1;
        }
        name
    }
}

/// True if `path` has a `.gif` extension, in any case.
pub fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gif"))
        .unwrap_or(false)
}

fn is_plain_name(id: &str) -> bool {
    let path = Path::new(id);
    path.file_name().and_then(|name| name.to_str()) == Some(id)
}
