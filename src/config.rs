// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Optional user settings.
//!
//! Read from `settings.json` in the state folder. Every field has a default,
//! so a partial file is fine and a missing or broken one yields defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Use this folder as the GIF library instead of the default one
    pub asset_dir: Option<PathBuf>,
    /// Keep the pet above other windows
    pub always_on_top: bool,
    /// Window size while no GIF is loaded
    pub placeholder_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: None,
            always_on_top: true,
            placeholder_size: [200.0, 120.0],
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
