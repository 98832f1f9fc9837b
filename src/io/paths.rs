// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Location of the asset folder and the writable state folder.
//!
//! Both roots are chosen once at startup. A `gif/` folder next to the
//! executable selects the portable layout; otherwise the platform's user
//! data and config folders are used.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "GifPet";

const ASSET_DIR_NAME: &str = "gif";
const STATE_DIR_NAME: &str = "config";

const STATE_FILE: &str = "last_gif_config.txt";
const POINTER_FILE: &str = "last_gif.txt";
const SETTINGS_FILE: &str = "settings.json";

/// Resolved application folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    asset_root: PathBuf,
    state_root: PathBuf,
}

impl PathResolver {
    pub fn new(asset_root: impl Into<PathBuf>, state_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            state_root: state_root.into(),
        }
    }

    /// Pick the layout for this process.
    pub fn detect() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        if let Some(dir) = exe_dir.as_deref() {
            if let Some(resolver) = Self::portable(dir) {
                log::info!("Using portable layout in {}", dir.display());
                return resolver;
            }
        }

        match (dirs::data_dir(), dirs::config_dir()) {
            (Some(data), Some(config)) => Self::new(
                data.join(APP_NAME).join(ASSET_DIR_NAME),
                config.join(APP_NAME),
            ),
            _ => {
                log::warn!("No user folders available, using the working directory");
                Self::new(ASSET_DIR_NAME, STATE_DIR_NAME)
            }
        }
    }

    /// Portable layout rooted at `dir`, if `dir` contains an asset folder.
    pub fn portable(dir: &Path) -> Option<Self> {
        let assets = dir.join(ASSET_DIR_NAME);
        assets
            .is_dir()
            .then(|| Self::new(assets, dir.join(STATE_DIR_NAME)))
    }

    /// Replace the asset root, keeping the state root.
    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn state_root(&self) -> &Path {
        &self.state_root
    }

    /// The persisted playback record.
    pub fn state_file(&self) -> PathBuf {
        self.state_root.join(STATE_FILE)
    }

    /// The "last asset" pointer file.
    pub fn pointer_file(&self) -> PathBuf {
        self.state_root.join(POINTER_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.state_root.join(SETTINGS_FILE)
    }
}
