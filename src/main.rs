// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! GifPet - a desktop GIF companion
//!
//! A frameless, transparent, always-on-top window that plays an animated
//! GIF. It remembers the last GIF together with its speed, zoom and window
//! position.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::GifPetApp;
use config::Settings;
use io::{library::AssetLibrary, paths::PathResolver, state_store::PlaybackStateStore};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let paths = PathResolver::detect();
    let settings_file = paths.settings_file();
    let settings = Settings::load_or_default(&settings_file);
    if !settings_file.exists() {
        if let Err(e) = settings.save(&settings_file) {
            log::warn!("Could not write default settings: {:#}", e);
        }
    }

    let paths = match &settings.asset_dir {
        Some(dir) => paths.with_asset_root(dir),
        None => paths,
    };
    log::info!(
        "Assets in {}, state in {}",
        paths.asset_root().display(),
        paths.state_root().display()
    );

    let library = AssetLibrary::open(paths.asset_root());
    let store = PlaybackStateStore::new(paths.state_file(), paths.pointer_file());

    let window_level = if settings.always_on_top {
        egui::WindowLevel::AlwaysOnTop
    } else {
        egui::WindowLevel::Normal
    };

    // Frameless transparent pet window, kept out of the taskbar
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GifPet")
            .with_inner_size(settings.placeholder_size)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_taskbar(false)
            .with_window_level(window_level)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "GifPet",
        options,
        Box::new(move |cc| Ok(Box::new(GifPetApp::new(&cc.egui_ctx, settings, store, library)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
