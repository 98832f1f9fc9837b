// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the application session that implements the
//! eframe::App trait. It owns the saved playback record, the GIF library and
//! the current view, and maps window gestures onto them.

use crate::config::Settings;
use crate::io::library::{self, AssetLibrary, RemoveOutcome};
use crate::io::media;
use crate::io::state_store::PlaybackStateStore;
use crate::models::playback::Playback;
use crate::models::state::WindowPosition;
use crate::models::view::ViewState;
use crate::ui::{canvas, dialogs, library::LibraryAction, library::LibraryBrowser, menu::MenuAction};
use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};

/// Textures and timing of the loaded animation.
struct LoadedAnimation {
    frames: Vec<egui::TextureHandle>,
    delays: Vec<Duration>,
}

/// Open dialogs.
#[derive(Default)]
struct Dialogs {
    fps: bool,
    zoom: bool,
    library: LibraryBrowser,
}

/// Main application state.
pub struct GifPetApp {
    settings: Settings,
    store: PlaybackStateStore,
    library: AssetLibrary,
    view: ViewState,

    /// Decoded frames of the current asset
    animation: Option<LoadedAnimation>,
    playback: Playback,
    last_tick: Option<Instant>,

    /// Window position to apply on the next frame
    pending_position: Option<WindowPosition>,
    /// Window size needs to follow the view
    pending_resize: bool,

    /// Window position when the last user drag started, until it is saved
    drag_origin: Option<Option<WindowPosition>>,
    last_seen_position: Option<WindowPosition>,
    saved_position: Option<WindowPosition>,

    dialogs: Dialogs,
}

impl GifPetApp {
    /// Create the session and restore the last displayed GIF.
    pub fn new(
        ctx: &egui::Context,
        settings: Settings,
        store: PlaybackStateStore,
        library: AssetLibrary,
    ) -> Self {
        let mut app = Self {
            settings,
            store,
            library,
            view: ViewState::new(),
            animation: None,
            playback: Playback::new(),
            last_tick: None,
            pending_position: None,
            pending_resize: true,
            drag_origin: None,
            last_seen_position: None,
            saved_position: None,
            dialogs: Dialogs::default(),
        };
        app.restore_session(ctx);
        app
    }

    /// Pick the asset to show at startup.
    fn restore_session(&mut self, ctx: &egui::Context) {
        let mut candidates = Vec::new();
        if let Some(saved) = self.store.load() {
            candidates.push(saved.gif_reference);
        }
        if let Some(last) = self.store.last_asset() {
            candidates.push(last);
        }
        if let Some(first) = self.library.first() {
            candidates.push(first);
        }

        for id in candidates {
            if !self.library.contains(&id) {
                log::debug!("Skipping missing asset {}", id);
                continue;
            }
            match self.load_asset(ctx, &id) {
                Ok(()) => return,
                Err(e) => log::warn!("Could not restore {}: {:#}", id, e),
            }
        }

        if self.library.is_empty() {
            log::info!("Library is empty, showing placeholder");
        } else {
            log::warn!("No GIF could be restored, showing placeholder");
        }
    }

    /// Load an asset from the library and apply its saved parameters.
    fn load_asset(&mut self, ctx: &egui::Context, id: &str) -> Result<()> {
        let animation = media::load_animation(&self.library.path_of(id))?;
        let params = self.store.resolve_on_load(id);

        let size = [animation.width as usize, animation.height as usize];
        let frames = animation
            .frames
            .iter()
            .enumerate()
            .map(|(i, frame)| {
                let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
                ctx.load_texture(format!("{id}#{i}"), image, egui::TextureOptions::LINEAR)
            })
            .collect();

        self.animation = Some(LoadedAnimation {
            frames,
            delays: animation.delays(),
        });
        self.playback.reset();
        self.last_tick = None;
        self.view
            .apply(id.to_string(), (animation.width, animation.height), params);
        self.pending_resize = true;

        let position = match params.window_position {
            Some(position) => {
                self.pending_position = Some(position);
                Some(position)
            }
            None => window_position(ctx),
        };

        self.store.record_last_asset(id);
        self.save_state(position);

        log::info!(
            "Loaded {} ({}x{}, {} frames, fps {}, zoom {}%)",
            id,
            animation.width,
            animation.height,
            animation.frames.len(),
            self.view.fps,
            self.view.zoom_percent
        );
        Ok(())
    }

    /// Copy an external GIF into the library and show it.
    fn import_and_load(&mut self, ctx: &egui::Context, source: &Path) {
        let result = match self.library.add(source) {
            Ok(id) => {
                self.dialogs.library.refresh(&self.library);
                self.load_asset(ctx, &id)
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log::error!("Failed to open {}: {:#}", source.display(), e);
        }
    }

    fn unload(&mut self) {
        self.animation = None;
        self.view.clear();
        self.playback.reset();
        self.pending_resize = true;
    }

    /// Persist the current view with `position`.
    fn save_state(&mut self, position: Option<WindowPosition>) {
        if let Some(state) = self.view.snapshot(position) {
            self.store.save(&state);
            self.saved_position = position;
        }
    }

    fn save_current(&mut self, ctx: &egui::Context) {
        let position = window_position(ctx).or(self.saved_position);
        self.save_state(position);
    }

    fn zoom(&mut self, ctx: &egui::Context, step: dialogs::ZoomStep) {
        if !self.view.is_loaded() {
            return;
        }
        let changed = match step {
            dialogs::ZoomStep::In => self.view.zoom_in(),
            dialogs::ZoomStep::Out => self.view.zoom_out(),
        };
        if changed {
            self.pending_resize = true;
            self.save_current(ctx);
        }
    }

    fn set_fps(&mut self, ctx: &egui::Context, fps: u32) {
        if self.view.set_fps(fps) {
            log::debug!("Playback at {} fps ({}%)", self.view.fps, self.view.speed_percent());
            self.save_current(ctx);
        }
    }

    fn pick_gif(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Choose a GIF")
            .add_filter("GIF Files", &["gif"])
            .pick_file()
        {
            self.import_and_load(ctx, &path);
        }
    }

    fn delete_asset(&mut self, ctx: &egui::Context, id: &str) {
        match self.library.remove(id) {
            Ok(RemoveOutcome::Removed) => {
                self.dialogs.library.refresh(&self.library);
                if self.view.asset.as_deref() == Some(id) {
                    self.unload();
                    if let Some(next) = self.library.first() {
                        if let Err(e) = self.load_asset(ctx, &next) {
                            log::warn!("Could not load {}: {:#}", next, e);
                        }
                    }
                }
            }
            Ok(RemoveOutcome::Refused) => log::info!("Kept {}, the library needs one GIF", id),
            Ok(RemoveOutcome::NotFound) => self.dialogs.library.refresh(&self.library),
            Err(e) => log::error!("{:#}", e),
        }
    }

    fn handle_menu(&mut self, ctx: &egui::Context, action: MenuAction) {
        match action {
            MenuAction::OpenGif => self.pick_gif(ctx),
            MenuAction::SetFps => self.dialogs.fps = true,
            MenuAction::SetZoom => self.dialogs.zoom = true,
            MenuAction::OpenLibrary => self.dialogs.library.show_window(&self.library),
            MenuAction::Quit => {
                self.save_current(ctx);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            MenuAction::None => {}
        }
    }

    /// Send position and size changes to the window.
    fn apply_window_changes(&mut self, ctx: &egui::Context) {
        if let Some(position) = self.pending_position.take() {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                position.x as f32,
                position.y as f32,
            )));
            self.last_seen_position = Some(position);
        }

        if std::mem::take(&mut self.pending_resize) {
            let [w, h] = self.settings.placeholder_size;
            let (width, height) = self.view.display_size().unwrap_or((w, h));
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(width, height)));
        }
    }

    fn track_window_move(&mut self, ctx: &egui::Context) {
        let current = window_position(ctx);
        let released = !ctx.input(|i| i.pointer.primary_down());
        self.settle_drag(current, released);
    }

    /// Save once a user drag has moved the window and it stopped moving.
    /// A drag that ends where it started is dropped without saving.
    fn settle_drag(&mut self, current: Option<WindowPosition>, released: bool) {
        if let Some(origin) = self.drag_origin {
            let settled = current == self.last_seen_position;
            if settled && current.is_some() && current != origin {
                self.save_state(current);
                self.drag_origin = None;
            } else if settled && released {
                self.drag_origin = None;
            }
        }
        self.last_seen_position = current;
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .find(|path| library::is_gif(path))
        });
        if let Some(path) = dropped {
            self.import_and_load(ctx, &path);
        }

        let scroll = ctx.input(|i| {
            if i.pointer.has_pointer() {
                i.raw_scroll_delta.y
            } else {
                0.0
            }
        });
        if scroll > 0.0 {
            self.zoom(ctx, dialogs::ZoomStep::In);
        } else if scroll < 0.0 {
            self.zoom(ctx, dialogs::ZoomStep::Out);
        }
    }

    /// Advance playback and return the frame to draw.
    fn tick(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let animation = self.animation.as_ref()?;
        let now = Instant::now();
        let dt = self.last_tick.map(|t| now - t).unwrap_or_default();
        self.last_tick = Some(now);

        let speed = self.view.speed_percent();
        let index = self.playback.advance(dt, speed, &animation.delays);
        if let Some(wait) = self.playback.time_to_next(speed, &animation.delays) {
            ctx.request_repaint_after(wait);
        }
        animation.frames.get(index).cloned()
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(fps) = dialogs::fps(ctx, &mut self.dialogs.fps, self.view.fps) {
            self.set_fps(ctx, fps);
        }

        if let Some(step) = dialogs::zoom(ctx, &mut self.dialogs.zoom, self.view.zoom_percent) {
            self.zoom(ctx, step);
        }

        match self.dialogs.library.show(ctx, &self.library) {
            LibraryAction::Load(id) => {
                if let Err(e) = self.load_asset(ctx, &id) {
                    log::error!("Failed to load {}: {:#}", id, e);
                }
            }
            LibraryAction::Delete(id) => self.delete_asset(ctx, &id),
            LibraryAction::None => {}
        }
    }
}

/// Outer position of the current viewport, in whole pixels.
fn window_position(ctx: &egui::Context) -> Option<WindowPosition> {
    ctx.input(|i| i.viewport().outer_rect)
        .map(|rect| WindowPosition::new(rect.min.x.round() as i32, rect.min.y.round() as i32))
}

impl eframe::App for GifPetApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_window_changes(ctx);
        self.handle_input(ctx);

        let frame = self.tick(ctx);

        let canvas_action = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| canvas::show(ui, frame.as_ref()))
            .inner;

        match canvas_action {
            canvas::CanvasAction::StartDrag => {
                ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                self.drag_origin = Some(window_position(ctx));
            }
            canvas::CanvasAction::Menu(action) => self.handle_menu(ctx, action),
            canvas::CanvasAction::None => {}
        }

        self.show_dialogs(ctx);
        self.track_window_move(ctx);

        if self.drag_origin.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_current(ctx);
        }
    }
}
