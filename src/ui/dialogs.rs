// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FPS and zoom dialogs.
//!
//! Each dialog is its own native window. Changes apply immediately; closing
//! a dialog only stops further edits.

use crate::models::state::{MAX_FPS, MIN_FPS};

/// Zoom button pressed in the zoom dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

/// Show `add_contents` in a separate window while `open` is set.
///
/// Falls back to an in-window panel on backends without multiple viewports.
pub fn show_dialog<R>(
    ctx: &egui::Context,
    id: &str,
    title: &str,
    size: [f32; 2],
    open: &mut bool,
    mut add_contents: impl FnMut(&mut egui::Ui) -> R,
) -> Option<R> {
    if !*open {
        return None;
    }

    let builder = egui::ViewportBuilder::default()
        .with_title(title)
        .with_inner_size(size)
        .with_window_level(egui::WindowLevel::AlwaysOnTop);

    ctx.show_viewport_immediate(egui::ViewportId::from_hash_of(id), builder, |ctx, class| {
        let inner = if class == egui::ViewportClass::Embedded {
            let mut still_open = true;
            let inner = egui::Window::new(title)
                .id(egui::Id::new(id))
                .collapsible(false)
                .resizable(false)
                .open(&mut still_open)
                .show(ctx, |ui| add_contents(ui))
                .and_then(|response| response.inner);
            if !still_open {
                *open = false;
            }
            inner
        } else {
            Some(egui::CentralPanel::default().show(ctx, |ui| add_contents(ui)).inner)
        };

        if ctx.input(|i| i.viewport().close_requested()) {
            *open = false;
        }

        inner
    })
}

/// FPS slider. Returns the new value when the slider moved.
pub fn fps(ctx: &egui::Context, open: &mut bool, current: u32) -> Option<u32> {
    show_dialog(ctx, "fps_dialog", "Set FPS", [320.0, 110.0], open, |ui| {
        let mut value = current;
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.add(
                egui::Slider::new(&mut value, MIN_FPS..=MAX_FPS)
                    .step_by(1.0)
                    .show_value(false),
            );
            ui.add_space(4.0);
            ui.label(egui::RichText::new(format!("FPS : {value}")).size(16.0));
        });
        (value != current).then_some(value)
    })
    .flatten()
}

/// Zoom buttons. Returns the step pressed, if any.
pub fn zoom(ctx: &egui::Context, open: &mut bool, current: u32) -> Option<ZoomStep> {
    show_dialog(ctx, "zoom_dialog", "Set Zoom", [260.0, 130.0], open, |ui| {
        let mut step = None;
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(format!("Zoom : {current}%")).size(20.0));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("x0.8").clicked() {
                    step = Some(ZoomStep::Out);
                }
                if ui.button("x1.2").clicked() {
                    step = Some(ZoomStep::In);
                }
            });
        });
        step
    })
    .flatten()
}
