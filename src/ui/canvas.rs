// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The pet itself.
//!
//! This module draws the current animation frame over the transparent
//! window, starts window drags and offers the right-click menu. With no
//! GIF loaded it shows a drop prompt instead.

use super::menu::{self, MenuAction};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    StartDrag,
    Menu(MenuAction),
}

/// Draw the canvas filling the whole window.
pub fn show(ui: &mut egui::Ui, frame: Option<&egui::TextureHandle>) -> CanvasAction {
    let mut action = CanvasAction::None;

    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

    if let Some(texture) = frame {
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    } else {
        draw_placeholder(&painter, rect, hovering_files);
    }

    if hovering_files {
        painter.rect_stroke(
            rect.shrink(1.0),
            4.0,
            egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE),
        );
    }

    if response.drag_started_by(egui::PointerButton::Primary) {
        action = CanvasAction::StartDrag;
    }

    response.context_menu(|ui| {
        let chosen = menu::show(ui);
        if !matches!(chosen, MenuAction::None) {
            action = CanvasAction::Menu(chosen);
        }
    });

    action
}

fn draw_placeholder(painter: &egui::Painter, rect: egui::Rect, highlighted: bool) {
    let fill = if highlighted {
        egui::Color32::from_black_alpha(200)
    } else {
        egui::Color32::from_black_alpha(140)
    };
    painter.rect_filled(rect, 8.0, fill);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "drag gif here",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(220),
    );
}
