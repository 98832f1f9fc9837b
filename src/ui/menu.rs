// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Right-click menu of the pet window.

/// Menu entry picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    OpenGif,
    SetFps,
    SetZoom,
    OpenLibrary,
    Quit,
}

/// Display the menu entries and report which one was clicked.
pub fn show(ui: &mut egui::Ui) -> MenuAction {
    let mut action = MenuAction::None;

    let entries = [
        ("Open GIF...", MenuAction::OpenGif),
        ("Set FPS...", MenuAction::SetFps),
        ("Set Zoom...", MenuAction::SetZoom),
        ("GIF Library...", MenuAction::OpenLibrary),
    ];
    for (label, entry) in entries {
        if ui.button(label).clicked() {
            action = entry;
        }
    }

    ui.separator();

    if ui.button("Quit").clicked() {
        action = MenuAction::Quit;
    }

    if action != MenuAction::None {
        ui.close_menu();
    }

    action
}
