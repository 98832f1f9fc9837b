// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! GIF library browser.
//!
//! Shows a thumbnail grid of the assets in the library. Double-click loads
//! an asset; the delete button removes the selected one unless it is the
//! last asset left.

use super::dialogs;
use crate::io::library::{AssetId, AssetLibrary};
use crate::io::media;
use std::collections::HashMap;

const THUMBNAIL_SIDE: u32 = 100;

/// Result of library browser interaction.
pub enum LibraryAction {
    None,
    Load(AssetId),
    Delete(AssetId),
}

/// State of the library browser window.
#[derive(Default)]
pub struct LibraryBrowser {
    pub open: bool,
    selected: Option<AssetId>,
    /// Folder listing, refreshed when the folder is known to change
    assets: Vec<AssetId>,
    /// Decoded thumbnails; `None` marks files that failed to decode
    thumbnails: HashMap<AssetId, Option<egui::TextureHandle>>,
}

impl LibraryBrowser {
    /// Open the browser with a fresh view of the folder.
    pub fn show_window(&mut self, library: &AssetLibrary) {
        self.open = true;
        self.selected = None;
        self.thumbnails.clear();
        self.refresh(library);
    }

    /// Re-read the folder listing.
    pub fn refresh(&mut self, library: &AssetLibrary) {
        self.assets = library.list();
        self.thumbnails.retain(|id, _| self.assets.contains(id));
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| !self.assets.contains(selected))
        {
            self.selected = None;
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, library: &AssetLibrary) -> LibraryAction {
        if !self.open {
            return LibraryAction::None;
        }

        let assets = std::mem::take(&mut self.assets);
        let mut open = self.open;
        let action = dialogs::show_dialog(
            ctx,
            "library_dialog",
            "GIF Library",
            [420.0, 320.0],
            &mut open,
            |ui| self.contents(ui, library, &assets),
        )
        .unwrap_or(LibraryAction::None);
        self.open = open;
        self.assets = assets;

        if let LibraryAction::Load(_) = action {
            self.open = false;
        }
        action
    }

    fn contents(&mut self, ui: &mut egui::Ui, library: &AssetLibrary, assets: &[AssetId]) -> LibraryAction {
        let mut action = LibraryAction::None;

        egui::TopBottomPanel::bottom("library_buttons").show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                let can_delete = self.selected.is_some() && assets.len() > 1;
                let delete = ui
                    .add_enabled(can_delete, egui::Button::new("Delete GIF"))
                    .on_disabled_hover_text("Select a GIF; the last one cannot be deleted");
                if delete.clicked() {
                    if let Some(id) = self.selected.clone() {
                        action = LibraryAction::Delete(id);
                    }
                }
                ui.label(
                    egui::RichText::new(format!("{} GIF(s)", assets.len()))
                        .weak(),
                );
            });
        });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if assets.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("Library is empty");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for id in assets {
                        let texture = self.thumbnail(ui.ctx(), library, id);
                        let selected = self.selected.as_deref() == Some(id.as_str());
                        let button = match texture {
                            Some(texture) => {
                                let image = egui::Image::from_texture(
                                    egui::load::SizedTexture::from_handle(&texture),
                                );
                                egui::Button::image_and_text(image, id.as_str())
                            }
                            None => egui::Button::new(id.as_str()),
                        };

                        let response = ui.add(button.selected(selected));
                        if response.double_clicked() {
                            action = LibraryAction::Load(id.clone());
                        } else if response.clicked() {
                            self.selected = Some(id.clone());
                        }
                    }
                });
            });
        });

        action
    }

    fn thumbnail(&mut self, ctx: &egui::Context, library: &AssetLibrary, id: &str) -> Option<egui::TextureHandle> {
        self.thumbnails
            .entry(id.to_string())
            .or_insert_with(|| match media::load_thumbnail(&library.path_of(id), THUMBNAIL_SIDE) {
                Ok(thumb) => {
                    let size = [thumb.width as usize, thumb.height as usize];
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, &thumb.pixels);
                    Some(ctx.load_texture(format!("thumb:{id}"), image, egui::TextureOptions::LINEAR))
                }
                Err(e) => {
                    log::warn!("No thumbnail for {}: {:#}", id, e);
                    None
                }
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &std::path::Path, name: &str) {
        std::fs::write(dir.join(name), b"GIF89a").unwrap();
    }

    #[test]
    fn test_listing_is_cached_until_refresh() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.gif");
        let library = AssetLibrary::open(dir.path());

        let mut browser = LibraryBrowser::default();
        browser.show_window(&library);
        assert!(browser.open);
        assert_eq!(browser.assets, vec!["a.gif".to_string()]);

        touch(dir.path(), "b.gif");
        assert_eq!(browser.assets.len(), 1);

        browser.refresh(&library);
        assert_eq!(browser.assets, vec!["a.gif".to_string(), "b.gif".to_string()]);
    }

    #[test]
    fn test_refresh_drops_vanished_selection() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.gif");
        touch(dir.path(), "b.gif");
        let library = AssetLibrary::open(dir.path());

        let mut browser = LibraryBrowser::default();
        browser.show_window(&library);
        browser.selected = Some("b.gif".to_string());

        std::fs::remove_file(dir.path().join("b.gif")).unwrap();
        browser.refresh(&library);
        assert!(browser.selected.is_none());
        assert_eq!(browser.assets, vec!["a.gif".to_string()]);
    }
}
