// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transient view state.
//!
//! What is currently on screen: the loaded asset, its natural size and the
//! zoom/fps applied to it. Rebuilt from the persisted record on every load.

use super::state::{
    self, EffectiveParams, PersistedState, WindowPosition, DEFAULT_FPS, DEFAULT_ZOOM,
};
use crate::util::geometry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// File name of the loaded asset
    pub asset: Option<String>,
    /// Frame size of the loaded asset in pixels
    pub natural_size: Option<(u32, u32)>,
    pub fps: u32,
    pub zoom_percent: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            asset: None,
            natural_size: None,
            fps: DEFAULT_FPS,
            zoom_percent: DEFAULT_ZOOM,
        }
    }

    /// Switch to a freshly loaded asset with the reconciled parameters.
    pub fn apply(&mut self, asset: String, natural_size: (u32, u32), params: EffectiveParams) {
        self.asset = Some(asset);
        self.natural_size = Some(natural_size);
        self.fps = state::clamp_fps(params.fps);
        self.zoom_percent = state::clamp_zoom(params.zoom_percent);
    }

    /// Forget the loaded asset, keeping fps and zoom.
    pub fn clear(&mut self) {
        self.asset = None;
        self.natural_size = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.asset.is_some()
    }

    /// Returns true if the zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(state::zoom_in(self.zoom_percent))
    }

    /// Returns true if the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(state::zoom_out(self.zoom_percent))
    }

    fn set_zoom(&mut self, zoom_percent: u32) -> bool {
        let changed = zoom_percent != self.zoom_percent;
        self.zoom_percent = zoom_percent;
        changed
    }

    /// Returns true if the fps changed.
    pub fn set_fps(&mut self, fps: u32) -> bool {
        let fps = state::clamp_fps(fps);
        let changed = fps != self.fps;
        self.fps = fps;
        changed
    }

    pub fn speed_percent(&self) -> u32 {
        state::speed_percent(self.fps)
    }

    /// Window size for the current asset and zoom.
    pub fn display_size(&self) -> Option<(f32, f32)> {
        self.natural_size
            .map(|size| geometry::scaled_size(size, self.zoom_percent))
    }

    /// Record to persist for the current view, if an asset is loaded.
    pub fn snapshot(&self, position: Option<WindowPosition>) -> Option<PersistedState> {
        self.asset
            .as_ref()
            .map(|asset| PersistedState::new(asset.clone(), self.fps, self.zoom_percent, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_display_size() {
        let mut view = ViewState::new();
        assert!(view.display_size().is_none());

        let params = EffectiveParams {
            fps: 30,
            zoom_percent: 150,
            window_position: None,
        };
        view.apply("foo.gif".to_string(), (100, 60), params);

        assert_eq!(view.fps, 30);
        assert_eq!(view.display_size(), Some((150.0, 90.0)));
        assert_eq!(view.speed_percent(), 120);
    }

    #[test]
    fn test_zoom_reports_change() {
        let mut view = ViewState::new();
        assert!(view.zoom_in());
        assert_eq!(view.zoom_percent, 120);

        view.zoom_percent = 300;
        assert!(!view.zoom_in());
        assert_eq!(view.zoom_percent, 300);
    }

    #[test]
    fn test_set_fps_clamps() {
        let mut view = ViewState::new();
        assert!(view.set_fps(100));
        assert_eq!(view.fps, 60);
        assert!(!view.set_fps(60));
    }

    #[test]
    fn test_snapshot_requires_asset() {
        let mut view = ViewState::new();
        assert!(view.snapshot(None).is_none());

        view.apply("a.gif".to_string(), (10, 10), EffectiveParams::default());
        let state = view.snapshot(Some(WindowPosition::new(5, 6))).unwrap();
        assert_eq!(state.gif_reference, "a.gif");
        assert_eq!(state.fps, 25);
        assert_eq!(state.zoom_percent, 100);
        assert_eq!(state.window_position, Some(WindowPosition::new(5, 6)));
    }
}
