// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted playback state.
//!
//! This module defines the record that survives between launches and the
//! parameters derived from it when a GIF is loaded.

/// Nominal frame rate that playback speed percentages are relative to.
pub const NOMINAL_FPS: u32 = 25;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

pub const MIN_ZOOM: u32 = 10;
pub const MAX_ZOOM: u32 = 300;

pub const DEFAULT_FPS: u32 = NOMINAL_FPS;
pub const DEFAULT_ZOOM: u32 = 100;

/// Window position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The single record describing the last displayed GIF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    /// File name of the asset inside the asset folder.
    pub gif_reference: String,
    pub fps: u32,
    pub zoom_percent: u32,
    pub window_position: Option<WindowPosition>,
}

impl PersistedState {
    /// Create a record, clamping fps and zoom into their valid ranges.
    pub fn new(
        gif_reference: impl Into<String>,
        fps: u32,
        zoom_percent: u32,
        window_position: Option<WindowPosition>,
    ) -> Self {
        Self {
            gif_reference: gif_reference.into(),
            fps: clamp_fps(fps),
            zoom_percent: clamp_zoom(zoom_percent),
            window_position,
        }
    }

    /// Parameters stored in this record.
    pub fn params(&self) -> EffectiveParams {
        EffectiveParams {
            fps: self.fps,
            zoom_percent: self.zoom_percent,
            window_position: self.window_position,
        }
    }
}

/// Playback parameters actually applied to a loaded GIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveParams {
    pub fps: u32,
    pub zoom_percent: u32,
    pub window_position: Option<WindowPosition>,
}

impl Default for EffectiveParams {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            zoom_percent: DEFAULT_ZOOM,
            window_position: None,
        }
    }
}

pub fn clamp_fps(fps: u32) -> u32 {
    fps.clamp(MIN_FPS, MAX_FPS)
}

pub fn clamp_zoom(zoom_percent: u32) -> u32 {
    zoom_percent.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// One ×1.2 zoom step, truncated then clamped.
pub fn zoom_in(zoom_percent: u32) -> u32 {
    clamp_zoom(zoom_percent.saturating_mul(6) / 5)
}

/// One ×0.8 zoom step, truncated then clamped.
pub fn zoom_out(zoom_percent: u32) -> u32 {
    clamp_zoom(zoom_percent.saturating_mul(4) / 5)
}

/// Playback speed as a percentage of the nominal rate.
pub fn speed_percent(fps: u32) -> u32 {
    clamp_fps(fps) * 100 / NOMINAL_FPS
}
