// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides size computations for zoomed display and
//! thumbnail fitting.

/// Size of the displayed animation at the given zoom percentage.
///
/// Each side is at least one pixel so the window never collapses.
pub fn scaled_size(natural: (u32, u32), zoom_percent: u32) -> (f32, f32) {
    let factor = zoom_percent as f32 / 100.0;
    (
        (natural.0 as f32 * factor).round().max(1.0),
        (natural.1 as f32 * factor).round().max(1.0),
    )
}

/// Fit `size` inside a `max_side` square, keeping the aspect ratio.
///
/// Sizes already inside the square are returned unchanged.
pub fn fit_within(size: (u32, u32), max_side: u32) -> (u32, u32) {
    let (width, height) = size;
    let longest = width.max(height);
    if longest <= max_side || longest == 0 {
        return size;
    }
    let scale = max_side as f64 / longest as f64;
    (
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_size() {
        assert_eq!(scaled_size((200, 100), 100), (200.0, 100.0));
        assert_eq!(scaled_size((200, 100), 150), (300.0, 150.0));
        assert_eq!(scaled_size((200, 100), 10), (20.0, 10.0));
    }

    #[test]
    fn test_scaled_size_never_zero() {
        assert_eq!(scaled_size((1, 1), 10), (1.0, 1.0));
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within((400, 200), 100), (100, 50));
        assert_eq!(fit_within((200, 400), 100), (50, 100));
        assert_eq!(fit_within((80, 60), 100), (80, 60));
        assert_eq!(fit_within((1000, 1), 100), (100, 1));
    }
}
