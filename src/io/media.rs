// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Animated GIF loading.
//!
//! This module decodes GIF files into RGBA frames with their native delays,
//! ready to be uploaded as egui textures.

use crate::util::geometry;
use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// One decoded frame.
pub struct Frame {
    /// RGBA pixels, `width * height * 4` bytes
    pub pixels: Vec<u8>,
    pub delay: Duration,
}

/// A fully decoded animation.
pub struct Animation {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn delays(&self) -> Vec<Duration> {
        self.frames.iter().map(|f| f.delay).collect()
    }
}

/// Small RGBA preview of the first frame.
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode every frame of the GIF at `path`.
pub fn load_animation(path: &Path) -> Result<Animation> {
    let decoder = open_decoder(path)?;
    let mut width = 0;
    let mut height = 0;
    let mut frames = Vec::new();

    for frame in decoder.into_frames() {
        let frame = frame.with_context(|| format!("Failed to decode frame of {}", path.display()))?;
        let delay = Duration::from(frame.delay());
        let buffer = frame.into_buffer();
        width = buffer.width();
        height = buffer.height();
        frames.push(Frame {
            pixels: buffer.into_raw(),
            delay,
        });
    }

    if frames.is_empty() {
        anyhow::bail!("GIF has no frames: {}", path.display());
    }

    Ok(Animation {
        width,
        height,
        frames,
    })
}

/// Decode the first frame of the GIF at `path`, fitted into a `max_side` square.
pub fn load_thumbnail(path: &Path, max_side: u32) -> Result<Thumbnail> {
    let decoder = open_decoder(path)?;
    let frame = decoder
        .into_frames()
        .next()
        .with_context(|| format!("GIF has no frames: {}", path.display()))?
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let buffer = frame.into_buffer();
    let (width, height) = geometry::fit_within(buffer.dimensions(), max_side);
    let buffer = if (width, height) == buffer.dimensions() {
        buffer
    } else {
        image::imageops::thumbnail(&buffer, width, height)
    };

    Ok(Thumbnail {
        width,
        height,
        pixels: buffer.into_raw(),
    })
}

fn open_decoder(path: &Path) -> Result<GifDecoder<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    GifDecoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to read GIF header of {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, RgbaImage};

    fn write_gif(path: &Path, frames: &[(u32, u32, u32)]) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = frames.iter().map(|&(w, h, ms)| {
            image::Frame::from_parts(
                RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(ms, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }

    #[test]
    fn test_load_animation_frames_and_delays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        write_gif(&path, &[(8, 6, 100), (8, 6, 200)]);

        let animation = load_animation(&path).unwrap();
        assert_eq!((animation.width, animation.height), (8, 6));
        assert_eq!(animation.frames.len(), 2);
        assert_eq!(animation.frames[0].pixels.len(), 8 * 6 * 4);
        assert_eq!(
            animation.delays(),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[test]
    fn test_thumbnail_is_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.gif");
        write_gif(&path, &[(200, 100, 100)]);

        let thumb = load_thumbnail(&path, 50).unwrap();
        assert_eq!((thumb.width, thumb.height), (50, 25));
        assert_eq!(thumb.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gif");
        std::fs::write(&path, b"not a gif").unwrap();

        assert!(load_animation(&path).is_err());
        assert!(load_thumbnail(&path, 50).is_err());
        assert!(load_animation(&dir.path().join("missing.gif")).is_err());
    }
}
