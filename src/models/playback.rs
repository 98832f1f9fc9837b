// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame clock for animated playback.
//!
//! The clock accumulates wall time and steps through frames using each
//! frame's native delay scaled by the current playback speed.

use std::time::Duration;

/// Native delays shorter than this are treated as [`FALLBACK_DELAY`].
pub const MIN_NATIVE_DELAY: Duration = Duration::from_millis(20);
pub const FALLBACK_DELAY: Duration = Duration::from_millis(100);

/// Delay of a frame once the playback speed is applied.
pub fn effective_delay(native: Duration, speed_percent: u32) -> Duration {
    let native = if native < MIN_NATIVE_DELAY {
        FALLBACK_DELAY
    } else {
        native
    };
    let speed = u128::from(speed_percent.max(1));
    let nanos = native.as_nanos() * 100 / speed;
    Duration::from_nanos(nanos.min(u128::from(u64::MAX)) as u64)
}

/// Position of playback within a looping animation.
#[derive(Debug, Default, Clone)]
pub struct Playback {
    index: usize,
    elapsed: Duration,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Go back to the first frame.
    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the clock by `dt` and return the frame to show.
    pub fn advance(&mut self, dt: Duration, speed_percent: u32, delays: &[Duration]) -> usize {
        if delays.len() <= 1 {
            self.reset();
            return 0;
        }
        if self.index >= delays.len() {
            self.reset();
        }

        self.elapsed += dt;

        // Skip whole loops so a long stall does not step frame by frame
        let cycle: u128 = delays
            .iter()
            .map(|d| effective_delay(*d, speed_percent).as_nanos())
            .sum();
        if cycle > 0 && self.elapsed.as_nanos() >= cycle * 2 {
            let rest = self.elapsed.as_nanos() % cycle;
            self.elapsed = Duration::from_nanos(rest as u64);
        }

        loop {
            let delay = effective_delay(delays[self.index], speed_percent);
            if self.elapsed < delay {
                break;
            }
            self.elapsed -= delay;
            self.index = (self.index + 1) % delays.len();
        }

        self.index
    }

    /// Time left before the next frame change, if the animation has more than one frame.
    pub fn time_to_next(&self, speed_percent: u32, delays: &[Duration]) -> Option<Duration> {
        if delays.len() <= 1 {
            return None;
        }
        let delay = effective_delay(*delays.get(self.index)?, speed_percent);
        Some(delay.saturating_sub(self.elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_effective_delay_scales_with_speed() {
        assert_eq!(effective_delay(ms(100), 100), ms(100));
        assert_eq!(effective_delay(ms(100), 200), ms(50));
        assert_eq!(effective_delay(ms(100), 50), ms(200));
    }

    #[test]
    fn test_tiny_native_delay_uses_fallback() {
        assert_eq!(effective_delay(ms(0), 100), FALLBACK_DELAY);
        assert_eq!(effective_delay(ms(10), 100), FALLBACK_DELAY);
        assert_eq!(effective_delay(ms(20), 100), ms(20));
    }

    #[test]
    fn test_advance_steps_and_loops() {
        let delays = [ms(100), ms(100), ms(100)];
        let mut playback = Playback::new();

        assert_eq!(playback.advance(ms(50), 100, &delays), 0);
        assert_eq!(playback.advance(ms(60), 100, &delays), 1);
        assert_eq!(playback.advance(ms(100), 100, &delays), 2);
        assert_eq!(playback.advance(ms(100), 100, &delays), 0);
    }

    #[test]
    fn test_advance_respects_speed() {
        let delays = [ms(100), ms(100)];
        let mut playback = Playback::new();

        // At 200% each frame lasts 50 ms
        assert_eq!(playback.advance(ms(50), 200, &delays), 1);
        assert_eq!(playback.advance(ms(50), 200, &delays), 0);
    }

    #[test]
    fn test_long_stall_wraps_without_overflow() {
        let delays = [ms(100), ms(100), ms(100)];
        let mut playback = Playback::new();

        // 10 full loops + 150 ms lands in frame 1
        let index = playback.advance(ms(3_150), 100, &delays);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_single_frame_never_advances() {
        let delays = [ms(100)];
        let mut playback = Playback::new();
        assert_eq!(playback.advance(ms(1_000), 100, &delays), 0);
        assert!(playback.time_to_next(100, &delays).is_none());
    }

    #[test]
    fn test_time_to_next() {
        let delays = [ms(100), ms(100)];
        let mut playback = Playback::new();
        playback.advance(ms(30), 100, &delays);
        assert_eq!(playback.time_to_next(100, &delays), Some(ms(70)));
    }
}
