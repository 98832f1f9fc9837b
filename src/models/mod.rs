// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for playback state and what is on screen.

pub mod playback;
pub mod state;
pub mod view;
