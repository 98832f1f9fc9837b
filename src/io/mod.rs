// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O for the GIF library, saved playback state and media decoding.

pub mod library;
pub mod media;
pub mod paths;
pub mod state_store;
