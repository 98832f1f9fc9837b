// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the GifPet application.

pub mod canvas;
pub mod dialogs;
pub mod library;
pub mod menu;
