// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted playback record.
//!
//! The record is a four line text file:
//!
//! ```text
//! <asset file name>
//! <fps>
//! <zoom percent>
//! <x>,<y>
//! ```
//!
//! The last line is empty when no window position is known. Any read or
//! parse failure is logged and treated as "no prior state".

use crate::models::state::{EffectiveParams, PersistedState, WindowPosition};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a record could not be read.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("no saved state at {0}")]
    Missing(PathBuf),

    #[error("malformed saved state: {0}")]
    Malformed(String),

    #[error("failed to access saved state: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads, saves and reconciles the single playback record.
#[derive(Debug, Clone)]
pub struct PlaybackStateStore {
    state_file: PathBuf,
    pointer_file: PathBuf,
}

impl PlaybackStateStore {
    pub fn new(state_file: impl Into<PathBuf>, pointer_file: impl Into<PathBuf>) -> Self {
        Self {
            state_file: state_file.into(),
            pointer_file: pointer_file.into(),
        }
    }

    /// Read the saved record, if there is a usable one.
    pub fn load(&self) -> Option<PersistedState> {
        match read_record(&self.state_file) {
            Ok(state) => Some(state),
            Err(StateError::Missing(path)) => {
                log::debug!("No saved state at {}", path.display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring saved state: {}", e);
                None
            }
        }
    }

    /// Overwrite the record with `state`.
    pub fn save(&self, state: &PersistedState) {
        let record = match format_record(state) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Not saving state: {}", e);
                return;
            }
        };
        match write_atomically(&self.state_file, &record) {
            Ok(()) => log::debug!(
                "Saved state for {} (fps {}, zoom {}%)",
                state.gif_reference,
                state.fps,
                state.zoom_percent
            ),
            Err(e) => log::warn!("Failed to save state to {}: {}", self.state_file.display(), e),
        }
    }

    /// Parameters to apply when loading `candidate`.
    ///
    /// Stored values are used only when the record names exactly this asset.
    pub fn resolve_on_load(&self, candidate: &str) -> EffectiveParams {
        resolve(self.load().as_ref(), candidate)
    }

    /// Remember `asset` as the most recently loaded one.
    pub fn record_last_asset(&self, asset: &str) {
        if let Err(e) = check_reference(asset) {
            log::warn!("Not recording last asset: {}", e);
            return;
        }
        if let Err(e) = write_atomically(&self.pointer_file, asset) {
            log::warn!("Failed to update {}: {}", self.pointer_file.display(), e);
        }
    }

    /// Most recently loaded asset, if recorded.
    pub fn last_asset(&self) -> Option<String> {
        let text = std::fs::read_to_string(&self.pointer_file).ok()?;
        let name = text.lines().next()?;
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Reconcile a saved record against the asset being loaded.
pub fn resolve(saved: Option<&PersistedState>, candidate: &str) -> EffectiveParams {
    match saved {
        Some(state) if state.gif_reference == candidate => state.params(),
        _ => EffectiveParams::default(),
    }
}

fn read_record(path: &Path) -> Result<PersistedState, StateError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StateError::Missing(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    parse_record(&text)
}

/// Parse the text of a record.
pub fn parse_record(text: &str) -> Result<PersistedState, StateError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 4 {
        return Err(StateError::Malformed(format!(
            "expected 4 lines, found {}",
            lines.len()
        )));
    }

    // Names are kept verbatim, surrounding spaces included
    let reference = lines[0];
    if reference.is_empty() {
        return Err(StateError::Malformed("empty asset reference".to_string()));
    }

    let fps = parse_number(lines[1], "fps")?;
    let zoom = parse_number(lines[2], "zoom")?;
    let position = parse_position(lines[3])?;

    Ok(PersistedState::new(reference, fps, zoom, position))
}

/// Serialize a record. The inverse of [`parse_record`].
///
/// References that cannot be stored on a single line are rejected.
pub fn format_record(state: &PersistedState) -> Result<String, StateError> {
    check_reference(&state.gif_reference)?;
    let position = state
        .window_position
        .map(|p| format!("{},{}", p.x, p.y))
        .unwrap_or_default();
    Ok(format!(
        "{}\n{}\n{}\n{}\n",
        state.gif_reference, state.fps, state.zoom_percent, position
    ))
}

fn check_reference(reference: &str) -> Result<(), StateError> {
    if reference.is_empty() {
        return Err(StateError::Malformed("empty asset reference".to_string()));
    }
    if reference.contains(['\n', '\r']) {
        return Err(StateError::Malformed(format!(
            "asset reference spans several lines: {reference:?}"
        )));
    }
    Ok(())
}

fn parse_number(line: &str, field: &str) -> Result<u32, StateError> {
    line.trim()
        .parse()
        .map_err(|_| StateError::Malformed(format!("invalid {field}: {line:?}")))
}

fn parse_position(line: &str) -> Result<Option<WindowPosition>, StateError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let invalid = || StateError::Malformed(format!("invalid position: {line:?}"));
    let (x, y) = line.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Some(WindowPosition::new(x, y)))
}

/// Replace `path` through a sibling temp file.
fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::{DEFAULT_FPS, DEFAULT_ZOOM};

    fn store_in(dir: &Path) -> PlaybackStateStore {
        PlaybackStateStore::new(dir.join("last_gif_config.txt"), dir.join("last_gif.txt"))
    }

    #[test]
    fn test_matching_reference_uses_saved_params() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(dir.path().join("last_gif_config.txt"), "foo.gif\n30\n150\n100,200\n").unwrap();

        let params = store.resolve_on_load("foo.gif");
        assert_eq!(params.fps, 30);
        assert_eq!(params.zoom_percent, 150);
        assert_eq!(params.window_position, Some(WindowPosition::new(100, 200)));
    }

    #[test]
    fn test_other_reference_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(dir.path().join("last_gif_config.txt"), "foo.gif\n30\n150\n100,200\n").unwrap();

        let params = store.resolve_on_load("bar.gif");
        assert_eq!(params, EffectiveParams::default());
        assert_eq!(params.fps, DEFAULT_FPS);
        assert_eq!(params.zoom_percent, DEFAULT_ZOOM);
        assert!(params.window_position.is_none());
    }

    #[test]
    fn test_reference_match_is_exact() {
        let saved = PersistedState::new("foo.gif", 30, 150, None);
        assert_eq!(resolve(Some(&saved), "Foo.gif"), EffectiveParams::default());
        assert_eq!(resolve(Some(&saved), "foo.gif "), EffectiveParams::default());
        assert_eq!(resolve(Some(&saved), "dir/foo.gif"), EffectiveParams::default());
        assert_eq!(resolve(None, "foo.gif"), EffectiveParams::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("nested"));

        let with_position = PersistedState::new("gif_20250101_120000.gif", 12, 80, Some(WindowPosition::new(-40, 300)));
        store.save(&with_position);
        assert_eq!(store.load(), Some(with_position));

        let without_position = PersistedState::new("a.gif", 60, 300, None);
        store.save(&without_position);
        assert_eq!(store.load(), Some(without_position));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().is_none());
        assert_eq!(store.resolve_on_load("foo.gif"), EffectiveParams::default());
    }

    #[test]
    fn test_truncated_record_is_rejected() {
        assert!(matches!(parse_record("foo.gif\n30\n150\n"), Err(StateError::Malformed(_))));
        assert!(matches!(parse_record(""), Err(StateError::Malformed(_))));
    }

    #[test]
    fn test_non_numeric_fields_are_rejected() {
        assert!(parse_record("foo.gif\nfast\n150\n1,2\n").is_err());
        assert!(parse_record("foo.gif\n30\nbig\n1,2\n").is_err());
        assert!(parse_record("foo.gif\n30\n150\n1;2\n").is_err());
        assert!(parse_record("foo.gif\n30\n150\nx,2\n").is_err());
        assert!(parse_record("\n30\n150\n1,2\n").is_err());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(dir.path().join("last_gif_config.txt"), "foo.gif\nthirty\n150\n1,2\n").unwrap();

        assert!(store.load().is_none());
        assert_eq!(store.resolve_on_load("foo.gif"), EffectiveParams::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let state = parse_record("foo.gif\n0\n1000\n1,2\n").unwrap();
        assert_eq!(state.fps, 1);
        assert_eq!(state.zoom_percent, 300);
    }

    #[test]
    fn test_crlf_and_empty_position() {
        let state = parse_record("foo.gif\r\n30\r\n150\r\n\r\n").unwrap();
        assert_eq!(state.gif_reference, "foo.gif");
        assert!(state.window_position.is_none());
    }

    #[test]
    fn test_format_record() {
        let state = PersistedState::new("foo.gif", 30, 150, Some(WindowPosition::new(100, 200)));
        assert_eq!(format_record(&state).unwrap(), "foo.gif\n30\n150\n100,200\n");
    }

    #[test]
    fn test_reference_with_spaces_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let state = PersistedState::new(" cat .gif ", 30, 150, Some(WindowPosition::new(1, 2)));

        store.save(&state);
        assert_eq!(store.load(), Some(state));

        let params = store.resolve_on_load(" cat .gif ");
        assert_eq!(params.fps, 30);
        assert_eq!(params.zoom_percent, 150);
        assert_eq!(params.window_position, Some(WindowPosition::new(1, 2)));
    }

    #[test]
    fn test_multiline_reference_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let saved = PersistedState::new("a.gif", 30, 150, None);
        store.save(&saved);

        let broken = PersistedState::new("evil\n.gif", 40, 200, None);
        assert!(matches!(format_record(&broken), Err(StateError::Malformed(_))));
        store.save(&broken);
        assert_eq!(store.load(), Some(saved));

        store.record_last_asset("a.gif");
        store.record_last_asset("b\r\n.gif");
        assert_eq!(store.last_asset().as_deref(), Some("a.gif"));
    }

    #[test]
    fn test_last_asset_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.last_asset().is_none());

        store.record_last_asset("gif_20250101_120000.gif");
        assert_eq!(store.last_asset().as_deref(), Some("gif_20250101_120000.gif"));
    }
}
