// SPDX-License-Identifier: MPL-2.0
//! Client state kept between runs, stored as CBOR next to other app data.
//!
//! Unlike `settings.toml`, nothing here is meant to be edited by hand: it holds
//! the session token issued at sign-in and the folders last used in file
//! dialogs.

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.cbor";

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Bearer token from the last successful sign-in.
    #[serde(default)]
    pub session_token: Option<String>,

    /// Last directory images were picked from for upload.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,

    /// Last directory a full-size image was downloaded to.
    #[serde(default)]
    pub last_download_directory: Option<PathBuf>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("has_session_token", &self.session_token.is_some())
            .field("last_open_directory", &self.last_open_directory)
            .field("last_download_directory", &self.last_download_directory)
            .finish()
    }
}

impl AppState {
    /// Loads state from the default location.
    ///
    /// Returns the state and, when the file exists but cannot be used, a
    /// warning suitable for a notification. A missing file is not an error.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "state file is corrupt");
                    (
                        Self::default(),
                        Some("Saved session could not be read and was reset".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot open state file");
                (
                    Self::default(),
                    Some("Saved session could not be opened".to_string()),
                )
            }
        }
    }

    /// Saves state to the default location. Returns a warning on failure.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("No data directory available to save the session".to_string());
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %err, "cannot create data dir");
                return Some("Could not create the data directory".to_string());
            }
        }

        let file = match fs::File::create(&path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot create state file");
                return Some("Could not save the session".to_string());
            }
        };

        if let Err(err) = ciborium::into_writer(self, BufWriter::new(file)) {
            tracing::warn!(path = %path.display(), error = %err, "cannot write state file");
            return Some("Could not save the session".to_string());
        }
        None
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_open_directory = Some(parent.to_path_buf());
        }
    }

    pub fn set_last_download_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_download_directory = Some(parent.to_path_buf());
        }
    }
}
