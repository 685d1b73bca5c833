// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Where the CLI keeps its canvas settings.
//!
//! Settings are one [`PatchFileConfig`] serialized as pretty JSON, either at
//! an explicit path or as `pdfile.json` in the user config directory.

use directories::ProjectDirs;
use pdfile::PatchFileConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE: &str = "pdfile.json";

/// Failures reading or writing a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No home directory to derive the user config directory from.
    #[error("could not resolve the user config directory")]
    NoConfigDir,
    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The file is not a valid settings document.
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// The file or its directory could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// A settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// `pdfile.json` under the user config directory (e.g. `~/.config/pdfile`).
    /// Nothing is created until [`SettingsFile::save`].
    pub fn user() -> Result<Self, SettingsError> {
        let dirs =
            ProjectDirs::from("net", "duboue", "pdfile").ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().join(SETTINGS_FILE)))
    }

    /// Settings at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings; `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<PatchFileConfig>, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Write `settings` as pretty JSON, creating parent directories.
    pub fn save(&self, settings: &PatchFileConfig) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_vec_pretty(settings).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(write_err)
    }
}
