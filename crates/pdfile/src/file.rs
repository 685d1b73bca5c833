// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Top-level handle: a destination name bound to one main patch.

use crate::chunk::WrapPolicy;
use crate::config::PatchFileConfig;
use crate::error::{PatchError, SinkStage};
use crate::patch::Patch;
use crate::sink::{FsSink, PatchSink};
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// A patch file under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchFile {
    destination: String,
    main: Patch,
    wrap: WrapPolicy,
}

impl PatchFile {
    /// New file with default canvas settings (position (0,0), size 100x100,
    /// font size 10).
    pub fn create(destination: impl Into<String>) -> Self {
        Self::with_config(destination, &PatchFileConfig::default())
    }

    /// New file with explicit canvas and writer settings.
    pub fn with_config(destination: impl Into<String>, config: &PatchFileConfig) -> Self {
        let mut main = Patch::main(config.screen_position, config.size, config.font_size)
            .origin(config.origin);
        main.set_auto_placement_delta(Some(config.delta.dx), Some(config.delta.dy));
        Self {
            destination: destination.into(),
            main,
            wrap: config.wrap,
        }
    }

    /// Destination name handed to the sink.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The main canvas.
    pub fn main(&self) -> &Patch {
        &self.main
    }

    /// The main canvas, for adding elements and connections.
    pub fn main_mut(&mut self) -> &mut Patch {
        &mut self.main
    }

    /// Line wrapping used on write.
    pub fn wrap(&self) -> WrapPolicy {
        self.wrap
    }

    /// Whole file as bytes.
    ///
    /// # Errors
    ///
    /// [`PatchError::UndefinedIdentity`] if any scope holds a connection to
    /// an element without a creation index.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PatchError> {
        self.main.to_bytes(self.wrap)
    }

    /// Write to the filesystem path named by the destination.
    ///
    /// # Errors
    ///
    /// See [`PatchFile::write_with`].
    pub fn write(&self) -> Result<(), PatchError> {
        self.write_with(&mut FsSink::new())
    }

    /// Serialize fully, then write through `sink`.
    ///
    /// Nothing is opened when serialization fails. Once opened, the writer
    /// is closed on every path; a write error takes precedence over a close
    /// error.
    ///
    /// # Errors
    ///
    /// Serialization errors, or [`PatchError::Sink`] for the failing stage.
    #[instrument(skip_all, fields(destination = %self.destination))]
    pub fn write_with<S: PatchSink>(&self, sink: &mut S) -> Result<(), PatchError> {
        let bytes = self.to_bytes()?;
        let dest = self.destination.as_str();
        let mut writer = sink
            .open(dest)
            .map_err(|e| PatchError::sink(dest, SinkStage::Open, e))?;
        let written = writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| PatchError::sink(dest, SinkStage::Write, e));
        let closed = sink
            .close(dest, writer)
            .map_err(|e| PatchError::sink(dest, SinkStage::Close, e));
        written?;
        closed?;
        info!(bytes = bytes.len(), "patch file written");
        Ok(())
    }

    /// Reading patch files back into the model is not supported.
    ///
    /// # Errors
    ///
    /// Always [`PatchError::Unsupported`].
    pub fn parse(_path: impl AsRef<Path>) -> Result<Self, PatchError> {
        Err(PatchError::Unsupported {
            operation: "parsing patch files",
        })
    }
}
