// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for building and writing patches.

use std::fmt;
use thiserror::Error;

/// Which sink operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStage {
    /// Acquiring the destination.
    Open,
    /// Writing the serialized bytes.
    Write,
    /// Flushing and releasing the destination.
    Close,
}

impl fmt::Display for SinkStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Write => "write",
            Self::Close => "close",
        })
    }
}

/// Errors surfaced by the patch builder and writer.
#[derive(Debug, Error)]
pub enum PatchError {
    /// `connect` named an endpoint that is not registered in the scope.
    #[error("[PD_UNRESOLVED_REFERENCE] no element named `{name}` in this patch")]
    UnresolvedReference {
        /// The name that failed to resolve.
        name: String,
    },
    /// A connection endpoint has no creation index in its scope.
    #[error(
        "[PD_UNDEFINED_IDENTITY] connection #{connection} references element #{element}, which has no creation index"
    )]
    UndefinedIdentity {
        /// Position of the connection in its scope's connection list.
        connection: usize,
        /// Handle index of the offending endpoint.
        element: usize,
    },
    /// The requested operation is not implemented.
    #[error("[PD_UNSUPPORTED] {operation} is not implemented")]
    Unsupported {
        /// Operation name.
        operation: &'static str,
    },
    /// A chunk tag was empty or contained whitespace.
    #[error("[PD_INVALID_TAG] `{tag}` is not a single token")]
    InvalidTag {
        /// The rejected tag.
        tag: String,
    },
    /// The output sink failed.
    #[error("[PD_SINK] {stage} failed for `{destination}`: {source}")]
    Sink {
        /// Destination name handed to the sink.
        destination: String,
        /// Operation that failed.
        stage: SinkStage,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    pub(crate) fn sink(destination: &str, stage: SinkStage, source: std::io::Error) -> Self {
        Self::Sink {
            destination: destination.to_owned(),
            stage,
            source,
        }
    }
}
