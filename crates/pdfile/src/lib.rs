// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Programmatic builder and serializer for Pure Data patch files.
//!
//! Build a [`PatchFile`], add object boxes, message boxes and sub-patches to
//! its main [`Patch`], wire them with `connect`, then write the result
//! through a [`PatchSink`].
//!
//! ```
//! use pdfile::{MemorySink, ObjectBox, PatchFile};
//!
//! let mut file = PatchFile::create("gate.pd");
//! let main = file.main_mut();
//! main.add(ObjectBox::new("inlet"), Some("in"));
//! main.add(ObjectBox::new("outlet"), Some("out"));
//! main.connect("in", 0, "out", 0)?;
//!
//! let mut sink = MemorySink::new();
//! file.write_with(&mut sink)?;
//! assert!(sink.text("gate.pd").unwrap_or_default().contains("#X connect 0 0 1 0;"));
//! # Ok::<(), pdfile::PatchError>(())
//! ```
//!
//! # Identity
//!
//! Connections are written with the endpoints' creation indices, assigned
//! to object boxes in insertion order per scope. Message boxes and
//! sub-patches carry no index and cannot be connection endpoints; a
//! connection to one fails when the file is serialized.
//!
//! Parsing existing files is not supported: [`PatchFile::parse`] always
//! returns [`PatchError::Unsupported`].
#![forbid(unsafe_code)]

mod atom;
mod chunk;
mod config;
mod element;
mod error;
mod file;
mod layout;
mod patch;
mod sink;

pub use atom::Atom;
pub use chunk::{Chunk, WrapPolicy, DEFAULT_WRAP_THRESHOLD, LINE_END, TERMINATOR};
pub use config::PatchFileConfig;
pub use element::{
    Connection, Delta, Element, ElementId, ElementRef, MessageBox, ObjectBox, Placement, Position,
    Size, UNSET,
};
pub use error::{PatchError, SinkStage};
pub use file::PatchFile;
pub use layout::{LayoutManager, Placed};
pub use patch::{Patch, DEFAULT_FONT_SIZE};
pub use sink::{FsSink, MemorySink, PatchSink};
