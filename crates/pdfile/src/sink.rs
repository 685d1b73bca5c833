// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Output port for finished patch files.
//!
//! [`PatchFile::write_with`](crate::PatchFile::write_with) opens the sink
//! once, writes the whole serialized file, and always hands the writer back
//! through [`PatchSink::close`], even after a failed write.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Byte sink keyed by destination name.
pub trait PatchSink {
    /// Writer handed out by [`PatchSink::open`].
    type Writer: Write;

    /// Acquire the destination for writing, truncating any previous content.
    fn open(&mut self, destination: &str) -> io::Result<Self::Writer>;

    /// Flush and release a writer obtained from [`PatchSink::open`].
    fn close(&mut self, destination: &str, writer: Self::Writer) -> io::Result<()>;
}

/// Filesystem sink; destinations are paths relative to `root`.
#[derive(Debug, Clone, Default)]
pub struct FsSink {
    root: Option<PathBuf>,
}

impl FsSink {
    /// Sink resolving destinations against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink resolving destinations against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn path_for(&self, destination: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(destination),
            None => PathBuf::from(destination),
        }
    }
}

impl PatchSink for FsSink {
    type Writer = BufWriter<File>;

    fn open(&mut self, destination: &str) -> io::Result<Self::Writer> {
        File::create(self.path_for(destination)).map(BufWriter::new)
    }

    fn close(&mut self, _destination: &str, writer: Self::Writer) -> io::Result<()> {
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
    open_count: usize,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes last closed under `destination`.
    pub fn get(&self, destination: &str) -> Option<&[u8]> {
        self.files.get(destination).map(Vec::as_slice)
    }

    /// Content as UTF-8, if present and valid.
    pub fn text(&self, destination: &str) -> Option<&str> {
        self.get(destination).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Writers handed out and not yet closed.
    pub fn open_count(&self) -> usize {
        self.open_count
    }
}

impl PatchSink for MemorySink {
    type Writer = Vec<u8>;

    fn open(&mut self, _destination: &str) -> io::Result<Self::Writer> {
        self.open_count += 1;
        Ok(Vec::new())
    }

    fn close(&mut self, destination: &str, writer: Self::Writer) -> io::Result<()> {
        self.open_count = self.open_count.saturating_sub(1);
        self.files.insert(destination.to_owned(), writer);
        Ok(())
    }
}
