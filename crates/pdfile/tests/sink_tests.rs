// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use pdfile::{
    FsSink, MemorySink, MessageBox, ObjectBox, PatchError, PatchFile, PatchSink, SinkStage,
};
use std::io::{self, Write};

/// Sink whose writer fails after `budget` bytes; records every close.
#[derive(Default)]
struct FlakySink {
    fail_open: bool,
    budget: usize,
    opened: Vec<String>,
    closed: Vec<String>,
}

struct FlakyWriter {
    remaining: usize,
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("disk full"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl PatchSink for FlakySink {
    type Writer = FlakyWriter;

    fn open(&mut self, destination: &str) -> io::Result<FlakyWriter> {
        if self.fail_open {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.opened.push(destination.to_owned());
        Ok(FlakyWriter {
            remaining: self.budget,
        })
    }

    fn close(&mut self, destination: &str, _writer: FlakyWriter) -> io::Result<()> {
        self.closed.push(destination.to_owned());
        Ok(())
    }
}

fn small_file() -> PatchFile {
    let mut file = PatchFile::create("out.pd");
    let main = file.main_mut();
    main.add(ObjectBox::new("inlet"), Some("in"));
    main.add(ObjectBox::new("outlet"), Some("out"));
    main.connect("in", 0, "out", 0).unwrap();
    file
}

#[test]
fn writer_is_released_after_a_failed_write() {
    let mut sink = FlakySink {
        budget: 8,
        ..FlakySink::default()
    };
    let err = small_file().write_with(&mut sink).unwrap_err();
    match err {
        PatchError::Sink {
            destination, stage, ..
        } => {
            assert_eq!(destination, "out.pd");
            assert_eq!(stage, SinkStage::Write);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sink.opened, ["out.pd"]);
    assert_eq!(sink.closed, ["out.pd"]);
}

#[test]
fn open_failure_is_reported_without_close() {
    let mut sink = FlakySink {
        fail_open: true,
        ..FlakySink::default()
    };
    let err = small_file().write_with(&mut sink).unwrap_err();
    assert!(matches!(
        err,
        PatchError::Sink {
            stage: SinkStage::Open,
            ..
        }
    ));
    assert!(sink.closed.is_empty());
}

#[test]
fn serialization_failure_never_opens_the_sink() {
    let mut file = PatchFile::create("bad.pd");
    let main = file.main_mut();
    let m = main.add(MessageBox::new(["bang"]), None);
    let o = main.add(ObjectBox::new("print"), None);
    main.connect(o, 0, m, 0).unwrap();

    let mut sink = MemorySink::new();
    assert!(matches!(
        file.write_with(&mut sink),
        Err(PatchError::UndefinedIdentity { .. })
    ));
    assert!(sink.get("bad.pd").is_none());
    assert_eq!(sink.open_count(), 0);
}

#[test]
fn fs_sink_writes_the_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = small_file();
    file.write_with(&mut FsSink::rooted(dir.path())).unwrap();
    let written = std::fs::read(dir.path().join("out.pd")).unwrap();
    assert_eq!(written, file.to_bytes().unwrap());
}

#[test]
fn fs_sink_reports_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = PatchFile::create("missing/dir/out.pd");
    file.main_mut().add(ObjectBox::new("f"), None);
    let err = file.write_with(&mut FsSink::rooted(dir.path())).unwrap_err();
    assert!(err.to_string().starts_with("[PD_SINK] open failed"));
}

#[test]
fn parsing_is_reported_as_unsupported() {
    let err = PatchFile::parse("anything.pd").unwrap_err();
    assert!(matches!(err, PatchError::Unsupported { .. }));
    assert!(err.to_string().contains("not implemented"));
}
