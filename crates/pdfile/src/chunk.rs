// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record framing: `#<tag> <args...>;\r\n`, wrapped across lines.
//!
//! Every record kind in a patch file (canvas header, boxes, connections,
//! restore footer) linearizes to a [`Chunk`] and goes through
//! [`Chunk::write_to`]. Nothing else in the crate emits bytes.

use crate::atom::Atom;
use crate::error::PatchError;
use serde::{Deserialize, Serialize};

/// Line break used inside and after records.
pub const LINE_END: &str = "\r\n";
/// Record terminator.
pub const TERMINATOR: &str = ";\r\n";
/// Default soft-wrap threshold, in bytes of the pending line buffer.
pub const DEFAULT_WRAP_THRESHOLD: usize = 60;

/// How long argument lists are broken across output lines.
///
/// The line buffer never counts the leading `#<tag>`; it holds the
/// space-prefixed arguments appended since the last break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Break once the buffer is already longer than `threshold`, checked
    /// before each append. A line may overshoot by one separator plus one
    /// argument. Byte-compatible with files produced by the original tool.
    Soft {
        /// Buffer length that must be exceeded before a break.
        threshold: usize,
    },
    /// Break before an append that would push the buffer past `width`.
    /// Only a single argument longer than `width` can overshoot.
    Hard {
        /// Maximum buffer length.
        width: usize,
    },
}

impl Default for WrapPolicy {
    fn default() -> Self {
        Self::Soft {
            threshold: DEFAULT_WRAP_THRESHOLD,
        }
    }
}

impl WrapPolicy {
    fn breaks_before(self, line: &str, token: &str) -> bool {
        match self {
            Self::Soft { threshold } => line.len() > threshold,
            Self::Hard { width } => !line.is_empty() && line.len() + 1 + token.len() > width,
        }
    }
}

/// A typed record: a tag plus an ordered list of scalar arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    tag: String,
    args: Vec<Atom>,
}

impl Chunk {
    /// Build a chunk from a tag and its arguments.
    pub fn new<I, A>(tag: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Atom>,
    {
        Self {
            tag: tag.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Record tag (`N` for canvases, `X` for everything inside one).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Ordered arguments.
    pub fn args(&self) -> &[Atom] {
        &self.args
    }

    /// Append one argument.
    pub fn push(&mut self, arg: impl Into<Atom>) {
        self.args.push(arg.into());
    }

    /// Append the framed record to `out`.
    ///
    /// # Errors
    ///
    /// [`PatchError::InvalidTag`] if the tag is empty or contains whitespace.
    pub fn write_to(&self, out: &mut String, wrap: WrapPolicy) -> Result<(), PatchError> {
        if self.tag.is_empty() || self.tag.chars().any(char::is_whitespace) {
            return Err(PatchError::InvalidTag {
                tag: self.tag.clone(),
            });
        }
        out.push('#');
        out.push_str(&self.tag);
        let mut line = String::new();
        for arg in &self.args {
            let token = arg.to_string();
            if wrap.breaks_before(&line, &token) {
                out.push_str(&line);
                out.push_str(LINE_END);
                line.clear();
            }
            line.push(' ');
            line.push_str(&token);
        }
        out.push_str(&line);
        out.push_str(TERMINATOR);
        Ok(())
    }

    /// Framed record as a fresh string.
    ///
    /// # Errors
    ///
    /// See [`Chunk::write_to`].
    pub fn to_record(&self, wrap: WrapPolicy) -> Result<String, PatchError> {
        let mut out = String::new();
        self.write_to(&mut out, wrap)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn words(n: usize, w: &str) -> Vec<Atom> {
        (0..n).map(|_| Atom::from(w)).collect()
    }

    #[test]
    fn short_record_is_one_line() {
        let c = Chunk::new("X", ["obj".into(), Atom::Int(10), Atom::Int(20), "inlet".into()]);
        assert_eq!(
            c.to_record(WrapPolicy::default()).unwrap(),
            "#X obj 10 20 inlet;\r\n"
        );
    }

    #[test]
    fn empty_args_still_terminate() {
        let c = Chunk::new("X", Vec::<Atom>::new());
        assert_eq!(c.to_record(WrapPolicy::default()).unwrap(), "#X;\r\n");
    }

    #[test]
    fn soft_wrap_checks_before_append() {
        // 20 x " abc" = 80 bytes; the buffer is 64 bytes (> 60) after 16 tokens.
        let c = Chunk::new("X", words(20, "abc"));
        let rec = c.to_record(WrapPolicy::default()).unwrap();
        let first = " abc".repeat(16);
        let second = " abc".repeat(4);
        assert_eq!(rec, format!("#X{first}\r\n{second};\r\n"));
    }

    #[test]
    fn soft_wrap_overshoots_by_one_token() {
        // buffer of 60 is not > 60, so the long token still lands on line one.
        let mut args = words(15, "abc");
        args.push(Atom::from("a_rather_long_symbol_name"));
        args.push(Atom::from("z"));
        let rec = Chunk::new("X", args).to_record(WrapPolicy::default()).unwrap();
        let first_line = rec.split(LINE_END).next().unwrap();
        assert!(first_line.ends_with("a_rather_long_symbol_name"));
        assert_eq!(first_line.len(), 2 + 60 + 1 + 25);
        assert!(rec.ends_with("\r\n z;\r\n"));
    }

    #[test]
    fn hard_wrap_keeps_lines_within_width() {
        let c = Chunk::new("X", words(30, "abcd"));
        let rec = c.to_record(WrapPolicy::Hard { width: 20 }).unwrap();
        let body = rec.strip_prefix("#X").unwrap().strip_suffix(";\r\n").unwrap();
        for line in body.split(LINE_END) {
            assert!(line.len() <= 20, "line too long: {line:?}");
        }
    }

    #[test]
    fn hard_wrap_lets_an_oversized_token_stand_alone() {
        let c = Chunk::new("X", ["a", "abcdefghijklmnop", "b"]);
        let rec = c.to_record(WrapPolicy::Hard { width: 8 }).unwrap();
        assert_eq!(rec, "#X a\r\n abcdefghijklmnop\r\n b;\r\n");
    }

    #[test]
    fn bad_tags_are_rejected() {
        for tag in ["", "N X", "\t"] {
            let err = Chunk::new(tag, ["canvas"]).to_record(WrapPolicy::default());
            assert!(matches!(err, Err(PatchError::InvalidTag { .. })));
        }
    }

    #[test]
    fn wrap_policy_round_trips_through_json() {
        let json = r#"{"mode":"hard","width":72}"#;
        let p: WrapPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(p, WrapPolicy::Hard { width: 72 });
    }
}
