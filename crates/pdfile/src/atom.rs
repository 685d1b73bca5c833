// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar chunk arguments.

use std::fmt;

/// A single scalar argument inside a chunk.
///
/// Symbols are written verbatim. No escaping happens here: a symbol that
/// contains `;`, `,`, `$` or whitespace produces a record the editor will
/// split or misread, and keeping those out is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Signed integer (coordinates, numeric box arguments).
    Int(i64),
    /// Non-negative ordinal (creation index, outlet/inlet number).
    Index(usize),
    /// Floating-point box argument.
    ///
    /// Written with `Display`, so `NaN` and infinities come out as `NaN`,
    /// `inf` and `-inf`, which the editor reads back as symbols. Passing
    /// only finite values is the caller's job.
    Float(f64),
    /// Bare word (type names, keywords, symbol arguments).
    Symbol(String),
}

impl Atom {
    /// Shorthand for [`Atom::Symbol`].
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Index(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Atom {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Atom {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Atom {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for Atom {
    fn from(v: usize) -> Self {
        Self::Index(v)
    }
}

impl From<f32> for Atom {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Self::Symbol(s.to_owned())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Self::Symbol(s)
    }
}
