// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Graphical elements, their placement, and the wiring between them.

use crate::atom::Atom;
use crate::chunk::Chunk;
use crate::patch::Patch;
use serde::{Deserialize, Serialize};

/// Raw coordinate value meaning "auto-place this axis".
pub const UNSET: i32 = -1;

/// A resolved screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Canvas origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window size of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Size {
    /// Construct a size.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self { w: 100, h: 100 }
    }
}

/// Offset applied to the last placed element to auto-place the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delta {
    /// Horizontal step.
    pub dx: i32,
    /// Vertical step.
    pub dy: i32,
}

impl Default for Delta {
    fn default() -> Self {
        Self { dx: 0, dy: 50 }
    }
}

/// Requested position; `None` on an axis asks the layout manager to place it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Fixed x, if any.
    pub x: Option<i32>,
    /// Fixed y, if any.
    pub y: Option<i32>,
}

impl Placement {
    /// Both axes auto-placed.
    pub const AUTO: Self = Self { x: None, y: None };

    /// Both axes fixed.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// From raw coordinates, treating [`UNSET`] as "auto-place".
    pub fn from_raw(x: i32, y: i32) -> Self {
        let axis = |v: i32| (v != UNSET).then_some(v);
        Self { x: axis(x), y: axis(y) }
    }

    /// Fill unset axes from `cursor + delta`, clamped to the `i32` range.
    pub fn resolve(self, cursor: Position, delta: Delta) -> Position {
        Position {
            x: self.x.unwrap_or(cursor.x.saturating_add(delta.dx)),
            y: self.y.unwrap_or(cursor.y.saturating_add(delta.dy)),
        }
    }
}

impl From<Position> for Placement {
    fn from(p: Position) -> Self {
        Self::at(p.x, p.y)
    }
}

/// An object box: `#X obj <x> <y> <typename> <args...>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBox {
    typename: String,
    args: Vec<Atom>,
    placement: Placement,
}

impl ObjectBox {
    /// New object of the given type, auto-placed, without arguments.
    pub fn new(typename: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            args: Vec::new(),
            placement: Placement::AUTO,
        }
    }

    /// Append one creation argument.
    pub fn arg(mut self, arg: impl Into<Atom>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several creation arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Atom>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Fix both coordinates.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement = Placement::at(x, y);
        self
    }

    /// Replace the requested placement.
    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Fix only the x coordinate.
    pub fn at_x(mut self, x: i32) -> Self {
        self.placement.x = Some(x);
        self
    }

    /// Fix only the y coordinate.
    pub fn at_y(mut self, y: i32) -> Self {
        self.placement.y = Some(y);
        self
    }

    /// Object class name.
    pub fn typename(&self) -> &str {
        &self.typename
    }

    /// Creation arguments.
    pub fn arguments(&self) -> &[Atom] {
        &self.args
    }
}

/// A message box: `#X msg <x> <y> <args...>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageBox {
    args: Vec<Atom>,
    placement: Placement,
}

impl MessageBox {
    /// Message box with the given content.
    pub fn new<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Atom>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            placement: Placement::AUTO,
        }
    }

    /// Fix both coordinates.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement = Placement::at(x, y);
        self
    }

    /// Replace the requested placement.
    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Fix only the x coordinate.
    pub fn at_x(mut self, x: i32) -> Self {
        self.placement.x = Some(x);
        self
    }

    /// Fix only the y coordinate.
    pub fn at_y(mut self, y: i32) -> Self {
        self.placement.y = Some(y);
        self
    }

    /// Message content.
    pub fn arguments(&self) -> &[Atom] {
        &self.args
    }
}

/// Anything that can sit on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Object box; receives a creation index.
    Object(ObjectBox),
    /// Message box.
    Message(MessageBox),
    /// Nested sub-patch (`pd <name>` box in the parent).
    Patch(Box<Patch>),
}

impl Element {
    /// Position requested before layout.
    pub fn placement(&self) -> Placement {
        match self {
            Self::Object(o) => o.placement,
            Self::Message(m) => m.placement,
            Self::Patch(p) => p.placement(),
        }
    }

    /// Whether this element takes part in creation indexing.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Argument list of a box element at a resolved position.
    /// Nested patches serialize themselves and return `None`.
    pub(crate) fn linearize(&self, at: Position) -> Option<Chunk> {
        match self {
            Self::Object(o) => {
                let mut c = Chunk::new("X", [Atom::from("obj"), at.x.into(), at.y.into()]);
                c.push(o.typename.as_str());
                for a in &o.args {
                    c.push(a.clone());
                }
                Some(c)
            }
            Self::Message(m) => {
                let mut c = Chunk::new("X", [Atom::from("msg"), at.x.into(), at.y.into()]);
                for a in &m.args {
                    c.push(a.clone());
                }
                Some(c)
            }
            Self::Patch(_) => None,
        }
    }
}

impl From<ObjectBox> for Element {
    fn from(o: ObjectBox) -> Self {
        Self::Object(o)
    }
}

impl From<MessageBox> for Element {
    fn from(m: MessageBox) -> Self {
        Self::Message(m)
    }
}

impl From<Patch> for Element {
    fn from(p: Patch) -> Self {
        Self::Patch(Box::new(p))
    }
}

/// Handle to an element inside the scope that added it.
///
/// Only meaningful for the patch that returned it; handing it to another
/// patch is caught at serialization if the index does not exist there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Insertion-order position within the scope.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A connection endpoint: a handle, or a name registered with `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    /// Direct handle.
    Direct(ElementId),
    /// Name looked up in the scope's name index.
    ByName(String),
}

impl From<ElementId> for ElementRef {
    fn from(id: ElementId) -> Self {
        Self::Direct(id)
    }
}

impl From<&str> for ElementRef {
    fn from(name: &str) -> Self {
        Self::ByName(name.to_owned())
    }
}

impl From<String> for ElementRef {
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

impl From<&String> for ElementRef {
    fn from(name: &String) -> Self {
        Self::ByName(name.clone())
    }
}

/// Wire from `source`'s outlet to `target`'s inlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Source element.
    pub source: ElementId,
    /// Outlet number on the source.
    pub outlet: usize,
    /// Target element.
    pub target: ElementId,
    /// Inlet number on the target.
    pub inlet: usize,
}

impl Connection {
    /// `#X connect <src> <outlet> <dst> <inlet>` given both creation indices.
    pub(crate) fn linearize(&self, source_index: usize, target_index: usize) -> Chunk {
        Chunk::new(
            "X",
            [
                Atom::from("connect"),
                source_index.into(),
                self.outlet.into(),
                target_index.into(),
                self.inlet.into(),
            ],
        )
    }
}
