// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canvas scopes: the main patch and nested sub-patches.
//!
//! A scope serializes as its canvas header, then each element in insertion
//! order (sub-patches recurse in place), then each connection, then, for a
//! nested scope, a `restore` footer carrying the sub-patch box position in
//! the parent.

use crate::atom::Atom;
use crate::chunk::{Chunk, WrapPolicy};
use crate::element::{Delta, Element, ElementId, ElementRef, Placement, Position, Size};
use crate::error::PatchError;
use crate::layout::{LayoutManager, Placed};

/// Default canvas font size.
pub const DEFAULT_FONT_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
enum Scope {
    Main { font_size: u32 },
    Nested { name: Option<String>, shown: bool },
}

/// Record shapes a scope emits around its contents.
enum Frame<'a> {
    Canvas(&'a Patch),
    Restore {
        at: Position,
        name: Option<&'a str>,
    },
}

impl Frame<'_> {
    fn linearize(&self) -> Chunk {
        match self {
            Self::Canvas(p) => {
                let mut c = Chunk::new(
                    "N",
                    [
                        Atom::from("canvas"),
                        p.screen_position.x.into(),
                        p.screen_position.y.into(),
                        p.size.w.into(),
                        p.size.h.into(),
                    ],
                );
                match &p.scope {
                    Scope::Main { font_size } => c.push(*font_size),
                    Scope::Nested {
                        name: Some(name),
                        shown,
                    } => {
                        c.push(name.as_str());
                        c.push(i32::from(*shown));
                    }
                    Scope::Nested { name: None, .. } => {}
                }
                c
            }
            Self::Restore { at, name } => {
                let mut c = Chunk::new(
                    "X",
                    [Atom::from("restore"), at.x.into(), at.y.into(), "pd".into()],
                );
                if let Some(name) = name {
                    c.push(*name);
                }
                c
            }
        }
    }
}

/// A canvas: the main patch of a file, or a sub-patch inside another.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    screen_position: Position,
    size: Size,
    scope: Scope,
    placement: Placement,
    layout: LayoutManager,
}

impl Patch {
    /// Top-level canvas.
    pub fn main(screen_position: Position, size: Size, font_size: u32) -> Self {
        Self::with_scope(screen_position, size, Scope::Main { font_size })
    }

    /// Named sub-patch, hidden on load, auto-placed in its parent.
    pub fn subpatch(name: impl Into<String>) -> Self {
        Self::nested(Some(name.into()))
    }

    /// Sub-patch with an optional name.
    pub fn nested(name: Option<String>) -> Self {
        Self::with_scope(
            Position::ORIGIN,
            Size::default(),
            Scope::Nested { name, shown: false },
        )
    }

    fn with_scope(screen_position: Position, size: Size, scope: Scope) -> Self {
        Self {
            screen_position,
            size,
            scope,
            placement: Placement::AUTO,
            layout: LayoutManager::default(),
        }
    }

    /// Fix the sub-patch box position in its parent.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.placement = Placement::at(x, y);
        self
    }

    /// Fix only the x coordinate of the box in its parent.
    pub fn at_x(mut self, x: i32) -> Self {
        self.placement.x = Some(x);
        self
    }

    /// Fix only the y coordinate of the box in its parent.
    pub fn at_y(mut self, y: i32) -> Self {
        self.placement.y = Some(y);
        self
    }

    /// Window position of this canvas when opened.
    pub fn screen(mut self, screen_position: Position) -> Self {
        self.screen_position = screen_position;
        self
    }

    /// Window size of this canvas.
    pub fn sized(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Open the sub-patch window when the file loads. No effect on a main patch.
    pub fn shown(mut self, shown: bool) -> Self {
        if let Scope::Nested { shown: s, .. } = &mut self.scope {
            *s = shown;
        }
        self
    }

    /// Move the auto-placement cursor; the next auto-placed element lands
    /// at `origin + delta`. Elements already added keep their positions.
    pub fn origin(mut self, origin: Position) -> Self {
        self.layout.set_cursor(origin);
        self
    }

    /// Whether this is the top-level canvas of a file.
    pub fn is_main(&self) -> bool {
        matches!(self.scope, Scope::Main { .. })
    }

    /// Sub-patch name, if nested and named.
    pub fn name(&self) -> Option<&str> {
        match &self.scope {
            Scope::Nested { name, .. } => name.as_deref(),
            Scope::Main { .. } => None,
        }
    }

    /// Requested box position in the parent.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// This scope's layout manager.
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    /// Add an element; see [`LayoutManager::add`].
    pub fn add(&mut self, element: impl Into<Element>, name: Option<&str>) -> ElementId {
        self.layout.add(element, name)
    }

    /// Connect two elements; see [`LayoutManager::connect`].
    ///
    /// # Errors
    ///
    /// [`PatchError::UnresolvedReference`] if a name endpoint is unknown.
    pub fn connect(
        &mut self,
        source: impl Into<ElementRef>,
        outlet: usize,
        target: impl Into<ElementRef>,
        inlet: usize,
    ) -> Result<(), PatchError> {
        self.layout.connect(source, outlet, target, inlet)
    }

    /// Change the auto-placement step. `None` keeps that axis as it is.
    pub fn set_auto_placement_delta(&mut self, dx: Option<i32>, dy: Option<i32>) {
        let current = self.layout.delta();
        self.layout.set_delta(Delta {
            dx: dx.unwrap_or(current.dx),
            dy: dy.unwrap_or(current.dy),
        });
    }

    /// Handle registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.layout.lookup(name)
    }

    /// Placed element behind a handle.
    pub fn element(&self, id: ElementId) -> Option<&Placed> {
        self.layout.get(id)
    }

    /// Nested patch previously added to this scope, for further population.
    pub fn subpatch_mut(&mut self, id: ElementId) -> Option<&mut Self> {
        match self.layout.get_mut(id) {
            Some(Placed {
                element: Element::Patch(p),
                ..
            }) => Some(p.as_mut()),
            _ => None,
        }
    }

    /// Serialize this scope and everything under it.
    ///
    /// A nested patch written on its own closes with a restore footer at its
    /// requested placement, unset axes counting as 0.
    ///
    /// # Errors
    ///
    /// [`PatchError::UndefinedIdentity`] for a connection whose endpoint has
    /// no creation index.
    pub fn write_to(&self, out: &mut String, wrap: WrapPolicy) -> Result<(), PatchError> {
        let at = self.placement.resolve(Position::ORIGIN, Delta { dx: 0, dy: 0 });
        self.write_scope(out, wrap, at)
    }

    /// Serialized bytes.
    ///
    /// # Errors
    ///
    /// See [`Patch::write_to`].
    pub fn to_bytes(&self, wrap: WrapPolicy) -> Result<Vec<u8>, PatchError> {
        let mut out = String::new();
        self.write_to(&mut out, wrap)?;
        Ok(out.into_bytes())
    }

    fn write_scope(
        &self,
        out: &mut String,
        wrap: WrapPolicy,
        at: Position,
    ) -> Result<(), PatchError> {
        Frame::Canvas(self).linearize().write_to(out, wrap)?;
        for placed in self.layout.elements() {
            match &placed.element {
                Element::Patch(sub) => sub.write_scope(out, wrap, placed.position)?,
                other => {
                    if let Some(chunk) = other.linearize(placed.position) {
                        chunk.write_to(out, wrap)?;
                    }
                }
            }
        }
        for (i, conn) in self.layout.connections().iter().enumerate() {
            let src = self.layout.wire_index(i, conn.source)?;
            let dst = self.layout.wire_index(i, conn.target)?;
            conn.linearize(src, dst).write_to(out, wrap)?;
        }
        if let Scope::Nested { name, .. } = &self.scope {
            Frame::Restore {
                at,
                name: name.as_deref(),
            }
            .linearize()
            .write_to(out, wrap)?;
        }
        Ok(())
    }
}
