// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-scope bookkeeping: element order, creation indices, auto-placement,
//! name resolution, and connections.
//!
//! # Creation indices
//!
//! Only object boxes are numbered. The i-th object box added to a scope gets
//! index `i`, whatever message boxes or sub-patches were added in between.
//! Connections refer to endpoints by this index on the wire.
//!
//! # Auto-placement
//!
//! The cursor always holds the resolved position of the last added element.
//! An unset axis on a new element becomes `cursor + delta` on that axis.
//! Changing the delta affects only later insertions.

use crate::element::{Connection, Delta, Element, ElementId, ElementRef, Position};
use crate::error::PatchError;
use std::collections::HashMap;
use tracing::debug;

/// An element after insertion: resolved position and identity are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    /// The element itself.
    pub element: Element,
    /// Resolved screen position in this scope.
    pub position: Position,
    /// Wire identity; `None` for anything but object boxes.
    pub creation_index: Option<usize>,
}

/// Ordered element and connection store for one patch scope.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutManager {
    elements: Vec<Placed>,
    names: HashMap<String, ElementId>,
    connections: Vec<Connection>,
    object_count: usize,
    cursor: Position,
    delta: Delta,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new(Position::ORIGIN, Delta::default())
    }
}

impl LayoutManager {
    /// Empty scope whose first auto-placed element lands at `origin + delta`.
    pub fn new(origin: Position, delta: Delta) -> Self {
        Self {
            elements: Vec::new(),
            names: HashMap::new(),
            connections: Vec::new(),
            object_count: 0,
            cursor: origin,
            delta,
        }
    }

    /// Insert an element, optionally registering it under `name`.
    ///
    /// A name already in use is rebound to the new element.
    pub fn add(&mut self, element: impl Into<Element>, name: Option<&str>) -> ElementId {
        let element = element.into();
        let id = ElementId(self.elements.len());
        let creation_index = element.is_object().then(|| {
            let i = self.object_count;
            self.object_count += 1;
            i
        });
        if let Some(name) = name {
            self.names.insert(name.to_owned(), id);
        }
        let position = element.placement().resolve(self.cursor, self.delta);
        self.cursor = position;
        debug!(
            element = id.index(),
            ?creation_index,
            x = position.x,
            y = position.y,
            name,
            "element added"
        );
        self.elements.push(Placed {
            element,
            position,
            creation_index,
        });
        id
    }

    /// Record a wire from `source`'s `outlet` to `target`'s `inlet`.
    ///
    /// # Errors
    ///
    /// [`PatchError::UnresolvedReference`] if a name endpoint is unknown.
    /// Direct handles are not checked here; a handle with no creation index
    /// fails when the scope is serialized.
    pub fn connect(
        &mut self,
        source: impl Into<ElementRef>,
        outlet: usize,
        target: impl Into<ElementRef>,
        inlet: usize,
    ) -> Result<(), PatchError> {
        let source = self.resolve(&source.into())?;
        let target = self.resolve(&target.into())?;
        debug!(
            source = source.index(),
            outlet,
            target = target.index(),
            inlet,
            "connection added"
        );
        self.connections.push(Connection {
            source,
            outlet,
            target,
            inlet,
        });
        Ok(())
    }

    /// Resolve an endpoint to a handle.
    ///
    /// # Errors
    ///
    /// [`PatchError::UnresolvedReference`] for an unregistered name.
    pub fn resolve(&self, r: &ElementRef) -> Result<ElementId, PatchError> {
        match r {
            ElementRef::Direct(id) => Ok(*id),
            ElementRef::ByName(name) => {
                self.names
                    .get(name)
                    .copied()
                    .ok_or_else(|| PatchError::UnresolvedReference { name: name.clone() })
            }
        }
    }

    /// Handle registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Placed element behind a handle.
    pub fn get(&self, id: ElementId) -> Option<&Placed> {
        self.elements.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Placed> {
        self.elements.get_mut(id.0)
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> &[Placed] {
        &self.elements
    }

    /// Connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of object boxes added so far.
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Position of the most recently added element (or the origin).
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current auto-placement step.
    pub fn delta(&self) -> Delta {
        self.delta
    }

    /// Replace the step used for later insertions.
    pub fn set_delta(&mut self, delta: Delta) {
        self.delta = delta;
    }

    /// Move the cursor the next auto-placed element steps from.
    pub(crate) fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Creation index of a connection endpoint.
    ///
    /// # Errors
    ///
    /// [`PatchError::UndefinedIdentity`] if `id` is not in this scope or is
    /// not an object box.
    pub(crate) fn wire_index(&self, connection: usize, id: ElementId) -> Result<usize, PatchError> {
        self.get(id)
            .and_then(|p| p.creation_index)
            .ok_or(PatchError::UndefinedIdentity {
                connection,
                element: id.0,
            })
    }
}
