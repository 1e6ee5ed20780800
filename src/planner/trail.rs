// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Persistent run sequences shared between queued search states.

use petgraph::graph::EdgeIndex;
use std::rc::Rc;

struct Link {
    edge: EdgeIndex,
    prev: Trail,
    len: usize,
}

/// An immutable sequence of runs from the start location.
///
/// Extending a trail allocates one link and shares the prefix, so sibling
/// states never observe each other's extensions.
#[derive(Clone, Default)]
pub struct Trail(Option<Rc<Link>>);

impl Trail {
    /// The empty trail.
    pub fn new() -> Self {
        Self(None)
    }

    /// A new trail with `edge` appended.
    #[must_use]
    pub fn push(&self, edge: EdgeIndex) -> Self {
        Self(Some(Rc::new(Link {
            edge,
            prev: self.clone(),
            len: self.len() + 1,
        })))
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |link| link.len)
    }

    /// True for the empty trail.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Runs in traversal order.
    pub fn to_vec(&self) -> Vec<EdgeIndex> {
        let mut edges = Vec::with_capacity(self.len());
        let mut cursor = self.0.as_ref();
        while let Some(link) = cursor {
            edges.push(link.edge);
            cursor = link.prev.0.as_ref();
        }
        edges.reverse();
        edges
    }
}

impl Drop for Trail {
    // Unlink iteratively; the default recursive drop overflows the stack
    // on long routes.
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut link) => next = link.prev.0.take(),
                Err(_) => break,
            }
        }
    }
}

impl std::fmt::Debug for Trail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}
