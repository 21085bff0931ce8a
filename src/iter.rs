/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Read-only traversal.
//!
//! Pending tags are composed along the way down instead of being pushed, so
//! the tree can be read through a shared reference. The values produced are
//! the same as if every visited node had been pushed first.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::arena::{Arena, NodeId};
use crate::node::{Link, Tag};
use crate::Element;

impl<T: Element> Arena<T> {
    /// Children of `x` in sequence order and the tag they inherit, given the
    /// tag `inherited` that is pending above `x`.
    fn resolve(&self, x: NodeId, inherited: Tag<T>) -> ([Link; 2], Tag<T>) {
        let node = &self[x];
        let tag = node.tag.then(inherited);
        let [l, r] = node.c;
        let c = if tag.reverse { [r, l] } else { [l, r] };
        (c, tag)
    }

    /// Value at position `k` of the subtree. `k` must be in bounds.
    pub fn kth(&self, root: Link, mut k: usize) -> Option<T> {
        let mut next = root;
        let mut inherited = Tag::default();
        while let Some(x) = next {
            let ([l, r], tag) = self.resolve(x, inherited);
            let lsize = self.size(l);
            if k == lsize {
                return Some(inherited.apply_value(self[x].value));
            }
            next = if k < lsize {
                l
            } else {
                k -= lsize + 1;
                r
            };
            inherited = tag;
        }
        None
    }
}

/// In-order iterator over the values of a [`Treap`](crate::Treap).
pub struct Iter<'a, T: Element> {
    arena: &'a Arena<T>,
    // Nodes whose left part has been visited, with the tag pending above them
    stack: Vec<(NodeId, Tag<T>)>,
    remaining: usize,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, root: Link) -> Self {
        let mut iter = Iter {
            arena,
            stack: Vec::new(),
            remaining: arena.size(root),
        };
        iter.descend(root, Tag::default());
        iter
    }

    fn descend(&mut self, mut next: Link, mut inherited: Tag<T>) {
        while let Some(x) = next {
            let ([l, _], tag) = self.arena.resolve(x, inherited);
            self.stack.push((x, inherited));
            next = l;
            inherited = tag;
        }
    }
}

impl<'a, T: Element> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (x, inherited) = self.stack.pop()?;
        let ([_, r], tag) = self.arena.resolve(x, inherited);
        self.descend(r, tag);
        self.remaining -= 1;
        Some(inherited.apply_value(self.arena[x].value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: Element> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: Element> FusedIterator for Iter<'a, T> {}
