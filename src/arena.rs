/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Slot storage for treap nodes.
//!
//! Children are referenced by [`NodeId`] instead of owning pointers. Released
//! slots are kept on a free list and handed out again by later allocations.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use num_traits::{Bounded, FromPrimitive, Zero};

use crate::node::{Link, Node, Tag};
use crate::Element;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone)]
pub(crate) struct Arena<T: Element> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    // Scratch path shared by split and merge, always empty between calls
    pub(crate) path: Vec<(NodeId, usize)>,
}

impl<T: Element> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: Node<T>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Some(node);
            return id;
        }
        let id = match u32::try_from(self.slots.len()) {
            Ok(id) => NodeId(id),
            Err(_) => panic!("treap arena exhausted the u32 index space"),
        };
        self.slots.push(Some(node));
        id
    }

    // The node must already be detached from the tree.
    pub fn release(&mut self, id: NodeId) -> Node<T> {
        let node = match self.slots[id.index()].take() {
            Some(node) => node,
            None => panic!("node {:?} released twice", id),
        };
        self.free.push(id);
        node
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn size(&self, link: Link) -> usize {
        link.map_or(0, |x| self[x].size)
    }
    pub fn sum(&self, link: Link) -> T::Sum {
        link.map_or_else(Zero::zero, |x| self[x].sum)
    }
    pub fn max(&self, link: Link) -> T {
        link.map_or_else(Bounded::min_value, |x| self[x].max)
    }

    /// Recompute the aggregates of `x` from its value and its children. The
    /// children must be up to date.
    pub fn pull(&mut self, x: NodeId) {
        let [l, r] = self[x].c;
        let value = self[x].value;
        let size = 1 + self.size(l) + self.size(r);
        let sum = value.widen() + self.sum(l) + self.sum(r);
        let max = value.max(self.max(l)).max(self.max(r));
        let node = &mut self[x];
        node.size = size;
        node.sum = sum;
        node.max = max;
    }

    /// Apply `tag` to the whole subtree rooted at `x`: the node's value and
    /// aggregates are updated now, its children later by `push`.
    pub fn apply(&mut self, x: NodeId, tag: Tag<T>) {
        let node = &mut self[x];
        if let Some(delta) = tag.add {
            node.value = node.value + delta;
            node.max = node.max + delta;
            node.sum = node.sum + scaled(delta, node.size);
        }
        node.tag.compose(tag);
    }

    /// Hand the pending tag of `x` down to its children. Must be called
    /// before the children of `x` are read or relinked.
    pub fn push(&mut self, x: NodeId) {
        let tag = core::mem::take(&mut self[x].tag);
        if tag.is_empty() {
            return;
        }
        if tag.reverse {
            self[x].c.swap(0, 1);
        }
        for c in self[x].c.into_iter().flatten() {
            self.apply(c, tag);
        }
    }
}

/// `delta` added `cnt` times.
pub(crate) fn scaled<T: Element>(delta: T, cnt: usize) -> T::Sum {
    match <T::Sum as FromPrimitive>::from_usize(cnt) {
        Some(cnt) => delta.widen() * cnt,
        None => panic!("subtree size {} overflows the sum type", cnt),
    }
}

impl<T: Element> Index<NodeId> for Arena<T> {
    type Output = Node<T>;
    fn index(&self, id: NodeId) -> &Node<T> {
        match self.slots[id.index()] {
            Some(ref node) => node,
            None => panic!("access to released node {:?}", id),
        }
    }
}

impl<T: Element> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots[id.index()] {
            Some(ref mut node) => node,
            None => panic!("access to released node {:?}", id),
        }
    }
}
