/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::arena::NodeId;
use crate::Element;

pub(crate) type Link = Option<NodeId>;

/// Pending update for the children of a node. The node's own value and
/// aggregates already include it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Tag<T> {
    pub reverse: bool,
    pub add: Option<T>,
}

impl<T> Default for Tag<T> {
    fn default() -> Self {
        Tag {
            reverse: false,
            add: None,
        }
    }
}

impl<T: Element> Tag<T> {
    pub fn reverse() -> Self {
        Tag {
            reverse: true,
            add: None,
        }
    }
    pub fn add(delta: T) -> Self {
        Tag {
            reverse: false,
            add: Some(delta),
        }
    }
    pub fn is_empty(&self) -> bool {
        !self.reverse && self.add.is_none()
    }
    // Reversal and addition commute, so the order of composition does not
    // matter.
    pub fn compose(&mut self, outer: Tag<T>) {
        self.reverse ^= outer.reverse;
        self.add = match (self.add, outer.add) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
    }
    pub fn then(mut self, outer: Tag<T>) -> Self {
        self.compose(outer);
        self
    }
    pub fn apply_value(&self, value: T) -> T {
        match self.add {
            Some(delta) => value + delta,
            None => value,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T: Element> {
    pub c: [Link; 2],
    pub value: T,
    pub priority: u64,
    // Aggregates of the subtree
    pub size: usize,
    pub sum: T::Sum,
    pub max: T,
    pub tag: Tag<T>,
}

impl<T: Element> Node<T> {
    pub fn new(value: T, priority: u64) -> Node<T> {
        Node {
            c: [None, None],
            value,
            priority,
            size: 1,
            sum: value.widen(),
            max: value,
            tag: Tag::default(),
        }
    }
}
