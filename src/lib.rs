/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! An implicit-key treap: a mutable sequence with `O(log n)` expected time
//! insertion, deletion, point access, range sum/max, range add, range
//! reversal and block moves.
//!
//! Positions are 0-based and ranges are closed (`[l, r]`).
//!
//! ```
//! use implicit_treap::Treap;
//!
//! let mut t = Treap::build_with_seed(vec![1i32, 2, 3, 4, 5], 233);
//! t.reverse(1, 3).unwrap();
//! assert_eq!(t.to_vec(), [1, 4, 3, 2, 5]);
//! assert_eq!(t.range_sum(0, 4).unwrap(), 15);
//! t.move_range(0, 1, 4).unwrap();
//! assert_eq!(t.to_vec(), [3, 2, 5, 1, 4]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod arena;
mod element;
mod error;
mod iter;
mod node;
mod raw;
mod serde_impls;


use alloc::vec::Vec;
use core::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use arena::{scaled, Arena, NodeId};
use node::{Link, Node, Tag};

pub use element::Element;
pub use error::{Result, TreapError};
pub use iter::Iter;

/// A sequence stored in an implicit-key treap.
///
/// Node priorities are drawn from the generator `R`, which belongs to the
/// tree. Seed it with [`Treap::with_seed`] for reproducible shapes.
#[derive(Clone)]
pub struct Treap<T: Element, R = StdRng> {
    arena: Arena<T>,
    root: Link,
    rng: R,
}

#[cfg(feature = "std")]
impl<T: Element> Treap<T> {
    /// Empty tree with a generator seeded from the operating system.
    pub fn new() -> Treap<T> {
        Self::with_rng(StdRng::from_entropy())
    }
    pub fn build<I: IntoIterator<Item = T>>(values: I) -> Treap<T> {
        Self::build_with_rng(values, StdRng::from_entropy())
    }
}

#[cfg(feature = "std")]
impl<T: Element> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Treap<T> {
    pub fn with_seed(seed: u64) -> Treap<T> {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
    pub fn build_with_seed<I: IntoIterator<Item = T>>(
        values: I,
        seed: u64,
    ) -> Treap<T> {
        Self::build_with_rng(values, StdRng::seed_from_u64(seed))
    }
}

impl<T: Element, R: RngCore> Treap<T, R> {
    pub fn with_rng(rng: R) -> Treap<T, R> {
        Treap {
            arena: Arena::new(),
            root: None,
            rng,
        }
    }

    /// Build a tree holding `values` in order. Runs in linear time.
    pub fn build_with_rng<I: IntoIterator<Item = T>>(
        values: I,
        rng: R,
    ) -> Treap<T, R> {
        let mut treap = Self::with_rng(rng);
        treap.extend(values);
        treap
    }

    fn new_node(&mut self, value: T) -> NodeId {
        let priority = self.rng.next_u64();
        self.arena.alloc(Node::new(value, priority))
    }

    /// Insert `value` so that it ends up at position `pos`.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<()> {
        let len = self.len();
        if pos > len {
            return Err(TreapError::PositionOutOfBounds { pos, len });
        }
        let (l, r) = self.arena.split(self.root.take(), pos);
        let x = self.new_node(value);
        self.root = self.arena.merge3(l, Some(x), r);
        Ok(())
    }

    pub fn push_back(&mut self, value: T) {
        let x = self.new_node(value);
        self.root = self.arena.merge(self.root, Some(x));
    }
}

impl<T: Element, R> Treap<T, R> {
    pub fn len(&self) -> usize {
        self.arena.size(self.root)
    }
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    fn check_pos(&self, pos: usize) -> Result<()> {
        let len = self.len();
        if pos < len {
            Ok(())
        } else {
            Err(TreapError::PositionOutOfBounds { pos, len })
        }
    }
    fn check_range(&self, l: usize, r: usize) -> Result<()> {
        let len = self.len();
        if l <= r && r < len {
            Ok(())
        } else {
            Err(TreapError::InvalidRange {
                start: l,
                end: r,
                len,
            })
        }
    }

    /// Detach `[l, r]`, run `f` on its root, and put everything back.
    /// The range must already be validated.
    fn with_range<U>(
        &mut self,
        l: usize,
        r: usize,
        f: impl FnOnce(&mut Arena<T>, NodeId) -> U,
    ) -> U {
        let (a, c) = self.arena.split(self.root.take(), r + 1);
        let (a, b) = self.arena.split(a, l);
        let mid = match b {
            Some(mid) => mid,
            None => unreachable!("validated range [{}, {}] is empty", l, r),
        };
        let ret = f(&mut self.arena, mid);
        self.root = self.arena.merge3(a, b, c);
        ret
    }

    /// Remove the element at `pos` and return it.
    pub fn erase(&mut self, pos: usize) -> Result<T> {
        self.check_pos(pos)?;
        let (l, rest) = self.arena.split(self.root.take(), pos);
        let (mid, r) = self.arena.split(rest, 1);
        self.root = self.arena.merge(l, r);
        let mid = match mid {
            Some(mid) => mid,
            None => unreachable!("position {} vanished during split", pos),
        };
        Ok(self.arena.release(mid).value)
    }

    pub fn get(&self, pos: usize) -> Result<T> {
        self.check_pos(pos)?;
        match self.arena.kth(self.root, pos) {
            Some(value) => Ok(value),
            None => unreachable!("position {} not found in tree", pos),
        }
    }

    /// Overwrite the element at `pos`, returning the previous value.
    pub fn set(&mut self, pos: usize, value: T) -> Result<T> {
        self.check_pos(pos)?;
        Ok(self.with_range(pos, pos, |arena, x| {
            let old = core::mem::replace(&mut arena[x].value, value);
            arena.pull(x);
            old
        }))
    }

    pub fn range_sum(&mut self, l: usize, r: usize) -> Result<T::Sum> {
        self.check_range(l, r)?;
        Ok(self.with_range(l, r, |arena, x| arena[x].sum))
    }

    pub fn range_max(&mut self, l: usize, r: usize) -> Result<T> {
        self.check_range(l, r)?;
        Ok(self.with_range(l, r, |arena, x| arena[x].max))
    }

    /// Reverse `[l, r]`. The reversal is recorded on the root of the range
    /// and carried out lazily by later descents.
    pub fn reverse(&mut self, l: usize, r: usize) -> Result<()> {
        self.check_range(l, r)?;
        self.with_range(l, r, |arena, x| arena.apply(x, Tag::reverse()));
        Ok(())
    }

    /// Add `delta` to every element of `[l, r]`.
    pub fn range_add(&mut self, l: usize, r: usize, delta: T) -> Result<()> {
        self.check_range(l, r)?;
        self.with_range(l, r, |arena, x| arena.apply(x, Tag::add(delta)));
        Ok(())
    }

    /// Cut `[l, r]` out and paste it back so that it starts at `pos`.
    ///
    /// When `pos > r` and the block does not fit at `pos`, it is placed at
    /// the end of the sequence. A `pos` inside `[l, r]` leaves the sequence
    /// unchanged.
    pub fn move_range(&mut self, l: usize, r: usize, pos: usize) -> Result<()> {
        self.check_range(l, r)?;
        let len = self.len();
        if pos >= len {
            return Err(TreapError::MoveTargetOutOfBounds { pos, len });
        }
        if l <= pos && pos <= r {
            return Ok(());
        }
        let block = r - l + 1;
        let root = self.root.take();
        self.root = if pos < l {
            // P[0, pos) Q[pos, l) B[l, r] R -> P B Q R
            let (p, rest) = self.arena.split(root, pos);
            let (q, rest) = self.arena.split(rest, l - pos);
            let (b, tail) = self.arena.split(rest, block);
            let pb = self.arena.merge(p, b);
            self.arena.merge3(pb, q, tail)
        } else {
            // P[0, l) B[l, r] Q R -> P Q B R
            let (p, rest) = self.arena.split(root, l);
            let (b, rest) = self.arena.split(rest, block);
            let qlen = (pos - l).min(len - r - 1);
            let (q, tail) = self.arena.split(rest, qlen);
            let pq = self.arena.merge(p, q);
            self.arena.merge3(pq, b, tail)
        };
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    // Returns the size of the subtree.
    fn check_sanity_subtree(&self, x: NodeId) -> usize {
        let node = &self.arena[x];
        let mut size = 1;
        let mut sum = node.value.widen();
        let mut max = node.value;
        for c in node.c.into_iter().flatten() {
            let child = &self.arena[c];
            assert!(node.priority >= child.priority);
            let csize = self.check_sanity_subtree(c);
            size += csize;
            // The pending tag of `x` is not part of the child yet
            match node.tag.add {
                Some(delta) => {
                    sum = sum + child.sum + scaled(delta, csize);
                    max = max.max(child.max + delta);
                }
                None => {
                    sum = sum + child.sum;
                    max = max.max(child.max);
                }
            }
        }
        assert_eq!(size, node.size);
        assert_eq!(sum, node.sum);
        assert!(max == node.max, "stale subtree max");
        size
    }
    // Only for DEBUG
    pub fn check_sanity(&self) {
        if let Some(root) = self.root {
            self.check_sanity_subtree(root);
        }
    }
}

impl<T: Element, R: RngCore> Extend<T> for Treap<T, R> {
    /// Append `values` by building them as a separate subtree and merging it
    /// at the end.
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let rng = &mut self.rng;
        let tail = self.arena.build(values, || rng.next_u64());
        self.root = self.arena.merge(self.root, tail);
    }
}

#[cfg(feature = "std")]
impl<T: Element> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::build(values)
    }
}

#[cfg(feature = "std")]
impl<T: Element> From<Vec<T>> for Treap<T> {
    fn from(values: Vec<T>) -> Self {
        Self::build(values)
    }
}

impl<'a, T: Element, R> IntoIterator for &'a Treap<T, R> {
    type Item = T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        Iter::new(&self.arena, self.root)
    }
}

impl<T: Element + fmt::Debug, R> fmt::Debug for Treap<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: Element, R, S> PartialEq<Treap<T, S>> for Treap<T, R> {
    fn eq(&self, other: &Treap<T, S>) -> bool {
        self.len() == other.len() && self.into_iter().eq(other)
    }
}

impl<T: Element, R> Eq for Treap<T, R> {}
