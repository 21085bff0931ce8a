/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Split, merge and bulk construction over arena links.
//!
//! Both split and merge walk down a single root-to-leaf path. The path is
//! kept on an explicit stack and relinked bottom-up, so a degenerate tree
//! cannot overflow the call stack.

use alloc::vec::Vec;

use crate::arena::{Arena, NodeId};
use crate::node::{Link, Node};
use crate::Element;

impl<T: Element> Arena<T> {
    /// Split `root` into the first `k` elements and the rest.
    ///
    /// `k` must not exceed the size of `root`.
    pub fn split(&mut self, root: Link, mut k: usize) -> (Link, Link) {
        // (node, side the descent continued into); side 0 puts the node in
        // the right part
        let mut path = core::mem::take(&mut self.path);
        let mut next = root;
        while let Some(x) = next {
            self.push(x);
            let lsize = self.size(self[x].c[0]);
            let side = (lsize < k) as usize;
            if side == 1 {
                k -= lsize + 1;
            }
            next = self[x].c[side];
            path.push((x, side));
        }
        let (mut a, mut b) = (None, None);
        while let Some((x, side)) = path.pop() {
            if side == 0 {
                self[x].c[0] = b;
                self.pull(x);
                b = Some(x);
            } else {
                self[x].c[1] = a;
                self.pull(x);
                a = Some(x);
            }
        }
        self.path = path;
        (a, b)
    }

    /// Concatenate `a` and `b`. Every element of `a` must precede every
    /// element of `b`; this is not checked.
    pub fn merge(&mut self, mut a: Link, mut b: Link) -> Link {
        // (node, side of the child that is being replaced)
        let mut path = core::mem::take(&mut self.path);
        let mut cur = loop {
            let (x, y) = match (a, b) {
                (None, rest) | (rest, None) => break rest,
                (Some(x), Some(y)) => (x, y),
            };
            if self[x].priority > self[y].priority {
                self.push(x);
                a = self[x].c[1];
                path.push((x, 1));
            } else {
                self.push(y);
                b = self[y].c[0];
                path.push((y, 0));
            }
        };
        while let Some((x, side)) = path.pop() {
            self[x].c[side] = cur;
            self.pull(x);
            cur = Some(x);
        }
        self.path = path;
        cur
    }

    pub fn merge3(&mut self, a: Link, b: Link, c: Link) -> Link {
        let ab = self.merge(a, b);
        self.merge(ab, c)
    }

    /// Build a heap-ordered tree holding `values` in order, in linear time.
    ///
    /// The right spine of the tree built so far is kept on a stack. A new
    /// node adopts the part of the spine with lower priority as its left
    /// child and becomes the new bottom of the spine.
    pub fn build<I, F>(&mut self, values: I, mut priority: F) -> Link
    where
        I: IntoIterator<Item = T>,
        F: FnMut() -> u64,
    {
        let mut spine: Vec<NodeId> = Vec::new();
        for value in values {
            let x = self.alloc(Node::new(value, priority()));
            let mut adopted = None;
            while let Some(&top) = spine.last() {
                if self[top].priority >= self[x].priority {
                    break;
                }
                spine.pop();
                self.pull(top);
                adopted = Some(top);
            }
            self[x].c[0] = adopted;
            if let Some(&top) = spine.last() {
                self[top].c[1] = Some(x);
            }
            spine.push(x);
        }
        let mut root = None;
        while let Some(x) = spine.pop() {
            self.pull(x);
            root = Some(x);
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::arena::Arena;
    use crate::node::{Link, Tag};

    fn collect(arena: &mut Arena<i32>, link: Link, out: &mut Vec<i32>) {
        if let Some(x) = link {
            arena.push(x);
            let [l, r] = arena[x].c;
            collect(arena, l, out);
            out.push(arena[x].value);
            collect(arena, r, out);
        }
    }

    fn to_vec(arena: &mut Arena<i32>, link: Link) -> Vec<i32> {
        let mut out = Vec::new();
        collect(arena, link, &mut out);
        out
    }

    fn check_heap(arena: &Arena<i32>, link: Link) {
        if let Some(x) = link {
            for c in arena[x].c.into_iter().flatten() {
                assert!(arena[x].priority >= arena[c].priority);
                check_heap(arena, Some(c));
            }
        }
    }

    #[test]
    fn build_keeps_order_and_heap() {
        let mut rng = StdRng::seed_from_u64(233);
        let mut arena = Arena::new();
        let values: Vec<i32> = (0..500).collect();
        let root = arena.build(values.clone(), || rng.gen());
        check_heap(&arena, root);
        assert_eq!(arena.size(root), 500);
        assert_eq!(arena.sum(root), (0..500).sum::<i64>());
        assert_eq!(arena.max(root), 499);
        assert_eq!(to_vec(&mut arena, root), values);
    }

    #[test]
    fn build_empty() {
        let mut arena = Arena::<i32>::new();
        let root = arena.build(Vec::new(), || 0);
        assert!(root.is_none());
        assert_eq!(arena.size(root), 0);
        assert_eq!(arena.max(root), i32::MIN);
    }

    #[test]
    fn split_merge_round_trip() {
        let mut rng = StdRng::seed_from_u64(233);
        let mut arena = Arena::new();
        let values: Vec<i32> = (0..64).map(|x| x * 3 - 50).collect();
        let mut root = arena.build(values.clone(), || rng.gen());
        for k in 0..=values.len() {
            let (a, b) = arena.split(root, k);
            assert_eq!(arena.size(a), k);
            assert_eq!(arena.size(b), values.len() - k);
            check_heap(&arena, a);
            check_heap(&arena, b);
            root = arena.merge(a, b);
            check_heap(&arena, root);
            assert_eq!(to_vec(&mut arena, root), values);
        }
    }

    #[test]
    fn split_merge_reuse_scratch_path() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut arena = Arena::new();
        let root = arena.build(0..1000, || rng.gen());
        let (a, b) = arena.split(root, 500);
        assert!(arena.path.is_empty());
        let cap = arena.path.capacity();
        assert!(cap > 0);
        let root = arena.merge(a, b);
        assert!(arena.path.is_empty());
        let (a, b) = arena.split(root, 250);
        arena.merge(a, b);
        assert!(arena.path.capacity() >= cap);
        assert!(arena.path.is_empty());
    }

    #[test]
    fn split_pushes_pending_reverse() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut arena = Arena::new();
        let root = arena.build(1..=10, || rng.gen());
        let root = root.unwrap();
        arena.apply(root, Tag::reverse());
        let (a, b) = arena.split(Some(root), 4);
        assert_eq!(to_vec(&mut arena, a), [10, 9, 8, 7]);
        assert_eq!(to_vec(&mut arena, b), [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn split_pushes_pending_add() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut arena = Arena::<i32>::new();
        let root = arena.build(1..=6, || rng.gen()).unwrap();
        arena.apply(root, Tag::add(10));
        assert_eq!(arena.sum(Some(root)), 81);
        assert_eq!(arena.max(Some(root)), 16);
        let (a, b) = arena.split(Some(root), 2);
        assert_eq!(arena.sum(a), 23);
        assert_eq!(arena.sum(b), 58);
        assert_eq!(arena.max(a), 12);
    }

    #[test]
    fn merge_with_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut arena = Arena::new();
        let root = arena.build([4, 5], || rng.gen());
        let merged = arena.merge(None, root);
        assert_eq!(merged, root);
        let merged = arena.merge(root, None);
        assert_eq!(merged, root);
        assert_eq!(arena.merge(None, None), None);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut arena = Arena::new();
        let root = arena.build([1, 2, 3], || rng.gen());
        let (a, rest) = arena.split(root, 1);
        let (mid, b) = arena.split(rest, 1);
        let mid = mid.unwrap();
        assert_eq!(arena.release(mid).value, 2);
        let root = arena.merge(a, b);
        assert_eq!(arena.live(), 2);
        let again = arena.build([9], || rng.gen());
        assert_eq!(again, Some(mid));
        let root = arena.merge(root, again);
        assert_eq!(to_vec(&mut arena, root), [1, 3, 9]);
    }
}
