/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Errors reported by [`Treap`](crate::Treap) operations. A call that fails
/// leaves the sequence untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreapError {
    #[error("position {pos} is out of bounds for a sequence of length {len}")]
    PositionOutOfBounds { pos: usize, len: usize },
    #[error("range [{start}, {end}] is invalid for a sequence of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("move target {pos} is out of bounds for a sequence of length {len}")]
    MoveTargetOutOfBounds { pos: usize, len: usize },
}

pub type Result<T, E = TreapError> = core::result::Result<T, E>;
