use std::iter::FusedIterator;

use crate::{rvec, RVec, Shape, StorageView, Strides};

/// Steps `positions` to the next multi-index in row-major order.
///
/// The last axis moves fastest; an axis that reaches its extent resets to zero
/// and carries into the one before it. Returns `false` once the carry runs
/// past the first axis, leaving `positions` all zero. A rank 0 index has
/// nowhere to go, so it wraps immediately.
pub fn advance(positions: &mut [usize], shape: &[usize]) -> bool {
    debug_assert_eq!(positions.len(), shape.len());
    for (pos, &dim) in positions.iter_mut().zip(shape).rev() {
        *pos += 1;
        if *pos < dim {
            return true;
        }
        *pos = 0;
    }
    false
}

/// # StridedIndex
///
/// Yields the absolute buffer offset of every element of a view, in
/// row-major order, for any stride pattern. Once `None` has been returned it
/// is returned forever. A used iterator cannot be rewound; build a new one
/// from the view instead.
#[derive(Debug)]
pub struct StridedIndex {
    positions: RVec<usize>,
    shape: Shape,
    strides: Strides,
    offset: usize,
    remaining: usize,
}

impl StridedIndex {
    pub fn new(view: &StorageView) -> Self {
        Self {
            positions: rvec![0; view.rank()],
            shape: view.shape().clone(),
            strides: view.strides().clone(),
            offset: view.offset(),
            remaining: view.numel(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Multi-index of the element the next call to `next` yields.
    pub fn position(&self) -> Option<&[usize]> {
        (!self.is_exhausted()).then_some(self.positions.as_slice())
    }
}

impl Iterator for StridedIndex {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let current = self.offset + self.strides.linear_offset(&self.positions);
        if advance(&mut self.positions, self.shape.inner()) {
            self.remaining -= 1;
        } else {
            self.remaining = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIndex {}

impl FusedIterator for StridedIndex {}
