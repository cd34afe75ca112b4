use crate::Shape;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Index {index} is out of bounds for axis {axis} with length {dim}.")]
    OutOfBounds {
        axis: usize,
        index: usize,
        dim: usize,
    },
    #[error("Too many slices. Tensor has rank {rank}, got {given}.")]
    TooManySlices { rank: usize, given: usize },
    #[error("Invalid range {start}..{end} (step {step}) on axis {axis}.")]
    InvalidRange {
        axis: usize,
        start: usize,
        end: usize,
        step: usize,
    },
    #[error("Shape mismatch. {shape:?} holds {expected} elements, backing has {actual}.")]
    ShapeMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
    #[error("Rank mismatch. Expected an index of rank {expected}, got {actual}.")]
    RankMismatch { expected: usize, actual: usize },
}

impl InvariantError {
    /// True for every error that reports an index or slice count outside the tensor.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            InvariantError::OutOfBounds { .. } | InvariantError::TooManySlices { .. }
        )
    }
}

/// # Enforcer
///
/// Enforcer owns the preconditions of construction, slicing and element access.
pub struct Enforcer;

impl Enforcer {
    /// A shape whose element count overflows `usize` can never be backed.
    pub fn check_backing_len(shape: &Shape, actual: usize) -> Result<(), InvariantError> {
        if shape.checked_numel() != Some(actual) {
            return Err(InvariantError::ShapeMismatch {
                shape: shape.clone(),
                expected: shape.numel(),
                actual,
            });
        }
        Ok(())
    }

    pub fn check_slice_count(rank: usize, given: usize) -> Result<(), InvariantError> {
        if given > rank {
            return Err(InvariantError::TooManySlices { rank, given });
        }
        Ok(())
    }

    pub fn check_index(axis: usize, index: usize, dim: usize) -> Result<(), InvariantError> {
        if index >= dim {
            return Err(InvariantError::OutOfBounds { axis, index, dim });
        }
        Ok(())
    }

    /// Bounds are checked before ordering, so `5..2` on an axis of length 3
    /// reports the out of bounds start.
    pub fn check_range(
        axis: usize,
        start: usize,
        end: usize,
        step: usize,
        dim: usize,
    ) -> Result<(), InvariantError> {
        if start >= dim {
            return Err(InvariantError::OutOfBounds {
                axis,
                index: start,
                dim,
            });
        }
        if end > dim {
            return Err(InvariantError::OutOfBounds {
                axis,
                index: end,
                dim,
            });
        }
        if start >= end || step == 0 {
            return Err(InvariantError::InvalidRange {
                axis,
                start,
                end,
                step,
            });
        }
        Ok(())
    }

    pub fn check_multi_index(shape: &Shape, index: &[usize]) -> Result<(), InvariantError> {
        if index.len() != shape.rank() {
            return Err(InvariantError::RankMismatch {
                expected: shape.rank(),
                actual: index.len(),
            });
        }
        index
            .iter()
            .zip(shape.iter())
            .enumerate()
            .try_for_each(|(axis, (&i, &dim))| Self::check_index(axis, i, dim))
    }
}
