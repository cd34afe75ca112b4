use crate::{Enforcer, InvariantError, RVec, Shape, StorageView, Strides, TensorId};
use std::ops::{Range, RangeFull};

/// Restriction applied to a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceSpec {
    /// Keep the whole axis.
    Full,
    /// Pin the axis to one position; the axis is dropped from the result.
    Index(usize),
    /// Keep every `step`th position in `start..end`.
    Range {
        start: usize,
        end: usize,
        step: usize,
    },
}

impl SliceSpec {
    pub fn range(start: usize, end: usize) -> Self {
        SliceSpec::Range {
            start,
            end,
            step: 1,
        }
    }

    pub fn stepped(start: usize, end: usize, step: usize) -> Self {
        SliceSpec::Range { start, end, step }
    }

    /// Whether this spec selects the only element of an axis of length 1.
    fn selects_sole_element(&self) -> bool {
        match *self {
            SliceSpec::Full | SliceSpec::Index(0) => true,
            SliceSpec::Range { start, end, step } => start == 0 && end == 1 && step > 0,
            SliceSpec::Index(_) => false,
        }
    }
}

impl From<usize> for SliceSpec {
    fn from(index: usize) -> Self {
        SliceSpec::Index(index)
    }
}

impl From<Range<usize>> for SliceSpec {
    fn from(range: Range<usize>) -> Self {
        SliceSpec::range(range.start, range.end)
    }
}

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        SliceSpec::Full
    }
}

/// # Slice
///
/// Derives the layout of a view from its source layout. No data is touched:
/// pinned axes fold into the offset and disappear, ranged axes shift the
/// offset and keep (or scale) their stride.
#[derive(derive_new::new, Debug, Clone)]
pub struct Slice {
    src: TensorId,
    src_view: StorageView,
    specs: RVec<SliceSpec>,
}

impl Slice {
    pub fn src(&self) -> TensorId {
        self.src
    }

    pub fn specs(&self) -> &[SliceSpec] {
        &self.specs
    }

    pub fn compute_view(&self) -> Result<StorageView, InvariantError> {
        let src = &self.src_view;
        if src.rank() == 0 {
            return self.compute_scalar_view();
        }
        Enforcer::check_slice_count(src.rank(), self.specs.len())?;

        let mut shape = Shape::default();
        let mut strides = Strides::default();
        let mut offset = src.offset();
        for (axis, (&dim, &stride)) in src.shape().iter().zip(src.strides().iter()).enumerate() {
            match self.specs.get(axis).copied().unwrap_or(SliceSpec::Full) {
                SliceSpec::Full => {
                    shape.push(dim);
                    strides.push(stride);
                }
                SliceSpec::Index(index) => {
                    Enforcer::check_index(axis, index, dim)?;
                    offset += index * stride;
                }
                SliceSpec::Range { start, end, step } => {
                    Enforcer::check_range(axis, start, end, step, dim)?;
                    offset += start * stride;
                    shape.push((end - start).div_ceil(step));
                    strides.push(stride * step);
                }
            }
        }

        let dst = StorageView::new(shape, strides, offset);
        log::trace!("Slice {:?} with {:?}: {:?} -> {:?}", self.src, self.specs, src, dst);
        Ok(dst)
    }

    /// A scalar has no axes left to restrict. Specs that can only mean "the
    /// one element" resolve to the scalar itself; anything else addresses an
    /// axis that does not exist.
    fn compute_scalar_view(&self) -> Result<StorageView, InvariantError> {
        if !self.specs.iter().all(SliceSpec::selects_sole_element) {
            return Err(InvariantError::TooManySlices {
                rank: 0,
                given: self.specs.len(),
            });
        }
        Ok(self.src_view.clone())
    }
}
