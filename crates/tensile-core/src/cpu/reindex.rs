use crate::{CPUBuffer, StorageView, StridedIndex, TensorDType};

/// Copies the elements `view` addresses in `src` into a new dense buffer, in
/// row-major order of the view.
pub(crate) fn gather<T: TensorDType>(src: &CPUBuffer<T>, view: &StorageView) -> CPUBuffer<T> {
    let src = src.as_slice();
    let mut dst = Vec::with_capacity(view.numel());
    dst.extend(StridedIndex::new(view).map(|offset| src[offset]));
    CPUBuffer::new(dst)
}
