use crate::{
    cpu, DType, Enforcer, InvariantError, RVec, Shape, Slice, SliceSpec, Storage, StridedIndex,
    Strides, TensorDType, TensorId, TensorOp,
};

use derive_new::new;
use std::sync::Arc;

/// Where a tensor's elements live inside its storage.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct StorageView {
    shape: Shape,
    strides: Strides,
    offset: usize,
}

impl StorageView {
    /// Dense row-major layout starting at the beginning of the buffer.
    pub fn contiguous(shape: Shape) -> Self {
        let strides = Strides::from(&shape);
        Self::new(shape, strides, 0)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Strides are exactly the dense row-major strides of the shape.
    pub fn is_contiguous(&self) -> bool {
        self.strides == Strides::from(&self.shape)
    }

    /// Buffer offset of the element at `index`.
    ///
    /// Unchecked: `index` must have the view's rank and be in bounds, see
    /// [`Enforcer::check_multi_index`].
    pub fn offset_of(&self, index: &[usize]) -> usize {
        self.offset + self.strides.linear_offset(index)
    }
}

/// A multi-dimensional array of data.
///
/// A tensor is a layout ([`StorageView`]) over a shared [`Storage`]. Slicing
/// produces a new tensor over the same storage without copying, so writes
/// through one handle are visible through every view of the same root until
/// a view is materialized.
pub struct Tensor<T: TensorDType = f64> {
    inner: Arc<Inner<T>>,
}

struct Inner<T: TensorDType> {
    id: TensorId,
    op: TensorOp,
    view: StorageView,
    storage: Storage<T>,
}

impl<T: TensorDType> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TensorDType> Tensor<T> {
    fn new(op: TensorOp, view: StorageView, storage: Storage<T>) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: TensorId::new(),
                op,
                view,
                storage,
            }),
        }
    }

    /// Creates a new tensor from a chunk of data laid out in row-major order.
    pub fn from_data<U: AsRef<[T]>>(data: U, shape: Shape) -> Result<Self, InvariantError> {
        let data = data.as_ref();
        Enforcer::check_backing_len(&shape, data.len())?;
        let storage = Storage::from_slice(data);
        Ok(Self::new(
            TensorOp::Const,
            StorageView::contiguous(shape),
            storage,
        ))
    }

    pub fn id(&self) -> TensorId {
        self.inner.id
    }

    pub fn op(&self) -> &TensorOp {
        &self.inner.op
    }

    pub fn view(&self) -> &StorageView {
        &self.inner.view
    }

    pub fn shape(&self) -> &Shape {
        self.view().shape()
    }

    pub fn strides(&self) -> &Strides {
        self.view().strides()
    }

    pub fn offset(&self) -> usize {
        self.view().offset()
    }

    pub fn rank(&self) -> usize {
        self.view().rank()
    }

    pub fn numel(&self) -> usize {
        self.view().numel()
    }

    pub fn dt(&self) -> DType {
        T::dt()
    }

    /// The shared buffer. Writes through the returned handle are seen by every
    /// tensor aliasing it.
    pub fn storage(&self) -> &Storage<T> {
        &self.inner.storage
    }

    /// Whether this tensor aliases storage owned by another tensor.
    pub fn is_view(&self) -> bool {
        !self.op().is_const()
    }

    pub fn is_contiguous(&self) -> bool {
        self.view().is_contiguous()
    }

    /// Derives a view over the same storage.
    ///
    /// Specs apply to the leading axes in order; the remaining axes are kept
    /// whole. Nothing is copied.
    pub fn slice(&self, specs: &[SliceSpec]) -> Result<Tensor<T>, InvariantError> {
        let specs: RVec<SliceSpec> = specs.iter().copied().collect();
        let slice = Slice::new(self.id(), self.view().clone(), specs);
        let view = slice.compute_view()?;
        Ok(Tensor::new(
            TensorOp::Slice(slice),
            view,
            self.storage().clone(),
        ))
    }

    /// Buffer offsets of every element, in row-major order.
    pub fn iter_offsets(&self) -> StridedIndex {
        StridedIndex::new(self.view())
    }

    /// Returns a tensor holding this tensor's elements in a dense buffer of its own.
    ///
    /// A contiguous tensor that owns its buffer is returned as is. Anything
    /// else is copied, and the copy never observes later writes to the source.
    pub fn materialize(&self) -> Tensor<T> {
        if !self.is_view() && self.is_contiguous() {
            log::trace!("{:?} is already materialized", self.id());
            return self.clone();
        }

        let buffer = cpu::gather(&self.storage().read(), self.view());
        let dst = Tensor::new(
            TensorOp::Const,
            StorageView::contiguous(self.shape().clone()),
            Storage::from(buffer),
        );
        log::debug!(
            "Materialized {:?} {:?} into {:?} ({} elements)",
            self.id(),
            self.shape(),
            dst.id(),
            dst.numel()
        );
        #[cfg(feature = "debug")]
        log::debug!("{:?}: {}", dst.id(), dst.storage().dump(true));
        dst
    }

    pub fn get(&self, index: &[usize]) -> Result<T, InvariantError> {
        Enforcer::check_multi_index(self.shape(), index)?;
        let offset = self.view().offset_of(index);
        Ok(self.storage().read()[offset])
    }

    pub fn set(&self, index: &[usize], value: T) -> Result<(), InvariantError> {
        Enforcer::check_multi_index(self.shape(), index)?;
        let offset = self.view().offset_of(index);
        self.storage().write()[offset] = value;
        Ok(())
    }

    /// Collects the elements into a vector, in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        cpu::gather(&self.storage().read(), self.view()).into_inner()
    }
}

impl<T: TensorDType> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id())
            .field("op", &self.op().name())
            .field("dt", &self.dt())
            .field("shape", self.shape())
            .field("strides", self.strides())
            .field("offset", &self.offset())
            .field("storage", &self.storage().dump(false))
            .finish()
    }
}

impl<T: TensorDType> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
