mod cpu_buffer;

pub use cpu_buffer::*;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::TensorDType;

/// Shared handle to the buffer of a root tensor.
///
/// Cloning the handle aliases the buffer; every view sliced from one root holds
/// a clone. Individual reads and writes are serialized by the lock, but a
/// sequence of operations across aliases is not atomic.
#[derive(Debug)]
pub struct Storage<T: TensorDType> {
    inner: Arc<RwLock<CPUBuffer<T>>>,
}

impl<T: TensorDType> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TensorDType> Storage<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self::from(CPUBuffer::from_slice(data))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, CPUBuffer<T>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CPUBuffer<T>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both handles alias the same buffer.
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn dump(&self, full: bool) -> String {
        self.read().dump(full)
    }
}

impl<T: TensorDType> From<CPUBuffer<T>> for Storage<T> {
    fn from(buffer: CPUBuffer<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(buffer)),
        }
    }
}
