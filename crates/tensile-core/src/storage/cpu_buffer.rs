use crate::TensorDType;

/// Dense host buffer backing one or more tensors.
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct CPUBuffer<T: TensorDType> {
    data: Vec<T>,
}

impl<T: TensorDType> CPUBuffer<T> {
    pub fn from_slice(data: &[T]) -> Self {
        Self::new(data.to_vec())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    pub fn dump(&self, full: bool) -> String {
        let data = self.as_slice();
        let length = if data.len() < 64 { data.len() } else { 64 };
        if full || data.len() <= 2 * length {
            format!("{:?}", data)
        } else {
            format!("{:?}...{:?}", &data[..length], &data[data.len() - length..])
        }
    }
}

impl<T: TensorDType> std::ops::Index<usize> for CPUBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: TensorDType> std::ops::IndexMut<usize> for CPUBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
