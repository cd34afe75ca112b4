use crate::{rvec, RVec, Shape};

/// Backing-buffer elements to skip per unit step along each axis.
#[derive(Clone, PartialEq, Eq, Default, Hash)]
pub struct Strides(RVec<usize>);

impl Strides {
    pub fn new(strides: RVec<usize>) -> Self {
        Self(strides)
    }

    pub fn inner(&self) -> &RVec<usize> {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rank(&self) -> usize {
        self.len()
    }

    pub fn push(&mut self, stride: usize) {
        self.0.push(stride);
    }

    /// Linear distance from the base offset to the element at `index`.
    /// Callers check `index` against the shape first.
    pub(crate) fn linear_offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(self.0.len(), index.len());
        self.0.iter().zip(index).map(|(s, i)| s * i).sum()
    }
}

impl std::fmt::Debug for Strides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(first) = self.0.first() else {
            return write!(f, "[]");
        };
        let mut strides = format!("[{}", first);
        for stride in self.0.iter().skip(1) {
            strides.push_str(&format!("x{}", stride));
        }
        write!(f, "{}]", strides)
    }
}

impl std::ops::Index<usize> for Strides {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Dense row-major strides for `shape`. A shape with a zero-length axis
/// addresses nothing, so all of its strides are 0.
impl From<&Shape> for Strides {
    fn from(shape: &Shape) -> Self {
        if shape.is_degenerate() {
            return Self(rvec![0; shape.rank()]);
        }
        let mut strides = rvec![];
        let mut stride = 1;
        for size in shape.inner().iter().rev() {
            strides.push(stride);
            stride *= *size;
        }
        strides.reverse();
        Self(strides)
    }
}

impl From<Vec<usize>> for Strides {
    fn from(strides: Vec<usize>) -> Self {
        Self(strides.into())
    }
}
