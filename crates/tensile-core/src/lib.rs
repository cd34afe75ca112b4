mod cpu;
mod dtype;
mod enforcer;
mod ops;
mod shape;
mod storage;
mod strided_index;
mod strides;
mod tensor;
mod tensor_id;

pub use dtype::*;
pub use enforcer::*;
pub use ops::*;
pub use shape::*;
pub use storage::*;
pub use strided_index::*;
pub use strides::*;
pub use tensor::*;
pub use tensor_id::*;

use smallvec::SmallVec;
pub type RVec<T> = SmallVec<[T; 4]>;

//https://github.com/sonos/tract/blob/main/data/src/macros.rs#L2
#[macro_export]
macro_rules! rvec {
    (@one $x:expr) => (1usize);
    ($elem:expr; $n:expr) => ({
        $crate::RVec::from_elem($elem, $n)
    });
    ($($x:expr),*$(,)*) => ({
        let count = 0usize $(+ $crate::rvec![@one $x])*;
        #[allow(unused_mut)]
        let mut vec = $crate::RVec::new();
        if count <= vec.inline_size() {
            $(vec.push($x);)*
            vec
        } else {
            $crate::RVec::from_vec(vec![$($x,)*])
        }
    });
}

#[macro_export]
macro_rules! shape {
    ($($x:expr),*$(,)*) => ({
        use $crate::rvec;
        $crate::Shape::new(rvec![$($x,)*])
    });
}

/// Builds a list of [`SliceSpec`]s from indices, ranges and `..`.
///
/// ```
/// use tensile::{s, SliceSpec};
/// let specs = s![0, .., 1..3];
/// assert_eq!(specs[0], SliceSpec::Index(0));
/// assert_eq!(specs[1], SliceSpec::Full);
/// assert_eq!(specs[2], SliceSpec::range(1, 3));
/// ```
#[macro_export]
macro_rules! s {
    ($($x:expr),*$(,)*) => ({
        use $crate::rvec;
        let specs: $crate::RVec<$crate::SliceSpec> = rvec![$($crate::SliceSpec::from($x),)*];
        specs
    });
}

pub mod prelude {
    pub use crate::{rvec, s, shape, Shape, SliceSpec, Tensor};
}
