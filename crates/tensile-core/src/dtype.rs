#[cfg(feature = "half")]
use half::{bf16, f16};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub enum DType {
    F16,
    BF16,
    F32,
    #[default]
    F64,
}

impl DType {
    pub fn as_str(self) -> &'static str {
        match self {
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element types a tensor buffer can hold.
pub trait TensorDType: Copy + std::fmt::Debug + PartialEq + 'static + Send + Sync {
    fn dt() -> DType;
}

macro_rules! map_type {
    ($t:ty, $v:ident) => {
        impl TensorDType for $t {
            fn dt() -> DType {
                DType::$v
            }
        }
    };
}

map_type!(f32, F32);
map_type!(f64, F64);
#[cfg(feature = "half")]
map_type!(f16, F16);
#[cfg(feature = "half")]
map_type!(bf16, BF16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_mapping() {
        assert_eq!(f32::dt(), DType::F32);
        assert_eq!(f64::dt(), DType::F64);
        assert_eq!(DType::default(), DType::F64);
        assert_eq!(DType::F32.to_string(), "f32");
    }
}
