mod slice;

pub use slice::*;

use crate::TensorId;

/// How a tensor came to exist.
#[derive(Debug, Clone)]
pub enum TensorOp {
    /// Owns its buffer: built from data or produced by materialization.
    Const,
    /// Aliases the buffer of another tensor.
    Slice(Slice),
}

impl TensorOp {
    pub fn name(&self) -> &'static str {
        match self {
            TensorOp::Const => "Const",
            TensorOp::Slice(_) => "Slice",
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, TensorOp::Const)
    }

    /// The tensor this one was derived from, if any.
    pub fn src(&self) -> Option<TensorId> {
        match self {
            TensorOp::Const => None,
            TensorOp::Slice(s) => Some(s.src()),
        }
    }
}
