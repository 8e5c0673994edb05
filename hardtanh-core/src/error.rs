use crate::{Shape, TensorId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Shape Errors ===
    #[error("unexpected element size in {op}, expected: {expected}, got: {got}")]
    ElementSizeMismatch {
        expected: usize,
        got: usize,
        op: &'static str
    },

    #[error("shape mismatch in {op}, lhs: {lhs:?}, rhs: {rhs:?}")]
    ShapeMismatchBinaryOp {
        lhs: Shape,
        rhs: Shape,
        op: &'static str,
    },

    #[error("mask Tensor shape {mask:?} mismatch with {who} shape {got:?}")]
    ShapeMismatchSelect {
        mask: Shape,
        got: Shape,
        who: &'static str,
    },

    #[error("Tensor is not a scalar")]
    NotScalar,

    #[error("rand error because {0}")]
    Rand(String),

    // === Storage ===
    #[error("storage lock poisoned in {op}")]
    StoragePoisoned { op: &'static str },

    // === Autograd ===
    #[error("grad of tensor {0:?} not populated during backward")]
    GradNotPopulated(TensorId),

    /// User generated error message
    #[error("{0}")]
    Msg(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Msg(format!($msg)))?
    };
    ($fmt:literal, $($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($fmt, $($arg)*)))?
    };
}
