mod float;
mod bool;

use crate::grad::{AutogradInfo, AutogradMetaT};

pub trait WithDType:
    Sized
    + Copy
    + std::cmp::PartialOrd
    + std::cmp::PartialEq
    + std::fmt::Display
    + std::fmt::Debug
    + 'static
    + Send
    + Sync
{
    const DTYPE: DType;
    type AutogradMeta: AutogradMetaT<Self>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    F32,
    F64,
}

impl DType {
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "boolean"),
            Self::F32 => write!(f, "float32"),
            Self::F64 => write!(f, "float64"),
        }
    }
}

pub trait NumDType:
    WithDType
  + num_traits::Num
  + rand_distr::uniform::SampleUniform
{
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn from_usize(v: usize) -> Self;

    fn minimum(lhs: Self, rhs: Self) -> Self;
    fn maximum(lhs: Self, rhs: Self) -> Self;

    /// `|self - other| <= atol`, or within `rtol` relative to the larger magnitude.
    fn close(self, other: Self, rtol: f64, atol: f64) -> bool;
}

pub trait FloatDType:
    NumDType<AutogradMeta = AutogradInfo<Self>>
    + num_traits::Float
{
    fn relu(self) -> Self;
    fn leaky_relu(self, negative_slope: Self) -> Self;

    fn random_normal_vec(count: usize, mean: Self, std: Self) -> crate::Result<Vec<Self>>;
}
