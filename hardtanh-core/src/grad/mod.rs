use crate::{FloatDType, Tensor};
mod gradmeta;
mod store;
mod global;
mod backprop;
mod test;
pub use gradmeta::*;
pub use store::*;
pub use global::*;

/// Node of the autograd graph, recorded on the output of an op whose inputs require grad.
#[derive(Clone)]
pub enum Op<T: FloatDType> {
    Binary(Tensor<T>, Tensor<T>, BinaryOp),
    BinaryScalarRhs(Tensor<T>, T, BinaryOp),
    Unary(Tensor<T>, UnaryOp<T>),
    ReduceAll(Tensor<T>, ReduceOp),
    IfElse(Tensor<bool>, Option<Tensor<T>>, Option<Tensor<T>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Sum,
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Mul,
    Sub,
    Div,
    Maximum,
    Minimum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp<T> {
    Neg,
    Abs,
    Relu,
    LeakyRelu(T),
}
