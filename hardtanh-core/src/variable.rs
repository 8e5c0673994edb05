use std::marker::PhantomData;
use crate::tensor::ToTensor;
use crate::{FloatDType, Result, Shape, Tensor};

/// Builds leaf tensors that take part in differentiation.
///
/// Every constructor mirrors the constant one on [`Tensor`] and marks the
/// result as requiring grad.
pub struct Var<T: FloatDType>(PhantomData<T>);

impl<T: FloatDType> Var<T> {
    pub fn new<A: ToTensor<T>>(array: A) -> Result<Tensor<T>> {
        Tensor::new(array).map(Self::leaf)
    }

    pub fn from_vec<V: Into<Vec<T>>, S: Into<Shape>>(vec: V, shape: S) -> Result<Tensor<T>> {
        Tensor::from_vec(vec, shape).map(Self::leaf)
    }

    pub fn randn<S: Into<Shape>>(mean: T, std: T, shape: S) -> Result<Tensor<T>> {
        Tensor::randn(mean, std, shape).map(Self::leaf)
    }

    fn leaf(tensor: Tensor<T>) -> Tensor<T> {
        tensor.set_requires_grad(true);
        tensor
    }
}
