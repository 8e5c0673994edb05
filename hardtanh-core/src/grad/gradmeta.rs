use std::sync::atomic::{AtomicBool, Ordering};
use crate::{FloatDType, Tensor, WithDType};
use super::{is_grad_enabled, BinaryOp, Op, ReduceOp, UnaryOp};

/// Hook invoked by every op to build the autograd metadata of its output.
pub trait AutogradMetaT<T: WithDType>: Default + Send + Sync {
    fn on_binary_op(lhs: &Tensor<T>, rhs: &Tensor<T>, op: BinaryOp) -> Self;
    fn on_binary_scalar_rhs_op(lhs: &Tensor<T>, rhs: T, op: BinaryOp) -> Self;
    fn on_unary_op(t: &Tensor<T>, op: UnaryOp<T>) -> Self;
    fn on_reduce_all_op(t: &Tensor<T>, op: ReduceOp) -> Self;
    fn on_ifelse_op(mask: &Tensor<bool>, tv: Option<&Tensor<T>>, fv: Option<&Tensor<T>>) -> Self;
}

/// Graph record of a float tensor: the op that produced it, if recorded,
/// and whether gradients flow through it.
pub struct AutogradInfo<T: FloatDType> {
    op: Option<Op<T>>,
    requires_grad: AtomicBool,
}

impl<T: FloatDType> AutogradInfo<T> {
    fn recorded(op: Op<T>) -> Self {
        Self { op: Some(op), requires_grad: AtomicBool::new(true) }
    }

    /// Records `op` only when an input requires grad and grad mode is on.
    fn track(requires_grad: bool, op: impl FnOnce() -> Op<T>) -> Self {
        if requires_grad && is_grad_enabled() {
            Self::recorded(op())
        } else {
            Self::default()
        }
    }

    pub fn op(&self) -> Option<&Op<T>> {
        self.op.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_none() && self.requires_grad()
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad.load(Ordering::Relaxed)
    }

    pub fn set_requires_grad(&self, mode: bool) {
        self.requires_grad.store(mode, Ordering::Relaxed);
    }
}

impl<T: FloatDType> Default for AutogradInfo<T> {
    fn default() -> Self {
        Self { op: None, requires_grad: AtomicBool::new(false) }
    }
}

impl<T: FloatDType> AutogradMetaT<T> for AutogradInfo<T> {
    fn on_binary_op(lhs: &Tensor<T>, rhs: &Tensor<T>, op: BinaryOp) -> Self {
        Self::track(lhs.requires_grad() || rhs.requires_grad(), || {
            Op::Binary(lhs.clone(), rhs.clone(), op)
        })
    }

    fn on_binary_scalar_rhs_op(lhs: &Tensor<T>, rhs: T, op: BinaryOp) -> Self {
        Self::track(lhs.requires_grad(), || Op::BinaryScalarRhs(lhs.clone(), rhs, op))
    }

    fn on_unary_op(t: &Tensor<T>, op: UnaryOp<T>) -> Self {
        Self::track(t.requires_grad(), || Op::Unary(t.clone(), op))
    }

    fn on_reduce_all_op(t: &Tensor<T>, op: ReduceOp) -> Self {
        Self::track(t.requires_grad(), || Op::ReduceAll(t.clone(), op))
    }

    fn on_ifelse_op(mask: &Tensor<bool>, tv: Option<&Tensor<T>>, fv: Option<&Tensor<T>>) -> Self {
        let requires_grad = tv.is_some_and(|t| t.requires_grad()) || fv.is_some_and(|t| t.requires_grad());
        Self::track(requires_grad, || Op::IfElse(mask.clone(), tv.cloned(), fv.cloned()))
    }
}

/// Metadata of dtypes that never take part in differentiation.
#[derive(Default)]
pub struct NoAutograd;

impl<T: WithDType> AutogradMetaT<T> for NoAutograd {
    #[inline]
    fn on_binary_op(_: &Tensor<T>, _: &Tensor<T>, _: BinaryOp) -> Self {
        NoAutograd
    }

    #[inline]
    fn on_binary_scalar_rhs_op(_: &Tensor<T>, _: T, _: BinaryOp) -> Self {
        NoAutograd
    }

    #[inline]
    fn on_unary_op(_: &Tensor<T>, _: UnaryOp<T>) -> Self {
        NoAutograd
    }

    #[inline]
    fn on_reduce_all_op(_: &Tensor<T>, _: ReduceOp) -> Self {
        NoAutograd
    }

    #[inline]
    fn on_ifelse_op(_: &Tensor<bool>, _: Option<&Tensor<T>>, _: Option<&Tensor<T>>) -> Self {
        NoAutograd
    }
}
