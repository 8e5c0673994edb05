use std::collections::HashMap;
use crate::{Error, FloatDType, NoGradGuard, Result, Tensor, TensorId};
use super::{BinaryOp, GradStore, Op, ReduceOp, UnaryOp};

impl<T: FloatDType> Tensor<T> {
    /// Reverse-mode differentiation from `self`, seeded with ones.
    ///
    /// The returned store keeps the gradients of the leaf variables reachable
    /// from `self`; gradients of intermediate nodes are dropped once consumed.
    pub fn backward(&self) -> Result<GradStore<T>> {
        let _guard = NoGradGuard::new();

        let sorted_nodes = self.sorted_nodes();
        tracing::trace!(nodes = sorted_nodes.len(), root = self.id().value(), "backward");

        let mut grads = GradStore::new();
        grads.insert(self, self.ones_like()?);

        for node in sorted_nodes.iter() {
            let Some(op) = node.op() else {
                continue;
            };
            let grad = grads
                .remove(node)
                .ok_or(Error::GradNotPopulated(node.id()))?;

            match op {
                //=========================================================================================//
                //           Binary
                //=========================================================================================//
                Op::Binary(lhs, rhs, BinaryOp::Add) => {
                    grads.or_insert(lhs)?.add_(&grad)?;
                    grads.or_insert(rhs)?.add_(&grad)?;
                }
                Op::Binary(lhs, rhs, BinaryOp::Sub) => {
                    grads.or_insert(lhs)?.add_(&grad)?;
                    grads.or_insert(rhs)?.sub_(&grad)?;
                }
                Op::Binary(lhs, rhs, BinaryOp::Mul) => {
                    let lhs_grad = grad.mul(rhs)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;

                    let rhs_grad = grad.mul(lhs)?;
                    grads.or_insert(rhs)?.add_(&rhs_grad)?;
                }
                Op::Binary(lhs, rhs, BinaryOp::Div) => {
                    let lhs_grad = grad.div(rhs)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;

                    // d(a / b)/db = -a / b^2
                    let rhs_grad = grad.mul(lhs)?.div(&rhs.mul(rhs)?)?;
                    grads.or_insert(rhs)?.sub_(&rhs_grad)?;
                }
                Op::Binary(lhs, rhs, BinaryOp::Minimum)
                | Op::Binary(lhs, rhs, BinaryOp::Maximum) => {
                    let mask_lhs = (*node).eq(lhs)?.if_else(T::one(), T::zero())?;
                    let mask_rhs = (*node).eq(rhs)?.if_else(T::one(), T::zero())?;

                    // Ties split the gradient evenly.
                    let lhs_grad = mask_lhs.mul(&grad)?.div(&mask_rhs.add(T::one())?)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;

                    let rhs_grad = mask_rhs.mul(&grad)?.div(&mask_lhs.add(T::one())?)?;
                    grads.or_insert(rhs)?.add_(&rhs_grad)?;
                }

                //=========================================================================================//
                //           BinaryScalarRhs
                //=========================================================================================//
                Op::BinaryScalarRhs(lhs, _, BinaryOp::Add)
                | Op::BinaryScalarRhs(lhs, _, BinaryOp::Sub) => {
                    grads.or_insert(lhs)?.add_(&grad)?;
                }
                Op::BinaryScalarRhs(lhs, rhs, BinaryOp::Mul) => {
                    let lhs_grad = grad.mul_scalar(*rhs)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;
                }
                Op::BinaryScalarRhs(lhs, rhs, BinaryOp::Div) => {
                    let lhs_grad = grad.div_scalar(*rhs)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;
                }
                Op::BinaryScalarRhs(lhs, rhs, BinaryOp::Maximum)
                | Op::BinaryScalarRhs(lhs, rhs, BinaryOp::Minimum) => {
                    let mask_lhs = (*node).eq(lhs)?.if_else(T::one(), T::zero())?;
                    let mask_rhs = (*node).eq(*rhs)?.if_else(T::one(), T::zero())?;
                    let lhs_grad = mask_lhs.mul(&grad)?.div(&mask_rhs.add(T::one())?)?;
                    grads.or_insert(lhs)?.add_(&lhs_grad)?;
                }

                //=========================================================================================//
                //           Unary
                //=========================================================================================//
                Op::Unary(arg, UnaryOp::Neg) => {
                    grads.or_insert(arg)?.sub_(&grad)?;
                }
                Op::Unary(arg, UnaryOp::Abs) => {
                    let abs_grad = arg.ge(T::zero())?.if_else(T::one(), -T::one())?;
                    grads.or_insert(arg)?.add_(&grad.mul(&abs_grad)?)?;
                }
                Op::Unary(arg, UnaryOp::Relu) => {
                    let relu_grad = arg.ge(T::zero())?.if_else(T::one(), T::zero())?;
                    grads.or_insert(arg)?.add_(&grad.mul(&relu_grad)?)?;
                }
                Op::Unary(arg, UnaryOp::LeakyRelu(negative_slope)) => {
                    let local_deriv = arg.ge(T::zero())?.if_else(T::one(), *negative_slope)?;
                    grads.or_insert(arg)?.add_(&grad.mul(&local_deriv)?)?;
                }

                //=========================================================================================//
                //           Reduce
                //=========================================================================================//
                Op::ReduceAll(arg, ReduceOp::Sum) => {
                    let grad = Tensor::full(arg.shape(), grad.to_scalar()?)?;
                    grads.or_insert(arg)?.add_(&grad)?;
                }
                Op::ReduceAll(arg, ReduceOp::Mean) => {
                    let n = T::from_usize(arg.element_count());
                    let grad = Tensor::full(arg.shape(), grad.to_scalar()? / n)?;
                    grads.or_insert(arg)?.add_(&grad)?;
                }

                //=========================================================================================//
                //           IfElse
                //=========================================================================================//
                Op::IfElse(mask, tv, fv) => {
                    if let Some(tv) = tv {
                        let masked_grad = mask.if_else(&grad, T::zero())?;
                        grads.or_insert(tv)?.add_(&masked_grad)?;
                    }

                    if let Some(fv) = fv {
                        let masked_grad = mask.if_else(T::zero(), &grad)?;
                        grads.or_insert(fv)?.add_(&masked_grad)?;
                    }
                }
            }
        }

        Ok(grads)
    }

    /// Nodes that lead to a leaf variable, in reverse topological order starting at `self`.
    pub fn sorted_nodes(&self) -> Vec<&Tensor<T>> {
        // The vec of sorted nodes is passed as an owned value rather than a mutable reference
        // to get around some lifetime limitations.
        fn walk<'a, T: FloatDType>(
            node: &'a Tensor<T>,
            nodes: Vec<&'a Tensor<T>>,
            already_seen: &mut HashMap<TensorId, bool>,
        ) -> (bool, Vec<&'a Tensor<T>>) {
            if let Some(&tg) = already_seen.get(&node.id()) {
                return (tg, nodes);
            }
            let mut track_grad = false;
            let mut nodes = if node.is_leaf() {
                track_grad = true;
                nodes
            } else if let Some(op) = node.op() {
                match op {
                    | Op::Binary(lhs, rhs, _)
                    | Op::IfElse(_, Some(lhs), Some(rhs)) => {
                        let (tg, nodes) = walk(lhs, nodes, already_seen);
                        track_grad |= tg;
                        let (tg, nodes) = walk(rhs, nodes, already_seen);
                        track_grad |= tg;
                        nodes
                    }

                    | Op::IfElse(_, None, None) => nodes,

                    | Op::BinaryScalarRhs(node, _, _)
                    | Op::Unary(node, _)
                    | Op::ReduceAll(node, _)
                    | Op::IfElse(_, Some(node), None)
                    | Op::IfElse(_, None, Some(node)) => {
                        let (tg, nodes) = walk(node, nodes, already_seen);
                        track_grad |= tg;
                        nodes
                    }
                }
            } else {
                nodes
            };
            already_seen.insert(node.id(), track_grad);
            if track_grad {
                nodes.push(node);
            }
            (track_grad, nodes)
        }
        let (_tg, mut nodes) = walk(self, vec![], &mut HashMap::new());
        nodes.reverse();
        nodes
    }
}
