use paste::paste;
use crate::{AutogradMetaT, BinaryOp, CmpOp, Error, FloatDType, NumDType, Result, Shape, Storage, TensorOrScalar, UnaryOp, WithDType};
use super::Tensor;

//////////////////////////////////////////////////////////////////////////////
///        Binary Op with Tensor and Tensor / scalar
//////////////////////////////////////////////////////////////////////////////

impl<T: WithDType> Tensor<T> {
    fn same_shape_binary_op(&self, rhs: &Self, op: &'static str) -> Result<Shape> {
        let lhs = self.shape();
        let rhs = rhs.shape();
        if lhs != rhs {
            Err(Error::ShapeMismatchBinaryOp {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
                op,
            })?
        } else {
            Ok(lhs.clone())
        }
    }

    fn compute_binary_op<U, F>(lhs: &Tensor<T>, rhs: &Tensor<T>, mut f: F) -> Result<Storage<U>>
    where
        U: WithDType,
        F: FnMut(T, T) -> U,
    {
        let lhs_storage = lhs.storage_read()?;
        let rhs_storage = rhs.storage_read()?;
        let output: Vec<U> = lhs_storage.data().iter()
            .zip(rhs_storage.data())
            .map(|(&l, &r)| f(l, r))
            .collect();
        Ok(Storage::new(output))
    }

    fn compute_binary_scalar_rhs_op<U, F>(lhs: &Tensor<T>, rhs: T, mut f: F) -> Result<Storage<U>>
    where
        U: WithDType,
        F: FnMut(T, T) -> U,
    {
        let lhs_storage = lhs.storage_read()?;
        let output: Vec<U> = lhs_storage.data().iter()
            .map(|&l| f(l, rhs))
            .collect();
        Ok(Storage::new(output))
    }

    fn binary_op<U, F>(lhs: &Tensor<T>, rhs: &Tensor<T>, f: F, meta: impl FnOnce() -> U::AutogradMeta, op_name: &'static str) -> Result<Tensor<U>>
    where
        U: WithDType,
        F: FnMut(T, T) -> U,
    {
        let shape = lhs.same_shape_binary_op(rhs, op_name)?;
        let storage = Self::compute_binary_op(lhs, rhs, f)?;
        Ok(Tensor::<U>::from_storage(storage, shape, meta()))
    }

    fn binary_scalar_rhs_op<U, F>(lhs: &Tensor<T>, rhs: T, f: F, meta: U::AutogradMeta) -> Result<Tensor<U>>
    where
        U: WithDType,
        F: FnMut(T, T) -> U,
    {
        let storage = Self::compute_binary_scalar_rhs_op(lhs, rhs, f)?;
        Ok(Tensor::<U>::from_storage(storage, lhs.shape(), meta))
    }
}

macro_rules! binary_op_impl {
    ($fn_name:ident) => {
        paste! {
            pub fn [< $fn_name _tensor >](&self, rhs: &Self) -> Result<Self> {
                let meta = || T::AutogradMeta::on_binary_op(self, rhs, BinaryOp::[< $fn_name:camel >]);
                Self::binary_op(self, rhs, T::$fn_name, meta, stringify!($fn_name))
            }

            pub fn [< $fn_name _scalar >](&self, rhs: T) -> Result<Self> {
                let meta = T::AutogradMeta::on_binary_scalar_rhs_op(self, rhs, BinaryOp::[< $fn_name:camel >]);
                Self::binary_scalar_rhs_op(self, rhs, T::$fn_name, meta)
            }

            pub fn $fn_name(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Self> {
                match rhs.into() {
                    TensorOrScalar::Tensor(t) => self.[< $fn_name _tensor >](&t),
                    TensorOrScalar::Scalar(s) => self.[< $fn_name _scalar >](s),
                }
            }
        }
    };
}

impl<T: NumDType> Tensor<T> {
    binary_op_impl!(add);
    binary_op_impl!(mul);
    binary_op_impl!(sub);
    binary_op_impl!(div);
    binary_op_impl!(minimum);
    binary_op_impl!(maximum);

    /// Limits every element to `[min, max]`.
    pub fn clamp(&self, min: T, max: T) -> Result<Self> {
        self.maximum(min)?.minimum(max)
    }
}

//////////////////////////////////////////////////////////////////////////////
///        Inplace Op, used by gradient accumulators
//////////////////////////////////////////////////////////////////////////////

impl<T: NumDType> Tensor<T> {
    fn binary_op_inplace<F>(&self, rhs: &TensorOrScalar<T>, mut f: F, op_name: &'static str) -> Result<()>
    where
        F: FnMut(T, T) -> T,
    {
        match rhs {
            TensorOrScalar::Tensor(rhs) => {
                self.same_shape_binary_op(rhs, op_name)?;
                // Copied first so that `self` and `rhs` may alias one storage.
                let rhs = rhs.to_vec()?;
                let mut lhs_storage = self.storage_write()?;
                lhs_storage.data_mut().iter_mut()
                    .zip(rhs)
                    .for_each(|(l, r)| *l = f(*l, r));
            }
            TensorOrScalar::Scalar(rhs) => {
                let mut lhs_storage = self.storage_write()?;
                lhs_storage.data_mut().iter_mut()
                    .for_each(|l| *l = f(*l, *rhs));
            }
        }
        Ok(())
    }
}

macro_rules! binary_inplace_op_impl {
    ($fn_name:ident) => {
        paste! {
            pub fn [< $fn_name _ >](&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Self> {
                self.binary_op_inplace(&rhs.into(), T::$fn_name, stringify!([< $fn_name _ >]))?;
                Ok(self.clone())
            }
        }
    };
}

impl<T: NumDType> Tensor<T> {
    binary_inplace_op_impl!(add);
    binary_inplace_op_impl!(sub);
}

//////////////////////////////////////////////////////////////////////////////
///        Compare Op
//////////////////////////////////////////////////////////////////////////////

impl<T: NumDType> Tensor<T> {
    pub fn eq(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Eq)
    }

    pub fn ne(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Ne)
    }

    pub fn le(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Le)
    }

    pub fn ge(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Ge)
    }

    pub fn lt(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Lt)
    }

    pub fn gt(&self, rhs: impl Into<TensorOrScalar<T>>) -> Result<Tensor<bool>> {
        self.cmp(rhs, CmpOp::Gt)
    }

    pub fn cmp(&self, rhs: impl Into<TensorOrScalar<T>>, op: CmpOp) -> Result<Tensor<bool>> {
        let f: fn(T, T) -> bool = match op {
            CmpOp::Eq => |a: T, b: T| a == b,
            CmpOp::Ne => |a: T, b: T| a != b,
            CmpOp::Le => |a: T, b: T| a <= b,
            CmpOp::Ge => |a: T, b: T| a >= b,
            CmpOp::Lt => |a: T, b: T| a < b,
            CmpOp::Gt => |a: T, b: T| a > b,
        };
        match rhs.into() {
            TensorOrScalar::Tensor(rhs) => Self::binary_op(self, &rhs, f, Default::default, op.name()),
            TensorOrScalar::Scalar(rhs) => Self::binary_scalar_rhs_op(self, rhs, f, Default::default()),
        }
    }
}

impl CmpOp {
    pub fn name(&self) -> &'static str {
        match self {
            CmpOp::Eq => "eq",
            CmpOp::Ne => "ne",
            CmpOp::Le => "le",
            CmpOp::Ge => "ge",
            CmpOp::Lt => "lt",
            CmpOp::Gt => "gt",
        }
    }
}

impl Tensor<bool> {
    pub fn and(&self, rhs: impl Into<TensorOrScalar<bool>>) -> Result<Tensor<bool>> {
        match rhs.into() {
            TensorOrScalar::Tensor(rhs) => Self::binary_op(self, &rhs, |a, b| a & b, Default::default, "and"),
            TensorOrScalar::Scalar(rhs) => Self::binary_scalar_rhs_op(self, rhs, |a, b| a & b, Default::default()),
        }
    }

    pub fn or(&self, rhs: impl Into<TensorOrScalar<bool>>) -> Result<Tensor<bool>> {
        match rhs.into() {
            TensorOrScalar::Tensor(rhs) => Self::binary_op(self, &rhs, |a, b| a | b, Default::default, "or"),
            TensorOrScalar::Scalar(rhs) => Self::binary_scalar_rhs_op(self, rhs, |a, b| a | b, Default::default()),
        }
    }

    pub fn not(&self) -> Result<Tensor<bool>> {
        self.map(|v| !v)
    }
}

//////////////////////////////////////////////////////////////////////////////
///        Unary Op
//////////////////////////////////////////////////////////////////////////////

impl<T: WithDType> Tensor<T> {
    fn compute_unary_op<U, F>(&self, f: F) -> Result<Storage<U>>
    where
        U: WithDType,
        F: FnMut(T) -> U,
    {
        let storage = self.storage_read()?;
        let output: Vec<U> = storage.data().iter().copied().map(f).collect();
        Ok(Storage::new(output))
    }

    /// Applies `f` to every element. The result is not tracked by autograd.
    pub fn map<F, O>(&self, f: F) -> Result<Tensor<O>>
    where
        O: WithDType,
        F: FnMut(T) -> O,
    {
        let storage = self.compute_unary_op(f)?;
        Ok(Tensor::from_storage(storage, self.shape(), Default::default()))
    }
}

impl<F: FloatDType> Tensor<F> {
    fn float_unary_op(&self, f: impl FnMut(F) -> F, op: UnaryOp<F>) -> Result<Self> {
        let storage = self.compute_unary_op(f)?;
        let meta = F::AutogradMeta::on_unary_op(self, op);
        Ok(Self::from_storage(storage, self.shape(), meta))
    }

    pub fn neg(&self) -> Result<Self> {
        self.float_unary_op(|v| -v, UnaryOp::Neg)
    }

    pub fn abs(&self) -> Result<Self> {
        self.float_unary_op(|v| v.abs(), UnaryOp::Abs)
    }

    pub fn relu(&self) -> Result<Self> {
        self.float_unary_op(F::relu, UnaryOp::Relu)
    }

    /// `x` where `x >= 0`, `negative_slope * x` elsewhere.
    pub fn leaky_relu(&self, negative_slope: F) -> Result<Self> {
        self.float_unary_op(|v| v.leaky_relu(negative_slope), UnaryOp::LeakyRelu(negative_slope))
    }
}
