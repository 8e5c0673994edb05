mod construct;
mod iter;
mod arith;
mod condition;
mod reduce;
pub mod display;

pub use construct::ToTensor;
pub use iter::*;
use std::{hash::Hash, sync::{Arc, RwLockReadGuard, RwLockWriteGuard}};
use crate::{AutogradInfo, Error, FloatDType, Op, Result};
use super::{DType, NumDType, Shape, Storage, StorageArc, WithDType};

/// Reference-counted n-d array.
///
/// Cloning a `Tensor` is cheap and yields a handle to the same node of the
/// autograd graph; ops always allocate fresh storage for their output.
#[derive(Clone)]
pub struct Tensor<T: WithDType>(pub(crate) Arc<TensorImpl<T>>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TensorId(usize);

pub struct TensorImpl<T: WithDType> {
    pub(crate) id: TensorId,
    pub(crate) storage: StorageArc<T>,
    pub(crate) shape: Shape,
    pub(crate) meta: T::AutogradMeta,
}

impl TensorId {
    pub fn new() -> Self {
        use std::sync::atomic;
        static COUNTER: atomic::AtomicUsize = atomic::AtomicUsize::new(1);
        Self(COUNTER.fetch_add(1, atomic::Ordering::Relaxed))
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl Default for TensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WithDType> Hash for Tensor<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.0.hash(state);
    }
}

impl<T: WithDType> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.id.0 == other.0.id.0
    }
}

impl<T: WithDType> Eq for Tensor<T> {}

impl<T: WithDType> Tensor<T> {
    pub fn is_scalar(&self) -> bool {
        self.shape().is_scalar()
    }

    pub fn check_scalar(&self) -> Result<()> {
        if !self.is_scalar() {
            Err(Error::NotScalar)?
        } else {
            Ok(())
        }
    }

    pub fn to_scalar(&self) -> Result<T> {
        self.check_scalar()?;
        self.storage_read()?.data().first().copied().ok_or(Error::NotScalar)
    }

    #[inline]
    pub fn storage_read(&self) -> Result<RwLockReadGuard<'_, Storage<T>>> {
        self.0.storage.read("storage_read")
    }

    #[inline]
    pub fn storage_write(&self) -> Result<RwLockWriteGuard<'_, Storage<T>>> {
        self.0.storage.write("storage_write")
    }

    /// Whether both tensors alias the same storage buffer.
    pub fn same_storage(&self, other: &Self) -> bool {
        self.0.storage.ptr_eq(&other.0.storage)
    }
}

impl<T: WithDType> Tensor<T> {
    pub fn id(&self) -> TensorId {
        self.0.id
    }

    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn dims(&self) -> &[usize] {
        self.shape().dims()
    }

    pub fn element_count(&self) -> usize {
        self.shape().element_count()
    }

    pub fn rank(&self) -> usize {
        self.shape().rank()
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        Ok(self.storage_read()?.data().to_vec())
    }
}

impl<T: NumDType> Tensor<T> {
    pub fn allclose(&self, other: &Self, rtol: f64, atol: f64) -> Result<bool> {
        if self.shape() != other.shape() {
            return Ok(false);
        }
        Ok(self.iter()?.zip(other.iter()?).all(|(a, b)| a.close(b, rtol, atol)))
    }
}

impl<T: FloatDType> Tensor<T> {
    /// Returns a tensor sharing this storage but cut off from the autograd graph.
    pub fn detach(&self) -> Self {
        if !self.requires_grad() {
            self.clone()
        } else {
            Self(Arc::new(TensorImpl {
                id: TensorId::new(),
                storage: self.0.storage.clone(),
                shape: self.shape().clone(),
                meta: AutogradInfo::default(),
            }))
        }
    }

    #[inline]
    pub fn requires_grad(&self) -> bool {
        self.0.meta.requires_grad()
    }

    #[inline]
    pub fn set_requires_grad(&self, mode: bool) {
        self.0.meta.set_requires_grad(mode);
    }

    #[inline]
    pub fn op(&self) -> Option<&Op<T>> {
        self.0.meta.op()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.0.meta.is_leaf()
    }
}
