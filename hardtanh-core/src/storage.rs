use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rand::rng;
use rand_distr::{Distribution, Uniform};
use crate::{Error, Result};
use super::{FloatDType, NumDType, Shape, WithDType};

/// Flat, row-major element buffer of a tensor.
#[derive(Clone)]
pub struct Storage<T>(Vec<T>);

impl<T: WithDType> Storage<T> {
    pub fn new<D: Into<Vec<T>>>(data: D) -> Self {
        Self(data.into())
    }

    pub fn full(value: T, shape: &Shape) -> Self {
        Self(vec![value; shape.element_count()])
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T: NumDType> Storage<T> {
    pub fn zeros(shape: &Shape) -> Self {
        Self::full(T::zero(), shape)
    }

    pub fn ones(shape: &Shape) -> Self {
        Self::full(T::one(), shape)
    }

    /// Samples uniformly from `[min, max)`.
    pub fn rand_uniform(shape: &Shape, min: T, max: T) -> Result<Self> {
        let uniform = Uniform::new(min, max).map_err(|e| Error::Rand(e.to_string()))?;
        Ok(Self(uniform.sample_iter(rng()).take(shape.element_count()).collect()))
    }
}

impl<F: FloatDType> Storage<F> {
    pub fn rand_normal(shape: &Shape, mean: F, std: F) -> Result<Self> {
        F::random_normal_vec(shape.element_count(), mean, std).map(Self)
    }
}

/// Shared handle on a [`Storage`]; clones alias the same buffer.
#[derive(Clone)]
pub struct StorageArc<T>(pub(crate) Arc<RwLock<Storage<T>>>);

impl<T: WithDType> StorageArc<T> {
    pub fn new(storage: Storage<T>) -> Self {
        Self(Arc::new(RwLock::new(storage)))
    }

    /// Shared access; `op` names the caller in the poisoned-lock error.
    pub fn read(&self, op: &'static str) -> Result<RwLockReadGuard<'_, Storage<T>>> {
        self.0.read().map_err(|_| Error::StoragePoisoned { op })
    }

    pub fn write(&self, op: &'static str) -> Result<RwLockWriteGuard<'_, Storage<T>>> {
        self.0.write().map_err(|_| Error::StoragePoisoned { op })
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
