use std::collections::hash_map::Entry;
use std::{collections::HashMap, ops::Index};
use crate::{FloatDType, Result, Tensor, TensorId};

/// Gradients produced by [`Tensor::backward`], keyed by tensor id.
#[derive(Clone)]
pub struct GradStore<T: FloatDType> {
    grads: HashMap<TensorId, Tensor<T>>,
}

impl<T: FloatDType> GradStore<T> {
    pub fn new() -> Self {
        Self { grads: HashMap::new() }
    }

    pub fn get(&self, tensor: &Tensor<T>) -> Option<&Tensor<T>> {
        self.grads.get(&tensor.id())
    }

    pub fn remove(&mut self, tensor: &Tensor<T>) -> Option<Tensor<T>> {
        self.grads.remove(&tensor.id())
    }

    pub fn insert(&mut self, tensor: &Tensor<T>, grad: Tensor<T>) -> Option<Tensor<T>> {
        self.grads.insert(tensor.id(), grad)
    }

    /// Accumulator for `tensor`, created as zeros of its shape on first use.
    pub fn or_insert(&mut self, tensor: &Tensor<T>) -> Result<&mut Tensor<T>> {
        match self.grads.entry(tensor.id()) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => Ok(slot.insert(tensor.zeros_like()?)),
        }
    }

    pub fn len(&self) -> usize {
        self.grads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }
}

impl<T: FloatDType> Default for GradStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatDType> Index<&Tensor<T>> for GradStore<T> {
    type Output = Tensor<T>;

    fn index(&self, tensor: &Tensor<T>) -> &Self::Output {
        self.get(tensor).expect("no gradient recorded for tensor")
    }
}
