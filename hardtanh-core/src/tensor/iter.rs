use std::sync::RwLockReadGuard;
use crate::{Storage, WithDType};
use super::Tensor;

/// Row-major element iterator, holding a read lock on the storage while alive.
pub struct TensorIter<'a, T> {
    storage: RwLockReadGuard<'a, Storage<T>>,
    index: usize,
}

impl<T: WithDType> Iterator for TensorIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = *self.storage.data().get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.storage.data().len().saturating_sub(self.index);
        (remain, Some(remain))
    }
}

impl<T: WithDType> ExactSizeIterator for TensorIter<'_, T> {}

impl<T: WithDType> Tensor<T> {
    pub fn iter(&self) -> crate::Result<TensorIter<'_, T>> {
        Ok(TensorIter {
            storage: self.storage_read()?,
            index: 0,
        })
    }
}
