use crate::{AutogradMetaT, NumDType, ReduceOp, Result, Shape, Storage, Tensor};

impl<T: NumDType> Tensor<T> {
    /// Sum of every element, as a rank-0 tensor.
    pub fn sum_all(&self) -> Result<Self> {
        let sum = self.iter()?.fold(T::zero(), |acc, v| acc + v);
        let meta = T::AutogradMeta::on_reduce_all_op(self, ReduceOp::Sum);
        Ok(Self::from_storage(Storage::new(vec![sum]), Shape::scalar(), meta))
    }

    /// Arithmetic mean of every element, as a rank-0 tensor.
    ///
    /// The mean of an empty tensor is `0 / 0`.
    pub fn mean_all(&self) -> Result<Self> {
        let sum = self.iter()?.fold(T::zero(), |acc, v| acc + v);
        let mean = sum / T::from_usize(self.element_count());
        let meta = T::AutogradMeta::on_reduce_all_op(self, ReduceOp::Mean);
        Ok(Self::from_storage(Storage::new(vec![mean]), Shape::scalar(), meta))
    }
}

impl Tensor<bool> {
    pub fn all(&self) -> Result<bool> {
        Ok(self.iter()?.all(|a| a))
    }

    pub fn any(&self) -> Result<bool> {
        Ok(self.iter()?.any(|a| a))
    }
}

#[cfg(test)]
mod test {
    use crate::{Result, Tensor};

    #[test]
    fn test_sum_mean_all() -> Result<()> {
        let a = Tensor::new(&[[1f64, 2.], [3., 4.]])?;
        let s = a.sum_all()?;
        assert!(s.is_scalar());
        assert_eq!(s.to_scalar()?, 10.);
        assert_eq!(a.mean_all()?.to_scalar()?, 2.5);
        Ok(())
    }

    #[test]
    fn test_all_any() -> Result<()> {
        let a = Tensor::new(&[1f32, 2., 3.])?;
        assert!(a.gt(0.)?.all()?);
        assert!(!a.gt(1.)?.all()?);
        assert!(a.gt(2.)?.any()?);
        assert!(!a.gt(3.)?.any()?);
        Ok(())
    }
}
