use crate::{AutogradMetaT, Error, Result, Storage, TensorOrScalar, WithDType};
use super::Tensor;

impl Tensor<bool> {
    /// Picks `true_val` where the mask is set and `false_val` elsewhere.
    ///
    /// Each side is either a tensor of the mask's shape or a scalar.
    ///
    /// ```rust
    /// use hardtanh_core::Tensor;
    ///
    /// let mask = Tensor::new(&[true, false, true]).unwrap();
    /// let out = mask.if_else(1., &Tensor::new(&[7f64, 8., 9.]).unwrap()).unwrap();
    /// assert_eq!(out.to_vec().unwrap(), [1., 8., 1.]);
    /// ```
    pub fn if_else<T: WithDType>(&self, true_val: impl Into<TensorOrScalar<T>>, false_val: impl Into<TensorOrScalar<T>>) -> Result<Tensor<T>> {
        let true_val = true_val.into();
        let false_val = false_val.into();
        self.check_select_shape(&true_val, "true_val")?;
        self.check_select_shape(&false_val, "false_val")?;

        let mask = self.storage_read()?;
        let output: Vec<T> = match (&true_val, &false_val) {
            (TensorOrScalar::Tensor(tv), TensorOrScalar::Tensor(fv)) => {
                let (tv, fv) = (tv.storage_read()?, fv.storage_read()?);
                mask.data().iter().zip(tv.data()).zip(fv.data())
                    .map(|((&c, &t), &f)| if c { t } else { f })
                    .collect()
            }
            (TensorOrScalar::Tensor(tv), TensorOrScalar::Scalar(f)) => {
                let tv = tv.storage_read()?;
                mask.data().iter().zip(tv.data())
                    .map(|(&c, &t)| if c { t } else { *f })
                    .collect()
            }
            (TensorOrScalar::Scalar(t), TensorOrScalar::Tensor(fv)) => {
                let fv = fv.storage_read()?;
                mask.data().iter().zip(fv.data())
                    .map(|(&c, &f)| if c { *t } else { f })
                    .collect()
            }
            (TensorOrScalar::Scalar(t), TensorOrScalar::Scalar(f)) => {
                mask.data().iter()
                    .map(|&c| if c { *t } else { *f })
                    .collect()
            }
        };
        drop(mask);

        let tv = match &true_val {
            TensorOrScalar::Tensor(t) => Some(t),
            TensorOrScalar::Scalar(_) => None,
        };
        let fv = match &false_val {
            TensorOrScalar::Tensor(t) => Some(t),
            TensorOrScalar::Scalar(_) => None,
        };
        let meta = T::AutogradMeta::on_ifelse_op(self, tv, fv);

        Ok(Tensor::from_storage(Storage::new(output), self.shape(), meta))
    }

    fn check_select_shape<T: WithDType>(&self, value: &TensorOrScalar<T>, who: &'static str) -> Result<()> {
        match value {
            TensorOrScalar::Tensor(t) if t.shape() != self.shape() => {
                Err(Error::ShapeMismatchSelect { mask: self.shape().clone(), got: t.shape().clone(), who })
            }
            _ => Ok(()),
        }
    }
}

impl<T: WithDType> Tensor<T> {
    /// Replaces the elements where `mask` is set with `value`.
    pub fn masked_fill(&self, mask: &Tensor<bool>, value: impl Into<TensorOrScalar<T>>) -> Result<Tensor<T>> {
        mask.if_else(value, self)
    }
}

#[cfg(test)]
mod test {
    use crate::{Result, Tensor};

    #[test]
    fn test_if_else_scalar_values() -> Result<()> {
        let mask = Tensor::new(&[true, false, true, false])?;
        let result = mask.if_else(1f64, 0.)?;
        assert_eq!(result.to_vec()?, [1., 0., 1., 0.]);
        Ok(())
    }

    #[test]
    fn test_if_else_tensor_values() -> Result<()> {
        let mask = Tensor::new(&[[true, false, true], [false, true, false]])?;
        let true_vals = Tensor::new(&[[10f32, 20., 30.], [40., 50., 60.]])?;
        let false_vals = Tensor::new(&[[1f32, 2., 3.], [4., 5., 6.]])?;

        let result = mask.if_else(&true_vals, &false_vals)?;
        assert_eq!(result.dims(), &[2, 3]);
        assert_eq!(result.to_vec()?, [10., 2., 30., 4., 50., 6.]);
        Ok(())
    }

    #[test]
    fn test_if_else_mixed_values() -> Result<()> {
        let mask = Tensor::new(&[true, false, true, false])?;
        let false_vals = Tensor::new(&[100f64, 200., 300., 400.])?;
        let result = mask.if_else(5., &false_vals)?;
        assert_eq!(result.to_vec()?, [5., 200., 5., 400.]);
        Ok(())
    }

    #[test]
    fn test_if_else_shape_mismatch() -> Result<()> {
        let mask = Tensor::new(&[true, false, true])?;
        let true_vals = Tensor::new(&[1f64, 2., 3., 4.])?;
        assert!(mask.if_else(&true_vals, 0.).is_err());
        Ok(())
    }

    #[test]
    fn test_masked_fill() -> Result<()> {
        let xs = Tensor::new(&[-1f64, 2., -3.])?;
        let out = xs.masked_fill(&xs.lt(0.)?, 0.)?;
        assert_eq!(out.to_vec()?, [0., 2., 0.]);
        Ok(())
    }
}
