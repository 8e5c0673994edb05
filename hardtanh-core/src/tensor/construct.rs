use std::sync::Arc;
use crate::{bail, Error, FloatDType, NumDType, Result, Shape, Storage, StorageArc, WithDType};
use super::{Tensor, TensorId, TensorImpl};

impl<T: WithDType> Tensor<T> {
    /// Creates a new `Tensor` from a scalar, a slice, a nested array or a `Vec`.
    ///
    /// ```rust
    /// use hardtanh_core::Tensor;
    ///
    /// let a = Tensor::new(&[1., 2., 3.]).unwrap();
    /// assert_eq!(a.dims(), &[3]);
    /// ```
    pub fn new<A: ToTensor<T>>(array: A) -> Result<Self> {
        let shape = array.shape()?;
        Ok(Self::constant(array.to_storage()?, shape))
    }

    /// Creates a tensor filled with a constant `value`.
    pub fn full<S: Into<Shape>>(shape: S, value: T) -> Result<Self> {
        let shape = shape.into();
        Ok(Self::constant(Storage::full(value, &shape), shape))
    }

    fn constant<S: Into<Shape>>(storage: Storage<T>, shape: S) -> Self {
        Self::from_storage(storage, shape, T::AutogradMeta::default())
    }

    pub(crate) fn from_storage<S: Into<Shape>>(storage: Storage<T>, shape: S, meta: T::AutogradMeta) -> Self {
        Tensor(Arc::new(TensorImpl {
            id: TensorId::new(),
            storage: StorageArc::new(storage),
            shape: shape.into(),
            meta,
        }))
    }
}

impl<T: NumDType> Tensor<T> {
    pub fn zeros<S: Into<Shape>>(shape: S) -> Result<Self> {
        let shape = shape.into();
        Ok(Self::constant(Storage::zeros(&shape), shape))
    }

    pub fn zeros_like(&self) -> Result<Self> {
        Self::zeros(self.shape())
    }

    pub fn ones<S: Into<Shape>>(shape: S) -> Result<Self> {
        let shape = shape.into();
        Ok(Self::constant(Storage::ones(&shape), shape))
    }

    pub fn ones_like(&self) -> Result<Self> {
        Self::ones(self.shape())
    }

    /// Creates a tensor from a flat row-major `Vec<T>` and an explicit shape.
    ///
    /// ```rust
    /// use hardtanh_core::Tensor;
    ///
    /// let a = Tensor::from_vec(vec![1., 2., 3., 4.], (2, 2)).unwrap();
    /// assert_eq!(a.dims(), &[2, 2]);
    /// assert!(Tensor::<f32>::from_vec(vec![1., 2., 3.], (2, 2)).is_err());
    /// ```
    pub fn from_vec<V: Into<Vec<T>>, S: Into<Shape>>(vec: V, shape: S) -> Result<Self> {
        let vec = vec.into();
        let shape: Shape = shape.into();
        if shape.element_count() != vec.len() {
            Err(Error::ElementSizeMismatch { expected: shape.element_count(), got: vec.len(), op: "from_vec" })?
        }
        Ok(Self::constant(Storage::new(vec), shape))
    }

    /// Creates a tensor with uniformly distributed values in `[min, max)`.
    pub fn rand<S: Into<Shape>>(min: T, max: T, shape: S) -> Result<Self> {
        let shape = shape.into();
        Ok(Self::constant(Storage::rand_uniform(&shape, min, max)?, shape))
    }
}

impl<F: FloatDType> Tensor<F> {
    /// Generates `num` evenly spaced values over `[start, stop)`.
    ///
    /// ```rust
    /// use hardtanh_core::Tensor;
    ///
    /// let a = Tensor::linspace(0.0, 1.0, 4).unwrap();
    /// assert_eq!(a.to_vec().unwrap(), [0.0, 0.25, 0.5, 0.75]);
    /// ```
    pub fn linspace(start: F, stop: F, num: usize) -> Result<Self> {
        if num == 0 {
            bail!("linspace requires at least one sample");
        }
        let step = (stop - start) / F::from_usize(num);
        let vec: Vec<F> = (0..num)
            .map(|i| start + step * F::from_usize(i))
            .collect();
        Ok(Self::constant(Storage::new(vec), num))
    }

    /// Creates a tensor with normally distributed values of the given `mean` and `std`.
    pub fn randn<S: Into<Shape>>(mean: F, std: F, shape: S) -> Result<Self> {
        let shape = shape.into();
        Ok(Self::constant(Storage::rand_normal(&shape, mean, std)?, shape))
    }
}

/// Values a tensor can be built from, carrying both the data and its shape.
pub trait ToTensor<T> {
    fn shape(&self) -> Result<Shape>;
    fn to_storage(self) -> Result<Storage<T>>;
}

impl<D: WithDType> ToTensor<D> for D {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::scalar())
    }

    fn to_storage(self) -> Result<Storage<D>> {
        Ok(Storage::new(vec![self]))
    }
}

impl<S: WithDType, const N: usize> ToTensor<S> for &[S; N] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(N))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.to_vec()))
    }
}

impl<S: WithDType> ToTensor<S> for &[S] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(self.len()))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.to_vec()))
    }
}

impl<S: WithDType, const N1: usize, const N2: usize> ToTensor<S> for &[[S; N2]; N1] {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from((N1, N2)))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self.concat()))
    }
}

impl<S: WithDType, const N1: usize, const N2: usize, const N3: usize> ToTensor<S>
    for &[[[S; N3]; N2]; N1]
{
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from((N1, N2, N3)))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        let vec: Vec<S> = self.iter()
            .flat_map(|plane| plane.iter().flatten().copied())
            .collect();
        Ok(Storage::new(vec))
    }
}

impl<S: WithDType, const N1: usize, const N2: usize, const N3: usize, const N4: usize> ToTensor<S>
    for &[[[[S; N4]; N3]; N2]; N1]
{
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from((N1, N2, N3, N4)))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        let vec: Vec<S> = self.iter()
            .flat_map(|cube| cube.iter().flat_map(|plane| plane.iter().flatten().copied()))
            .collect();
        Ok(Storage::new(vec))
    }
}

impl<S: WithDType> ToTensor<S> for Vec<S> {
    fn shape(&self) -> Result<Shape> {
        Ok(Shape::from(self.len()))
    }

    fn to_storage(self) -> Result<Storage<S>> {
        Ok(Storage::new(self))
    }
}

#[cfg(test)]
mod test {
    use crate::{Result, Shape, Tensor, Var};

    #[test]
    fn test_new_nested() -> Result<()> {
        let s = Tensor::new(2.5f64)?;
        assert!(s.is_scalar());
        assert_eq!(s.to_scalar()?, 2.5);

        let m = Tensor::new(&[[1f32, 2., 3.], [4., 5., 6.]])?;
        assert_eq!(m.dims(), &[2, 3]);
        assert_eq!(m.to_vec()?, [1., 2., 3., 4., 5., 6.]);

        let t = Tensor::new(&[[[[1f64; 2]; 3]; 4]; 5])?;
        assert_eq!(t.shape(), &Shape::from((5, 4, 3, 2)));
        assert_eq!(t.element_count(), 120);
        Ok(())
    }

    #[test]
    fn test_from_vec_mismatch() {
        assert!(Tensor::<f64>::from_vec(vec![1., 2., 3.], (2, 2)).is_err());
    }

    #[test]
    fn test_linspace() -> Result<()> {
        let l = Tensor::<f64>::linspace(-1., 1., 4)?;
        assert_eq!(l.to_vec()?, [-1., -0.5, 0., 0.5]);
        assert!(Tensor::<f64>::linspace(0., 1., 0).is_err());
        Ok(())
    }

    #[test]
    fn test_random() -> Result<()> {
        let u = Tensor::<f32>::rand(-1., 1., (3, 4))?;
        assert!(u.iter()?.all(|v| (-1. ..1.).contains(&v)));

        let n = Tensor::<f64>::randn(0., 1., 16)?;
        assert_eq!(n.dims(), &[16]);
        Ok(())
    }

    #[test]
    fn test_var_requires_grad() -> Result<()> {
        let v = Var::<f64>::new(&[1., 2.])?;
        assert!(v.requires_grad());
        assert!(v.is_leaf());

        let c = Tensor::<f64>::new(&[1., 2.])?;
        assert!(!c.requires_grad());

        let w = Var::<f32>::from_vec(vec![0.; 6], (2, 3))?;
        assert!(w.is_leaf());
        assert!(Var::<f32>::from_vec(vec![0.; 5], (2, 3)).is_err());

        let r = Var::<f64>::randn(0., 1., (4, 2))?;
        assert!(r.requires_grad());
        assert_eq!(r.dims(), &[4, 2]);
        Ok(())
    }
}
