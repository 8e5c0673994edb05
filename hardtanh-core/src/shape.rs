use std::fmt;

/// Dimensions of a row-major, contiguous tensor.
///
/// A rank-0 shape (`Shape::scalar()`) holds exactly one element.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn scalar() -> Self {
        Self(vec![])
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.0.iter().product()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, ")")
    }
}

impl From<()> for Shape {
    fn from(_: ()) -> Self {
        Self::scalar()
    }
}

impl From<usize> for Shape {
    fn from(d1: usize) -> Self {
        Self(vec![d1])
    }
}

impl From<&Shape> for Shape {
    fn from(shape: &Shape) -> Self {
        shape.clone()
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

macro_rules! impl_from_tuple {
    ($(($($d:ident),+)),*) => {$(
        impl From<($(impl_from_tuple!(@usize $d),)+)> for Shape {
            #[allow(non_snake_case)]
            fn from(($($d,)+): ($(impl_from_tuple!(@usize $d),)+)) -> Self {
                Self(vec![$($d),+])
            }
        }
    )*};
    (@usize $d:ident) => { usize };
}

impl_from_tuple!(
    (D1),
    (D1, D2),
    (D1, D2, D3),
    (D1, D2, D3, D4),
    (D1, D2, D3, D4, D5)
);

#[cfg(test)]
mod test {
    use super::Shape;

    #[test]
    fn test_scalar_shape() {
        let shape = Shape::scalar();
        assert!(shape.is_scalar());
        assert_eq!(shape.rank(), 0);
        assert_eq!(shape.element_count(), 1);
        assert_eq!(Shape::from(()), shape);
    }

    #[test]
    fn test_from_tuple() {
        let shape = Shape::from((2, 3, 4));
        assert_eq!(shape.dims(), &[2, 3, 4]);
        assert_eq!(shape.element_count(), 24);
        assert_eq!(format!("{}", shape), "(2, 3, 4)");
    }

    #[test]
    fn test_zero_sized_dim() {
        let shape = Shape::from(vec![3, 0]);
        assert_eq!(shape.element_count(), 0);
        assert_eq!(shape.rank(), 2);
    }
}
