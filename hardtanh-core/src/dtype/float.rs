use approx::relative_eq;
use rand::rng;
use rand_distr::{Distribution, Normal};
use crate::{Error, Result};
use super::{AutogradInfo, DType, FloatDType, NumDType, WithDType};

macro_rules! float_dtype {
    ($ty:ident, $dtype:ident) => {
        impl WithDType for $ty {
            const DTYPE: DType = DType::$dtype;
            type AutogradMeta = AutogradInfo<$ty>;
        }

        impl NumDType for $ty {
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self.into()
            }

            #[inline]
            fn from_usize(v: usize) -> Self {
                v as $ty
            }

            // NaN on the left propagates, unlike `f32::min`
            #[inline]
            fn minimum(lhs: Self, rhs: Self) -> Self {
                if rhs < lhs { rhs } else { lhs }
            }

            #[inline]
            fn maximum(lhs: Self, rhs: Self) -> Self {
                if rhs > lhs { rhs } else { lhs }
            }

            fn close(self, other: Self, rtol: f64, atol: f64) -> bool {
                relative_eq!(self, other, epsilon = atol as $ty, max_relative = rtol as $ty)
            }
        }

        impl FloatDType for $ty {
            #[inline]
            fn relu(self) -> Self {
                if self > 0.0 { self } else { 0.0 }
            }

            #[inline]
            fn leaky_relu(self, negative_slope: Self) -> Self {
                if self >= 0.0 { self } else { self * negative_slope }
            }

            fn random_normal_vec(count: usize, mean: Self, std: Self) -> Result<Vec<Self>> {
                let normal = Normal::new(mean, std).map_err(|e| Error::Rand(e.to_string()))?;
                let mut rng = rng();
                Ok((0..count).map(|_| normal.sample(&mut rng)).collect())
            }
        }
    };
}

float_dtype!(f32, F32);
float_dtype!(f64, F64);
