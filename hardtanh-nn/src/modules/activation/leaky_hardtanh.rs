use hardtanh_core::{FloatDType, Tensor};
use serde::{Deserialize, Serialize};
use crate::{functional, Module, ModuleInit, NnError, NnResult};

pub const DEFAULT_MIN_VAL: f64 = -1.0;
pub const DEFAULT_MAX_VAL: f64 = 1.0;
pub const DEFAULT_SLOPE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
#[serde(default)]
pub struct LeakyHardtanhConfig {
    pub min_val: f64,
    pub max_val: f64,
    pub min_slope: f64,
    pub max_slope: f64,
}

impl Default for LeakyHardtanhConfig {
    fn default() -> Self {
        Self {
            min_val: DEFAULT_MIN_VAL,
            max_val: DEFAULT_MAX_VAL,
            min_slope: DEFAULT_SLOPE,
            max_slope: DEFAULT_SLOPE,
        }
    }
}

/// Applies the Leaky HardTanh function element-wise.
///
/// ```text
/// LeakyHardTanh(x) = min_slope * (x - min_val) + min_val   if x < min_val
///                    x                                     if min_val <= x < max_val
///                    max_slope * (x - max_val) + max_val   if x >= max_val
/// ```
///
/// Input: any shape. Output: same shape as the input.
///
/// ```rust
/// use hardtanh_core::Tensor;
/// use hardtanh_nn::LeakyHardtanh;
///
/// let m = LeakyHardtanh::<f64>::new(-2., 2., 0.001, 0.001).unwrap();
/// let output = m.forward(&Tensor::randn(0., 1., 2).unwrap()).unwrap();
/// assert_eq!(output.dims(), &[2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeakyHardtanh<T: FloatDType> {
    min_val: T,
    max_val: T,
    min_slope: T,
    max_slope: T,
}

impl<T: FloatDType> ModuleInit<T> for LeakyHardtanh<T> {
    type Config = LeakyHardtanhConfig;
    type Error = NnError;

    fn init(config: &LeakyHardtanhConfig) -> NnResult<Self> {
        let min_val = T::from_f64(config.min_val);
        let max_val = T::from_f64(config.max_val);
        // NaN bounds fail this comparison as well
        if !(max_val > min_val) {
            tracing::warn!(min_val = config.min_val, max_val = config.max_val, "rejecting leaky hardtanh configuration");
            return Err(NnError::InvalidConfiguration { min_val: config.min_val, max_val: config.max_val });
        }

        let module = Self {
            min_val,
            max_val,
            min_slope: T::from_f64(config.min_slope),
            max_slope: T::from_f64(config.max_slope),
        };
        tracing::debug!(
            min_val = config.min_val,
            max_val = config.max_val,
            min_slope = config.min_slope,
            max_slope = config.max_slope,
            "built leaky hardtanh"
        );
        Ok(module)
    }
}

impl<T: FloatDType> LeakyHardtanh<T> {
    pub fn new(min_val: T, max_val: T, min_slope: T, max_slope: T) -> NnResult<Self> {
        Self::init(&LeakyHardtanhConfig::new(
            min_val.to_f64(),
            max_val.to_f64(),
            min_slope.to_f64(),
            max_slope.to_f64(),
        ))
    }

    pub fn forward(&self, input: &Tensor<T>) -> NnResult<Tensor<T>> {
        functional::leaky_hardtanh(input, self.min_val, self.max_val, self.min_slope, self.max_slope)
    }

    pub fn min_val(&self) -> T {
        self.min_val
    }

    pub fn max_val(&self) -> T {
        self.max_val
    }

    pub fn min_slope(&self) -> T {
        self.min_slope
    }

    pub fn max_slope(&self) -> T {
        self.max_slope
    }

    pub fn config(&self) -> LeakyHardtanhConfig {
        LeakyHardtanhConfig::new(
            self.min_val.to_f64(),
            self.max_val.to_f64(),
            self.min_slope.to_f64(),
            self.max_slope.to_f64(),
        )
    }
}

impl<T: FloatDType> Default for LeakyHardtanh<T> {
    fn default() -> Self {
        Self {
            min_val: T::from_f64(DEFAULT_MIN_VAL),
            max_val: T::from_f64(DEFAULT_MAX_VAL),
            min_slope: T::from_f64(DEFAULT_SLOPE),
            max_slope: T::from_f64(DEFAULT_SLOPE),
        }
    }
}

impl<T: FloatDType> Module<T> for LeakyHardtanh<T> {
    fn extra_repr(&self) -> String {
        format!(
            "min_val={}, max_val={}, min_slope={}, max_slope={}",
            self.min_val, self.max_val, self.min_slope, self.max_slope
        )
    }
}

#[cfg(test)]
mod test {
    use hardtanh_core::{Tensor, Var};
    use crate::{Module, ModuleInit, NnError, NnResult};
    use super::{LeakyHardtanh, LeakyHardtanhConfig, DEFAULT_MAX_VAL, DEFAULT_MIN_VAL, DEFAULT_SLOPE};

    #[test]
    fn test_default_forward() -> NnResult<()> {
        let m = LeakyHardtanh::<f64>::default();
        let ys = m.forward(&Tensor::new(&[-3.0, -1.0, 0.0, 1.0, 3.0])?)?;
        let expected = Tensor::new(&[-1.02, -1.0, 0.0, 1.0, 1.02])?;
        assert!(ys.allclose(&expected, 1e-12, 1e-12)?);
        Ok(())
    }

    #[test]
    fn test_custom_forward() -> NnResult<()> {
        let m = LeakyHardtanh::<f64>::new(-2.0, 2.0, 0.001, 0.001)?;
        let ys = m.forward(&Tensor::new(&[5.0])?)?;
        assert!(ys.allclose(&Tensor::new(&[2.003])?, 1e-12, 1e-12)?);
        Ok(())
    }

    #[test]
    fn test_invalid_configuration() {
        let err = LeakyHardtanh::<f64>::new(2.0, 1.0, 0.01, 0.01).unwrap_err();
        assert!(matches!(err, NnError::InvalidConfiguration { min_val, max_val } if min_val == 2.0 && max_val == 1.0));

        assert!(matches!(
            LeakyHardtanh::<f64>::new(1.0, 1.0, 0.01, 0.01),
            Err(NnError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            LeakyHardtanh::<f32>::new(f32::NAN, 1.0, 0.01, 0.01),
            Err(NnError::InvalidConfiguration { .. })
        ));

        let config = LeakyHardtanhConfig::new(0.0, -1.0, 0.01, 0.01);
        assert!(LeakyHardtanh::<f32>::init(&config).is_err());
    }

    #[test]
    fn test_accessors_and_config() -> NnResult<()> {
        let m = LeakyHardtanh::<f64>::new(-2.0, 3.0, 0.1, 0.2)?;
        assert_eq!(m.min_val(), -2.0);
        assert_eq!(m.max_val(), 3.0);
        assert_eq!(m.min_slope(), 0.1);
        assert_eq!(m.max_slope(), 0.2);
        assert_eq!(m.config(), LeakyHardtanhConfig::new(-2.0, 3.0, 0.1, 0.2));

        let d = LeakyHardtanh::<f64>::default();
        assert_eq!(d.config(), LeakyHardtanhConfig::default());
        assert_eq!(LeakyHardtanh::<f64>::init(&LeakyHardtanhConfig::default())?, d);
        Ok(())
    }

    #[test]
    fn test_config_json() {
        let config: LeakyHardtanhConfig = serde_json::from_str(r#"{"max_val": 2.5}"#).unwrap();
        assert_eq!(config.min_val, DEFAULT_MIN_VAL);
        assert_eq!(config.max_val, 2.5);
        assert_eq!(config.min_slope, DEFAULT_SLOPE);
        assert_eq!(config.max_slope, DEFAULT_SLOPE);

        let config = LeakyHardtanhConfig::new(-0.5, 0.5, 0.0, 0.25);
        let text = serde_json::to_string(&config).unwrap();
        let back: LeakyHardtanhConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);

        let empty: LeakyHardtanhConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LeakyHardtanhConfig::default());
        assert_eq!(LeakyHardtanh::<f64>::init(&empty).unwrap().max_val(), DEFAULT_MAX_VAL);
    }

    #[test]
    fn test_gradient() -> NnResult<()> {
        let m = LeakyHardtanh::<f64>::default();
        let x = Var::<f64>::new(&[-5.0, 0.0])?;
        let grads = m.forward(&x)?.backward()?;
        assert!(grads[&x].allclose(&Tensor::new(&[0.01, 1.0])?, 1e-12, 1e-12)?);
        Ok(())
    }

    #[test]
    fn test_module_surface() {
        let m = LeakyHardtanh::<f64>::default();
        assert_eq!(m.param_count(), 0);
        assert_eq!(m.param_element_count(), 0);
        assert!(m.params().is_empty());
        assert_eq!(LeakyHardtanh::<f64>::module_name(), "LeakyHardtanh");
        assert_eq!(
            m.display().to_string(),
            "LeakyHardtanh(min_val=-1, max_val=1, min_slope=0.01, max_slope=0.01)"
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<LeakyHardtanh<f32>>();
        assert_send_sync::<LeakyHardtanh<f64>>();
    }
}
