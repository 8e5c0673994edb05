use hardtanh_core::{FloatDType, Tensor};
use crate::NnResult;

/// Applies the Leaky ReLU function, element-wise.
///
/// $\text{LeakyReLU}(x) = x$ if $x \ge 0$, else $\text{negative\_slope} * x$
///
/// ## Arguments
///
/// * `xs` - Input tensor.
/// * `negative_slope` - Controls the angle of the negative slope.
pub fn leaky_relu<T: FloatDType>(xs: &Tensor<T>, negative_slope: T) -> NnResult<Tensor<T>> {
    Ok(xs.leaky_relu(negative_slope)?)
}

/// Applies the HardTanh function, element-wise.
///
/// $\text{HardTanh}(x) = \min(\max(x, \text{min\_val}), \text{max\_val})$
pub fn hardtanh<T: FloatDType>(xs: &Tensor<T>, min_val: T, max_val: T) -> NnResult<Tensor<T>> {
    Ok(xs.clamp(min_val, max_val)?)
}

/// Applies the Leaky HardTanh function, element-wise.
///
/// Identity on `[min_val, max_val)`, with a line of slope `min_slope` below
/// `min_val` and a line of slope `max_slope` from `max_val` upward:
///
/// ```text
/// x < max_val:  leaky_relu(x - min_val, min_slope) + min_val
/// otherwise:    (x - max_val) * max_slope + max_val
/// ```
///
/// `NaN` falls in the second branch and stays `NaN`. The output has the
/// shape of `xs` and is differentiable through the tensor autograd.
///
/// ## Arguments
///
/// * `xs` - Input tensor of any shape.
/// * `min_val` - Lower end of the linear region.
/// * `max_val` - Upper end of the linear region, expected to be larger than `min_val`.
/// * `min_slope` - Slope of the region below `min_val`.
/// * `max_slope` - Slope of the region above `max_val`.
pub fn leaky_hardtanh<T: FloatDType>(
    xs: &Tensor<T>,
    min_val: T,
    max_val: T,
    min_slope: T,
    max_slope: T,
) -> NnResult<Tensor<T>> {
    let mask = xs.lt(max_val)?;
    let low = xs.sub(min_val)?.leaky_relu(min_slope)?.add(min_val)?;
    let high = xs.sub(max_val)?.mul(max_slope)?.add(max_val)?;
    Ok(mask.if_else(&low, &high)?)
}
