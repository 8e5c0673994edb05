use crate::grad::NoAutograd;
use super::{DType, WithDType};

impl WithDType for bool {
    const DTYPE: DType = DType::Bool;
    type AutogradMeta = NoAutograd;
}
