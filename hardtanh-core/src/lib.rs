mod shape;
mod dtype;
mod storage;
mod scalar;
mod variable;
mod tensor;
mod grad;
mod error;

pub use shape::*;
pub use dtype::*;
pub use storage::*;
pub use scalar::*;
pub use variable::*;
pub use tensor::*;
pub use grad::*;
pub use error::*;
