pub mod modules;
pub mod functional;
mod error;

pub use modules::*;
pub use error::*;
