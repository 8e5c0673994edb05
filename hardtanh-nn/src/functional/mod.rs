mod activate;

pub use activate::*;
