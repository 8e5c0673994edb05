mod leaky_hardtanh;

pub use leaky_hardtanh::*;
