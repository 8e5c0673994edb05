#[derive(Debug, thiserror::Error)]
pub enum NnError {
    #[error(transparent)]
    Core(#[from] hardtanh_core::Error),

    #[error("invalid configuration: max_val ({max_val}) must be larger than min_val ({min_val})")]
    InvalidConfiguration {
        min_val: f64,
        max_val: f64,
    },
}

pub type NnResult<T> = std::result::Result<T, NnError>;
