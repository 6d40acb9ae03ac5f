use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid page range [{first}, {end}): first page must be >= 1 and end must not precede it")]
    InvalidPageRange { first: u32, end: u32 },
}
