use thiserror::Error;

/// Core error type shared across mockseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A count, range or sample size argument is out of bounds.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A role name outside the known set.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Convenience alias for results returned by mockseed crates.
pub type Result<T> = std::result::Result<T, Error>;
