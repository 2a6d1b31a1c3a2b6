//! Error types for boundlru

use std::fmt;

/// Result type alias for boundlru operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
///
/// Once a cache exists none of its operations can fail, so every variant
/// here describes a rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity must hold at least one entry
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(cap) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", cap)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_display() {
        let err = Error::InvalidCapacity(0);
        assert_eq!(err.to_string(), "Invalid capacity: 0 (must be greater than 0)");
    }
}
