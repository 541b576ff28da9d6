use thiserror::Error;

/// Main error type for cuttle operations
#[derive(Error, Debug)]
pub enum CuttleError {
    #[error("field count mismatch: snapshot has {snapshot}, configuration has {configured}")]
    FieldCountMismatch { configured: usize, snapshot: usize },

    #[error("field {position} mismatch: snapshot has {snapshot:?}, configuration has {configured:?}")]
    FieldNameMismatch {
        position: usize,
        configured: String,
        snapshot: String,
    },

    #[error("incompatible snapshot: version {actual}, expected <= {expected}")]
    IncompatibleSnapshot { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cuttle operations
pub type Result<T> = std::result::Result<T, CuttleError>;

impl CuttleError {
    /// Check if this error was raised by a restore-time configuration mismatch
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CuttleError::FieldCountMismatch { .. }
                | CuttleError::FieldNameMismatch { .. }
                | CuttleError::IncompatibleSnapshot { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CuttleError::FieldCountMismatch {
            configured: 2,
            snapshot: 3,
        };
        assert_eq!(
            err.to_string(),
            "field count mismatch: snapshot has 3, configuration has 2"
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert!(CuttleError::IncompatibleSnapshot {
            expected: 1,
            actual: 2
        }
        .is_configuration());
        assert!(
            !CuttleError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x"))
                .is_configuration()
        );
    }
}
