//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping IO và serde_json errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === IO errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // === Record errors ===
    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Invalid record for {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Tạo NotFound error
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Tạo InvalidRecord error
    pub fn invalid_record(id: &str, reason: &str) -> Self {
        Self::InvalidRecord {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PersistenceError::not_found("customer", "alice");
        assert_eq!(err.to_string(), "Record not found: customer with id alice");
        assert!(err.is_not_found());

        let err = PersistenceError::invalid_record("bob", "negative balance: -5");
        assert_eq!(
            err.to_string(),
            "Invalid record for bob: negative balance: -5"
        );
        assert!(!err.is_not_found());
    }
}
