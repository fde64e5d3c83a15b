//! Business layer errors
//!
//! Uses anyhow for error aggregation with custom error types.

use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Auth errors ===
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Operation not permitted for {role}: {operation}")]
    NotPermitted { role: String, operation: String },

    // === Not found errors ===
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    // === Wrapped errors ===
    #[error("Core error: {0}")]
    Core(#[from] minibank_core::CoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] minibank_persistence::PersistenceError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = anyhow::Result<T>;

impl BusinessError {
    /// Create operation not permitted error
    pub fn not_permitted(role: &str, operation: &str) -> Self {
        Self::NotPermitted {
            role: role.to_string(),
            operation: operation.to_string(),
        }
    }
}
