//! # Error Module
//!
//! Định nghĩa các domain errors cho Minibank core sử dụng thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi nghiệp vụ cốt lõi, không liên quan đến infrastructure.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Amount errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    // === Customer errors ===
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Customer already exists: {0}")]
    CustomerAlreadyExists(String),

    // === Validation errors ===
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Kiểm tra có phải lỗi invalid amount không
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, CoreError::InvalidAmount(_))
    }

    /// Kiểm tra có phải lỗi insufficient funds không
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::CustomerNotFound(_))
    }
}
