//! # Record Module
//!
//! Định nghĩa CustomerRecord / AdminRecord - dạng lưu trữ keyed JSON.
//! Mỗi field có tên rõ ràng; thứ tự field trong file không có ý nghĩa.

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use minibank_core::{Customer, Tier};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role string trong customer record
pub const CUSTOMER_ROLE: &str = "customer";
/// Role string trong admin record
pub const MANAGER_ROLE: &str = "manager";

/// Dạng lưu trữ của một Customer.
///
/// `balance` serialize thành String để không mất chính xác qua JSON.
/// `level` chỉ là snapshot để đọc file cho tiện - khi load, tier luôn
/// được resolve lại từ balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub username: String,
    pub password: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub level: Tier,
    pub customer_number: u64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// Tạo record từ Customer
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            username: customer.username().to_string(),
            password: customer.password().to_string(),
            balance: customer.balance(),
            level: customer.tier(),
            customer_number: customer.customer_number(),
            role: CUSTOMER_ROLE.to_string(),
            created_at: customer.created_at(),
        }
    }

    /// Chuyển record thành Customer.
    ///
    /// Balance âm trong file là corruption - trả về `InvalidRecord`,
    /// không clamp như khi mở tài khoản mới.
    pub fn into_customer(self) -> PersistenceResult<Customer> {
        if self.balance < Decimal::ZERO {
            return Err(PersistenceError::invalid_record(
                &self.username,
                &format!("negative balance: {}", self.balance),
            ));
        }
        Ok(Customer::restore(
            &self.username,
            &self.password,
            self.balance,
            self.customer_number,
            self.created_at,
        ))
    }
}

/// Record của manager (`admin/admin.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl AdminRecord {
    /// Tạo admin record mới
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role: MANAGER_ROLE.to_string(),
        }
    }
}
