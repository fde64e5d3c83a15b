//! # Account Module
//!
//! Định nghĩa Account - tài khoản với số dư không âm.
//! Account không tự persist; mọi thay đổi đi qua operations của Customer.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tài khoản ngân hàng.
///
/// Invariant: `balance >= 0` tại mọi thời điểm quan sát được.
/// Constructor đưa số dư âm về 0 (chính sách khi mở tài khoản);
/// `set_balance` thì từ chối giá trị âm thay vì tin caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Số dư hiện tại (serialize thành String trong JSON)
    #[serde(with = "rust_decimal::serde::str")]
    balance: Decimal,
}

impl Account {
    /// Tạo Account mới với số dư ban đầu.
    ///
    /// Số dư ban đầu âm được đưa về 0, không báo lỗi cho caller.
    pub fn new(initial_balance: Decimal) -> Self {
        let balance = if initial_balance < Decimal::ZERO {
            Decimal::ZERO
        } else {
            initial_balance
        };
        Self { balance }
    }

    /// Trả về số dư hiện tại
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Đặt số dư mới.
    ///
    /// Trả về `InvalidAmount` nếu `new_balance < 0` - invariant được
    /// enforce ngay tại đây, không phụ thuộc caller pre-validate.
    pub fn set_balance(&mut self, new_balance: Decimal) -> CoreResult<()> {
        if new_balance < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "Balance must be non-negative: {}",
                new_balance
            )));
        }
        self.balance = new_balance;
        Ok(())
    }

    /// Kiểm tra representation invariant: balance >= 0
    pub fn rep_ok(&self) -> bool {
        self.balance >= Decimal::ZERO
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account (balance: {})", self.balance)
    }
}
