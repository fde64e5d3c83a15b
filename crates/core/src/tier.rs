//! # Tier Module
//!
//! Định nghĩa Tier - hạng khách hàng (Silver/Gold/Platinum) suy ra từ
//! số dư tài khoản. Tier là dữ liệu thuần túy: mỗi hạng mang một mức phí
//! purchase cố định, không có behavior riêng.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hạng khách hàng.
///
/// Luôn được resolve lại từ số dư hiện tại tại mỗi lần query -
/// không bao giờ cache qua một mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Số dư dưới 10 000, phí purchase 20
    Silver,
    /// Số dư từ 10 000 đến dưới 20 000, phí purchase 10
    Gold,
    /// Số dư từ 20 000 trở lên, miễn phí purchase
    Platinum,
}

impl Tier {
    /// Xác định tier từ số dư.
    ///
    /// Pure total function trên `balance >= 0`: đúng một tier cho mỗi
    /// số dư, không có trạng thái trung gian.
    pub fn from_balance(balance: Decimal) -> Self {
        if balance < Decimal::from(10_000) {
            Tier::Silver
        } else if balance < Decimal::from(20_000) {
            Tier::Gold
        } else {
            Tier::Platinum
        }
    }

    /// Phí purchase của tier
    pub fn fee(&self) -> Decimal {
        match self {
            Tier::Silver => Decimal::from(20),
            Tier::Gold => Decimal::from(10),
            Tier::Platinum => Decimal::ZERO,
        }
    }

    /// Trả về code string cho record
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }

    /// Parse từ string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silver" => Some(Tier::Silver),
            "gold" => Some(Tier::Gold),
            "platinum" => Some(Tier::Platinum),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
