//! # Customer Module
//!
//! Định nghĩa Customer - khách hàng sở hữu đúng một Account cùng các
//! operations deposit/withdraw/purchase. Mỗi operation validate trước,
//! mutate sau: không bao giờ có partial update quan sát được.

use crate::account::Account;
use crate::error::{CoreError, CoreResult};
use crate::tier::Tier;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Khách hàng trong hệ thống.
///
/// Mỗi Customer:
/// - Sở hữu đúng một Account (exclusive)
/// - Có customer_number do Ledger cấp khi tạo, bắt đầu từ 0
/// - Tier được resolve lại từ số dư tại mỗi lần query
#[derive(Debug, Clone)]
pub struct Customer {
    /// Username - định danh duy nhất
    username: String,
    /// Password - opaque secret, chỉ so sánh bằng
    password: String,
    /// Tài khoản của khách hàng
    account: Account,
    /// Số thứ tự do Ledger cấp
    customer_number: u64,
    /// Thời gian tạo
    created_at: DateTime<Utc>,
}

impl Customer {
    /// Tạo Customer mới.
    ///
    /// `customer_number` do Ledger cấp - không dùng static counter.
    /// Số dư ban đầu âm được Account đưa về 0.
    pub fn new(
        username: &str,
        password: &str,
        initial_balance: Decimal,
        customer_number: u64,
    ) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            account: Account::new(initial_balance),
            customer_number,
            created_at: Utc::now(),
        }
    }

    /// Tạo lại Customer từ trạng thái đã lưu.
    ///
    /// Caller (persistence layer) chịu trách nhiệm validate `balance >= 0`
    /// trước khi gọi - record âm là corruption, không được clamp.
    pub fn restore(
        username: &str,
        password: &str,
        balance: Decimal,
        customer_number: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            account: Account::new(balance),
            customer_number,
            created_at,
        }
    }

    // === Operations ===

    /// Nạp tiền vào tài khoản.
    ///
    /// `amount` phải không âm; deposit 0 là hợp lệ.
    pub fn deposit(&mut self, amount: Decimal) -> CoreResult<()> {
        if amount < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "Deposit amount must be non-negative: {}",
                amount
            )));
        }
        self.account.set_balance(self.account.balance() + amount)
    }

    /// Rút tiền từ tài khoản.
    ///
    /// Withdraw không thu phí tier - chỉ purchase mới thu.
    pub fn withdraw(&mut self, amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "Withdrawal amount must be positive: {}",
                amount
            )));
        }
        let available = self.account.balance();
        if available - amount < Decimal::ZERO {
            return Err(CoreError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        self.account.set_balance(available - amount)
    }

    /// Mua hàng: rút `amount` cộng thêm phí của tier hiện tại.
    ///
    /// Phí được resolve từ số dư TRƯỚC khi trừ tiền.
    pub fn purchase(&mut self, amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "Purchase amount must be positive: {}",
                amount
            )));
        }
        let available = self.account.balance();
        let fee = self.tier().fee();
        if available - amount - fee < Decimal::ZERO {
            return Err(CoreError::InsufficientFunds {
                required: amount + fee,
                available,
            });
        }
        self.account.set_balance(available - amount - fee)
    }

    // === Readers ===

    /// Trả về username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Trả về password (cho persistence và auth layer)
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Trả về số dư hiện tại
    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    /// Tier hiện tại - resolve lại từ số dư mỗi lần gọi
    pub fn tier(&self) -> Tier {
        Tier::from_balance(self.account.balance())
    }

    /// Phí purchase của tier hiện tại
    pub fn fee(&self) -> Decimal {
        self.tier().fee()
    }

    /// Trả về customer number
    pub fn customer_number(&self) -> u64 {
        self.customer_number
    }

    /// Trả về thời gian tạo
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// So sánh credential cho auth layer
    pub fn verify_password(&self, entered: &str) -> bool {
        self.password == entered
    }

    /// Kiểm tra representation invariant: số dư không âm và phí
    /// của tier hiện tại không âm.
    pub fn rep_ok(&self) -> bool {
        self.account.rep_ok() && self.tier().fee() >= Decimal::ZERO
    }

    /// Diagnostic check - trả về `InvariantViolation` khi `rep_ok` fail.
    ///
    /// Không được gọi tự động sau mỗi mutation: arithmetic của các
    /// operations đã giữ invariant by construction.
    pub fn validate(&self) -> CoreResult<()> {
        if self.rep_ok() {
            Ok(())
        } else {
            Err(CoreError::InvariantViolation(format!(
                "customer {} holds negative balance {}",
                self.username,
                self.balance()
            )))
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}, balance: {}, tier: {})",
            self.username,
            self.customer_number,
            self.balance(),
            self.tier()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer(balance: Decimal) -> Customer {
        Customer::new("alice", "secret", balance, 0)
    }

    #[test]
    fn test_customer_creation() {
        let c = customer(dec!(500));
        assert_eq!(c.username(), "alice");
        assert_eq!(c.balance(), dec!(500));
        assert_eq!(c.customer_number(), 0);
        assert_eq!(c.tier(), Tier::Silver);
        assert!(c.rep_ok());
    }

    #[test]
    fn test_negative_initial_balance_clamped() {
        let c = customer(dec!(-50));
        assert_eq!(c.balance(), Decimal::ZERO);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_deposit() {
        let mut c = customer(dec!(500));
        c.deposit(dec!(100)).unwrap();
        assert_eq!(c.balance(), dec!(600));
        assert_eq!(c.tier(), Tier::Silver);
    }

    #[test]
    fn test_deposit_zero_is_valid() {
        let mut c = customer(dec!(500));
        c.deposit(Decimal::ZERO).unwrap();
        assert_eq!(c.balance(), dec!(500));
    }

    #[test]
    fn test_deposit_negative_rejected() {
        let mut c = customer(dec!(500));
        let err = c.deposit(dec!(-1)).unwrap_err();
        assert!(err.is_invalid_amount());
        assert_eq!(c.balance(), dec!(500));
    }

    #[test]
    fn test_withdraw() {
        let mut c = customer(dec!(500));
        c.withdraw(dec!(100)).unwrap();
        assert_eq!(c.balance(), dec!(400));
    }

    #[test]
    fn test_withdraw_charges_no_fee() {
        // Silver fee is 20, but withdraw may drain the account to zero
        let mut c = customer(dec!(100));
        c.withdraw(dec!(100)).unwrap();
        assert_eq!(c.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut c = customer(dec!(50));
        let err = c.withdraw(dec!(100)).unwrap_err();
        assert!(err.is_insufficient_funds());

        // No partial mutation
        assert_eq!(c.balance(), dec!(50));
    }

    #[test]
    fn test_withdraw_non_positive_rejected() {
        let mut c = customer(dec!(500));
        assert!(c.withdraw(Decimal::ZERO).unwrap_err().is_invalid_amount());
        assert!(c.withdraw(dec!(-5)).unwrap_err().is_invalid_amount());
        assert_eq!(c.balance(), dec!(500));
    }

    #[test]
    fn test_purchase_deducts_tier_fee() {
        // Gold (fee 10): 10010 - 100 - 10 = 9900, Silver afterwards
        let mut c = customer(dec!(10010));
        assert_eq!(c.tier(), Tier::Gold);

        c.purchase(dec!(100)).unwrap();
        assert_eq!(c.balance(), dec!(9900));
        assert_eq!(c.tier(), Tier::Silver);
    }

    #[test]
    fn test_purchase_platinum_is_free() {
        let mut c = customer(dec!(20000));
        c.purchase(dec!(100)).unwrap();
        assert_eq!(c.balance(), dec!(19900));
    }

    #[test]
    fn test_purchase_insufficient_funds_includes_fee() {
        // Silver fee 20: 110 - 100 - 20 < 0
        let mut c = customer(dec!(110));
        let err = c.purchase(dec!(100)).unwrap_err();
        match err {
            CoreError::InsufficientFunds {
                required,
                available,
            } => {
                assert_eq!(required, dec!(120));
                assert_eq!(available, dec!(110));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(c.balance(), dec!(110));
    }

    #[test]
    fn test_purchase_exact_balance() {
        // Silver fee 20: 120 - 100 - 20 = 0 is allowed
        let mut c = customer(dec!(120));
        c.purchase(dec!(100)).unwrap();
        assert_eq!(c.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_tier_query_idempotent() {
        let c = customer(dec!(15000));
        assert_eq!(c.tier(), c.tier());
        assert_eq!(c.fee(), c.fee());
    }

    #[test]
    fn test_verify_password() {
        let c = customer(dec!(0));
        assert!(c.verify_password("secret"));
        assert!(!c.verify_password("wrong"));
    }

    #[test]
    fn test_customer_display() {
        let c = customer(dec!(15000));
        assert_eq!(
            format!("{}", c),
            "alice (#0, balance: 15000, tier: gold)"
        );
    }
}
