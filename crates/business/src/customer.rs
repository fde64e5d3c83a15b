//! Customer operations - deposit, withdraw, purchase
//!
//! CustomerService implements the balance-mutating operations. Each
//! operation validates in the domain, then persists the record and
//! appends the audit line; a domain failure leaves ledger and store
//! untouched.

use crate::error::{BusinessError, BusinessResult};
use crate::services::{OperationReceipt, ServiceContext};
use minibank_core::{Customer, Tier};
use minibank_persistence::AuditKind;
use rust_decimal::Decimal;

/// Read-only view of one customer for display
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub username: String,
    pub customer_number: u64,
    pub balance: Decimal,
    pub level: Tier,
    pub fee: Decimal,
}

impl CustomerSummary {
    pub fn of(customer: &Customer) -> Self {
        Self {
            username: customer.username().to_string(),
            customer_number: customer.customer_number(),
            balance: customer.balance(),
            level: customer.tier(),
            fee: customer.fee(),
        }
    }
}

/// Customer Service - handles deposit, withdraw, purchase operations
pub struct CustomerService<'a> {
    ctx: &'a mut ServiceContext,
}

impl<'a> CustomerService<'a> {
    pub fn new(ctx: &'a mut ServiceContext) -> Self {
        Self { ctx }
    }

    /// Deposit funds into the customer's account
    pub fn deposit(&mut self, username: &str, amount: Decimal) -> BusinessResult<OperationReceipt> {
        let customer = self
            .ctx
            .ledger_mut()
            .find_mut(username)
            .ok_or_else(|| BusinessError::CustomerNotFound(username.to_string()))?;

        customer.deposit(amount).map_err(BusinessError::Core)?;
        let snapshot = customer.clone();

        self.ctx.commit(&snapshot, AuditKind::Deposit, Some(amount))?;
        tracing::info!(username, %amount, balance = %snapshot.balance(), "deposit committed");

        Ok(OperationReceipt {
            username: username.to_string(),
            amount,
            fee_charged: Decimal::ZERO,
            balance_after: snapshot.balance(),
            level: snapshot.tier(),
        })
    }

    /// Withdraw funds from the customer's account (no fee)
    pub fn withdraw(&mut self, username: &str, amount: Decimal) -> BusinessResult<OperationReceipt> {
        let customer = self
            .ctx
            .ledger_mut()
            .find_mut(username)
            .ok_or_else(|| BusinessError::CustomerNotFound(username.to_string()))?;

        customer.withdraw(amount).map_err(BusinessError::Core)?;
        let snapshot = customer.clone();

        self.ctx
            .commit(&snapshot, AuditKind::Withdrawal, Some(amount))?;
        tracing::info!(username, %amount, balance = %snapshot.balance(), "withdrawal committed");

        Ok(OperationReceipt {
            username: username.to_string(),
            amount,
            fee_charged: Decimal::ZERO,
            balance_after: snapshot.balance(),
            level: snapshot.tier(),
        })
    }

    /// Purchase: withdraw `amount` plus the current tier's fee
    pub fn purchase(&mut self, username: &str, amount: Decimal) -> BusinessResult<OperationReceipt> {
        let customer = self
            .ctx
            .ledger_mut()
            .find_mut(username)
            .ok_or_else(|| BusinessError::CustomerNotFound(username.to_string()))?;

        // Fee is resolved from the pre-mutation balance
        let fee = customer.fee();
        customer.purchase(amount).map_err(BusinessError::Core)?;
        let snapshot = customer.clone();

        self.ctx.commit(&snapshot, AuditKind::Purchase, Some(amount))?;
        tracing::info!(username, %amount, %fee, balance = %snapshot.balance(), "purchase committed");

        Ok(OperationReceipt {
            username: username.to_string(),
            amount,
            fee_charged: fee,
            balance_after: snapshot.balance(),
            level: snapshot.tier(),
        })
    }

    /// Summary of one customer for display
    pub fn summary(&self, username: &str) -> BusinessResult<CustomerSummary> {
        let customer = self
            .ctx
            .ledger()
            .find(username)
            .ok_or_else(|| BusinessError::CustomerNotFound(username.to_string()))?;
        Ok(CustomerSummary::of(customer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::ManagerService;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn context_with_alice(balance: Decimal) -> (tempfile::TempDir, ServiceContext) {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();
        ManagerService::new(&mut ctx)
            .create_customer("alice", "secret", balance)
            .unwrap();
        (dir, ctx)
    }

    #[test]
    fn test_deposit_updates_ledger_and_record() {
        let (_dir, mut ctx) = context_with_alice(dec!(500));

        let receipt = CustomerService::new(&mut ctx)
            .deposit("alice", dec!(100))
            .unwrap();
        assert_eq!(receipt.balance_after, dec!(600));
        assert_eq!(receipt.level, Tier::Silver);
        assert_eq!(receipt.fee_charged, Decimal::ZERO);

        // Record on disk reflects the new balance
        let record = ctx.store().load("alice").unwrap();
        assert_eq!(record.balance, dec!(600));
    }

    #[test]
    fn test_withdraw_failure_leaves_record_untouched() {
        let (_dir, mut ctx) = context_with_alice(dec!(50));

        let err = CustomerService::new(&mut ctx)
            .withdraw("alice", dec!(100))
            .unwrap_err();
        assert!(err.to_string().contains("Insufficient funds"));

        assert_eq!(ctx.ledger().find("alice").unwrap().balance(), dec!(50));
        assert_eq!(ctx.store().load("alice").unwrap().balance, dec!(50));
    }

    #[test]
    fn test_purchase_charges_fee_and_moves_tier() {
        let (_dir, mut ctx) = context_with_alice(dec!(10010));

        let receipt = CustomerService::new(&mut ctx)
            .purchase("alice", dec!(100))
            .unwrap();
        assert_eq!(receipt.fee_charged, dec!(10));
        assert_eq!(receipt.balance_after, dec!(9900));
        assert_eq!(receipt.level, Tier::Silver);
    }

    #[test]
    fn test_unknown_customer() {
        let (_dir, mut ctx) = context_with_alice(dec!(500));

        let err = CustomerService::new(&mut ctx)
            .deposit("ghost", dec!(1))
            .unwrap_err();
        assert!(err.to_string().contains("Customer not found"));
    }

    #[test]
    fn test_summary() {
        let (_dir, mut ctx) = context_with_alice(dec!(15000));

        let summary = CustomerService::new(&mut ctx).summary("alice").unwrap();
        assert_eq!(summary.level, Tier::Gold);
        assert_eq!(summary.fee, dec!(10));
        assert_eq!(summary.customer_number, 0);
    }
}
