//! Manager operations - create, delete, list customers
//!
//! ManagerService maintains the customer registry. Role checks happen
//! at the presentation boundary; this service assumes the caller is
//! already authorized.

use crate::customer::CustomerSummary;
use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use minibank_core::{CoreError, Customer};
use minibank_persistence::AuditKind;
use rust_decimal::Decimal;

/// Management Service - customer registry operations
pub struct ManagerService<'a> {
    ctx: &'a mut ServiceContext,
}

impl<'a> ManagerService<'a> {
    pub fn new(ctx: &'a mut ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a customer and persist the new record.
    ///
    /// The ordinal comes from the ledger; a negative initial balance is
    /// clamped to zero by the account.
    pub fn create_customer(
        &mut self,
        username: &str,
        password: &str,
        initial_balance: Decimal,
    ) -> BusinessResult<CustomerSummary> {
        // Check first so a duplicate does not burn an ordinal
        if self.ctx.ledger().find(username).is_some() {
            return Err(
                BusinessError::Core(CoreError::CustomerAlreadyExists(username.to_string())).into(),
            );
        }

        let number = self.ctx.ledger_mut().next_customer_number();
        let customer = Customer::new(username, password, initial_balance, number);
        let summary = CustomerSummary::of(&customer);
        let snapshot = customer.clone();

        self.ctx
            .ledger_mut()
            .add(customer)
            .map_err(BusinessError::Core)?;
        self.ctx
            .commit(&snapshot, AuditKind::CustomerCreated, None)?;
        tracing::info!(username, number, "customer created");

        Ok(summary)
    }

    /// Delete a customer and erase the persisted record
    pub fn delete_customer(&mut self, username: &str) -> BusinessResult<()> {
        let removed = self
            .ctx
            .ledger_mut()
            .remove(username)
            .map_err(BusinessError::Core)?;
        self.ctx.store().erase(removed.username())?;
        self.ctx
            .record_audit(AuditKind::CustomerRemoved, removed.username(), None, None)?;
        tracing::info!(username, "customer removed");

        Ok(())
    }

    /// List customers in creation order
    pub fn list_customers(&self) -> Vec<CustomerSummary> {
        self.ctx.ledger().iter().map(CustomerSummary::of).collect()
    }

    /// Show one customer
    pub fn show(&self, username: &str) -> BusinessResult<CustomerSummary> {
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
    use minibank_core::Tier;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_create_customer_persists_record() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();

        let summary = ManagerService::new(&mut ctx)
            .create_customer("alice", "secret", dec!(20000))
            .unwrap();
        assert_eq!(summary.customer_number, 0);
        assert_eq!(summary.level, Tier::Platinum);

        assert!(ctx.store().exists("alice"));
        assert_eq!(ctx.store().load("alice").unwrap().balance, dec!(20000));
    }

    #[test]
    fn test_create_customer_clamps_negative_balance() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();

        let summary = ManagerService::new(&mut ctx)
            .create_customer("alice", "secret", dec!(-50))
            .unwrap();
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();
        let mut manager = ManagerService::new(&mut ctx);

        manager.create_customer("alice", "a", dec!(0)).unwrap();
        let err = manager.create_customer("alice", "b", dec!(0)).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // The rejected create must not burn an ordinal
        let summary = manager.create_customer("bob", "b", dec!(0)).unwrap();
        assert_eq!(summary.customer_number, 1);
    }

    #[test]
    fn test_delete_customer_erases_record() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();

        ManagerService::new(&mut ctx)
            .create_customer("alice", "secret", dec!(100))
            .unwrap();
        ManagerService::new(&mut ctx)
            .delete_customer("alice")
            .unwrap();

        assert!(ctx.ledger().find("alice").is_none());
        assert!(!ctx.store().exists("alice"));
    }

    #[test]
    fn test_delete_unknown_customer_fails() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();

        let err = ManagerService::new(&mut ctx)
            .delete_customer("ghost")
            .unwrap_err();
        assert!(err.to_string().contains("Customer not found"));
    }

    #[test]
    fn test_list_customers_in_creation_order() {
        let dir = tempdir().unwrap();
        let mut ctx = ServiceContext::open(dir.path()).unwrap();
        let mut manager = ManagerService::new(&mut ctx);

        manager.create_customer("carol", "c", dec!(0)).unwrap();
        manager.create_customer("alice", "a", dec!(0)).unwrap();

        let names: Vec<String> = manager
            .list_customers()
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[test]
    fn test_ordinals_survive_restart() {
        let dir = tempdir().unwrap();

        {
            let mut ctx = ServiceContext::open(dir.path()).unwrap();
            ManagerService::new(&mut ctx)
                .create_customer("alice", "a", dec!(0))
                .unwrap();
        }

        let mut ctx = ServiceContext::open(dir.path()).unwrap();
        let summary = ManagerService::new(&mut ctx)
            .create_customer("bob", "b", dec!(0))
            .unwrap();
        assert_eq!(summary.customer_number, 1);
    }
}
