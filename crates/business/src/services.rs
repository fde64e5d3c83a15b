//! Service context and operation receipts
//!
//! ServiceContext owns the in-memory Ledger plus the storage
//! collaborators; services borrow it per operation.

use crate::error::BusinessResult;
use minibank_core::{Customer, Ledger, Tier};
use minibank_persistence::{AuditEvent, AuditKind, AuditLog, CustomerRecord, CustomerStore};
use rust_decimal::Decimal;
use std::path::Path;

/// Context for business operations - ledger + storage collaborators
pub struct ServiceContext {
    ledger: Ledger,
    store: CustomerStore,
    audit: AuditLog,
}

impl ServiceContext {
    /// Open the data directory and rehydrate the ledger from persisted
    /// records.
    ///
    /// Corrupt records are skipped with a warning instead of refusing
    /// to start.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> BusinessResult<Self> {
        let base = data_dir.as_ref();
        let store = CustomerStore::new(base)?;
        let audit = AuditLog::new(base.join("audit"))?;

        let mut ledger = Ledger::new();
        for username in store.list_usernames()? {
            match store.load(&username).and_then(|r| r.into_customer()) {
                Ok(customer) => {
                    if let Err(err) = ledger.add(customer) {
                        tracing::warn!(%username, %err, "skipping record");
                    }
                }
                Err(err) => {
                    tracing::warn!(%username, %err, "skipping corrupt record");
                }
            }
        }

        Ok(Self {
            ledger,
            store,
            audit,
        })
    }

    /// Get the ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Get the mutable ledger
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Get the customer store
    pub fn store(&self) -> &CustomerStore {
        &self.store
    }

    /// Get the audit log
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Dual-write helper: persist the customer's record, then append
    /// the audit line. State first, log second.
    pub fn commit(
        &self,
        customer: &Customer,
        kind: AuditKind,
        amount: Option<Decimal>,
    ) -> BusinessResult<()> {
        self.store.persist(&CustomerRecord::from_customer(customer))?;
        self.record_audit(kind, customer.username(), amount, Some(customer.balance()))
    }

    /// Append an audit line without touching any record.
    pub fn record_audit(
        &self,
        kind: AuditKind,
        actor: &str,
        amount: Option<Decimal>,
        balance_after: Option<Decimal>,
    ) -> BusinessResult<()> {
        let mut event = AuditEvent::new(self.audit.next_seq(), kind, actor);
        if let Some(amount) = amount {
            event = event.with_amount(amount);
        }
        if let Some(balance) = balance_after {
            event = event.with_balance_after(balance);
        }
        self.audit.append(&event)?;
        Ok(())
    }
}

/// Result of a committed balance mutation
#[derive(Debug, Clone)]
pub struct OperationReceipt {
    pub username: String,
    pub amount: Decimal,
    pub fee_charged: Decimal,
    pub balance_after: Decimal,
    pub level: Tier,
}
