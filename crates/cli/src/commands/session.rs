//! Login dashboard and status

use anyhow::Result;
use minibank_business::{CustomerService, ManagerService, Role, ServiceContext, Session};
use std::path::Path;

use crate::commands::{account, transaction};

/// Role dashboard shown after `login`
pub fn dashboard(ctx: &mut ServiceContext, user_session: &Session) -> Result<()> {
    match user_session.role() {
        Role::Manager => {
            println!("Logged in as manager.");
            let summaries = ManagerService::new(ctx).list_customers();
            account::print_table(&summaries);
        }
        Role::Customer(username) => {
            let username = username.clone();
            println!("Logged in as customer '{}'.", username);
            let summary = CustomerService::new(ctx).summary(&username)?;
            transaction::print_summary(&summary);
        }
    }
    Ok(())
}

/// Unauthenticated data directory status
pub fn status(data_dir: &Path, ctx: &ServiceContext) -> Result<()> {
    println!("📋 Minibank status");
    println!("   Data dir:    {}", data_dir.display());
    println!("   Customers:   {}", ctx.ledger().len());
    println!("   Audit files: {}", ctx.audit().list_files()?.len());
    Ok(())
}
