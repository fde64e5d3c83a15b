//! Customer management commands (manager dashboard)

use anyhow::Result;
use minibank_business::{CustomerSummary, ManagerService, ServiceContext};

use crate::CustomerAction;

/// Handle customer subcommands
pub fn handle(ctx: &mut ServiceContext, action: &CustomerAction) -> Result<()> {
    match action {
        CustomerAction::Add {
            username,
            customer_password,
            balance,
        } => {
            let summary =
                ManagerService::new(ctx).create_customer(username, customer_password, *balance)?;
            println!("✅ Created customer:");
            println!("   Username: {}", summary.username);
            println!("   Number:   {}", summary.customer_number);
            println!("   Balance:  {}", summary.balance);
            println!("   Level:    {}", summary.level.as_str());
        }

        CustomerAction::Remove { username } => {
            ManagerService::new(ctx).delete_customer(username)?;
            println!("✅ Removed customer '{}'", username);
        }

        CustomerAction::List => {
            let summaries = ManagerService::new(ctx).list_customers();
            print_table(&summaries);
        }

        CustomerAction::Show { username } => {
            let summary = ManagerService::new(ctx).show(username)?;
            println!("📋 Customer '{}'", summary.username);
            println!("   Number:  {}", summary.customer_number);
            println!("   Balance: {}", summary.balance);
            println!("   Level:   {}", summary.level.as_str());
            println!("   Fee:     {}", summary.fee);
        }
    }

    Ok(())
}

/// Manager dashboard table
pub fn print_table(summaries: &[CustomerSummary]) {
    if summaries.is_empty() {
        println!("No customers found.");
        return;
    }

    println!(
        "{:<16} {:<8} {:>14} {:<10} {:>6}",
        "USERNAME", "NUMBER", "BALANCE", "LEVEL", "FEE"
    );
    println!("{}", "-".repeat(58));
    for summary in summaries {
        println!(
            "{:<16} {:<8} {:>14} {:<10} {:>6}",
            summary.username,
            summary.customer_number,
            summary.balance.to_string(),
            summary.level.as_str(),
            summary.fee.to_string()
        );
    }
}
