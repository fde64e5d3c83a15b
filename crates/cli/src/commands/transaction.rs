//! Balance operations: deposit, withdraw, purchase

use anyhow::Result;
use minibank_business::{CustomerService, CustomerSummary, OperationReceipt, ServiceContext};
use rust_decimal::Decimal;

/// Deposit into the authenticated customer's account
pub fn deposit(ctx: &mut ServiceContext, username: &str, amount: Decimal) -> Result<()> {
    let receipt = CustomerService::new(ctx).deposit(username, amount)?;
    print_receipt("Deposit", &receipt);
    Ok(())
}

/// Withdraw from the authenticated customer's account
pub fn withdraw(ctx: &mut ServiceContext, username: &str, amount: Decimal) -> Result<()> {
    let receipt = CustomerService::new(ctx).withdraw(username, amount)?;
    print_receipt("Withdrawal", &receipt);
    Ok(())
}

/// Purchase: withdraw plus the tier fee
pub fn purchase(ctx: &mut ServiceContext, username: &str, amount: Decimal) -> Result<()> {
    let receipt = CustomerService::new(ctx).purchase(username, amount)?;
    print_receipt("Purchase", &receipt);
    Ok(())
}

/// Show the authenticated customer's summary
pub fn balance(ctx: &mut ServiceContext, username: &str) -> Result<()> {
    let summary = CustomerService::new(ctx).summary(username)?;
    print_summary(&summary);
    Ok(())
}

fn print_receipt(operation: &str, receipt: &OperationReceipt) {
    println!("✅ {} successful!", operation);
    println!("   Amount:      {}", receipt.amount);
    if receipt.fee_charged > Decimal::ZERO {
        println!("   Fee:         {}", receipt.fee_charged);
    }
    println!("   New balance: {}", receipt.balance_after);
    println!("   Level:       {}", receipt.level.as_str());
}

/// Customer summary block, shared with the login dashboard
pub fn print_summary(summary: &CustomerSummary) {
    println!("💰 Account of '{}'", summary.username);
    println!("   Number:  {}", summary.customer_number);
    println!("   Balance: {}", summary.balance);
    println!("   Level:   {}", summary.level.as_str());
    println!("   Fee:     {}", summary.fee);
}
