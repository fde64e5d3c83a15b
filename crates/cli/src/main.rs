//! Minibank CLI - banking operations from the command line
//!
//! Usage:
//! ```bash
//! minibank -u admin -p admin customer add alice --customer-password secret --balance 500
//! minibank -u admin -p admin customer list
//! minibank -u alice -p secret deposit 100
//! minibank -u alice -p secret purchase 250
//! minibank status
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use minibank_business::{
    AuthService, BusinessError, ManagerCredentials, Role, ServiceContext, Session,
};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;

use commands::{account, session, transaction};

/// Minibank - a teaching bank with tiered purchase fees
#[derive(Parser)]
#[command(name = "minibank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (customer records + audit log)
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Username to authenticate as
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Password for the given username
    #[arg(long, short = 'p', global = true)]
    pub password: Option<String>,

    /// Manager username override
    #[arg(long, default_value = "admin", global = true)]
    pub manager_username: String,

    /// Manager password override
    #[arg(long, default_value = "admin", global = true)]
    pub manager_password: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and show the role dashboard
    Login,

    /// Customer management (manager only)
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },

    /// Deposit into your own account
    Deposit {
        /// Amount to deposit
        amount: Decimal,
    },

    /// Withdraw from your own account (no fee)
    Withdraw {
        /// Amount to withdraw
        amount: Decimal,
    },

    /// Purchase: withdraw plus the tier fee
    Purchase {
        /// Purchase amount (the tier fee comes on top)
        amount: Decimal,
    },

    /// Show your own balance, level and fee
    Balance,

    /// Show data directory status
    Status,
}

#[derive(Subcommand)]
pub enum CustomerAction {
    /// Create a new customer
    Add {
        /// Username for the new customer
        username: String,
        /// Password for the new customer
        #[arg(long)]
        customer_password: String,
        /// Initial balance (negative values open at zero)
        #[arg(long, default_value = "0")]
        balance: Decimal,
    },
    /// Delete a customer and their record
    Remove {
        /// Username of the customer to delete
        username: String,
    },
    /// List all customers
    List,
    /// Show one customer
    Show {
        /// Username of the customer
        username: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut ctx = ServiceContext::open(&cli.data_dir)?;
    let manager = ManagerCredentials {
        username: cli.manager_username.clone(),
        password: cli.manager_password.clone(),
    };

    match &cli.command {
        Commands::Status => {
            session::status(&cli.data_dir, &ctx)?;
        }

        Commands::Login => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            session::dashboard(&mut ctx, &user_session)?;
        }

        Commands::Customer { action } => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            require_manager(&user_session)?;
            account::handle(&mut ctx, action)?;
        }

        Commands::Deposit { amount } => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            let username = require_customer(&user_session)?;
            transaction::deposit(&mut ctx, &username, *amount)?;
        }

        Commands::Withdraw { amount } => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            let username = require_customer(&user_session)?;
            transaction::withdraw(&mut ctx, &username, *amount)?;
        }

        Commands::Purchase { amount } => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            let username = require_customer(&user_session)?;
            transaction::purchase(&mut ctx, &username, *amount)?;
        }

        Commands::Balance => {
            let user_session = authenticate(&ctx, &cli, &manager)?;
            let username = require_customer(&user_session)?;
            transaction::balance(&mut ctx, &username)?;
        }
    }

    Ok(())
}

/// Authenticate the credential flags against the manager config and
/// the ledger
fn authenticate(ctx: &ServiceContext, cli: &Cli, manager: &ManagerCredentials) -> Result<Session> {
    let username = cli
        .username
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--username is required for this command"))?;
    let password = cli
        .password
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--password is required for this command"))?;

    AuthService::new(ctx, manager.clone()).login(username, password)
}

fn require_manager(user_session: &Session) -> Result<()> {
    match user_session.role() {
        Role::Manager => Ok(()),
        role => Err(BusinessError::not_permitted(role.as_str(), "customer management").into()),
    }
}

fn require_customer(user_session: &Session) -> Result<String> {
    match user_session.role() {
        Role::Customer(username) => Ok(username.clone()),
        role => Err(BusinessError::not_permitted(role.as_str(), "account operation").into()),
    }
}
