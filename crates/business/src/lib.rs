//! # Minibank Business
//!
//! Business logic layer - Customer, Manager, Auth operations.

pub mod auth;
pub mod customer;
pub mod error;
pub mod management;
pub mod services;

pub use auth::{AuthService, ManagerCredentials, Role, Session};
pub use customer::{CustomerService, CustomerSummary};
pub use error::{BusinessError, BusinessResult};
pub use management::ManagerService;
pub use services::{OperationReceipt, ServiceContext};
