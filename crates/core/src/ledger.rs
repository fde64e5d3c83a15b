//! # Ledger Module
//!
//! Định nghĩa Ledger - registry in-memory của tất cả Customers,
//! unique theo username, giữ thứ tự thêm vào. Ledger cấp customer_number
//! và không tự serialize: persistence là việc của business layer,
//! từng record một.

use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Registry in-memory của Customers.
///
/// Invariant: tối đa một Customer cho mỗi username.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Customers theo thứ tự thêm vào
    customers: Vec<Customer>,
    /// Số sẽ cấp cho customer tiếp theo
    next_number: u64,
}

impl Ledger {
    /// Tạo Ledger rỗng
    pub fn new() -> Self {
        Self::default()
    }

    /// Cấp customer_number tiếp theo (bắt đầu từ 0)
    pub fn next_customer_number(&mut self) -> u64 {
        let number = self.next_number;
        self.next_number += 1;
        number
    }

    /// Thêm customer vào ledger.
    ///
    /// Username trùng trả về `CustomerAlreadyExists`. Counter luôn được
    /// đẩy qua số của customer vừa thêm để một số không bao giờ bị cấp
    /// hai lần, kể cả sau khi rehydrate từ store.
    pub fn add(&mut self, customer: Customer) -> CoreResult<()> {
        if self.find(customer.username()).is_some() {
            return Err(CoreError::CustomerAlreadyExists(
                customer.username().to_string(),
            ));
        }
        self.next_number = self.next_number.max(customer.customer_number() + 1);
        self.customers.push(customer);
        Ok(())
    }

    /// Xóa customer theo username, trả về customer đã xóa.
    pub fn remove(&mut self, username: &str) -> CoreResult<Customer> {
        match self
            .customers
            .iter()
            .position(|c| c.username() == username)
        {
            Some(index) => Ok(self.customers.remove(index)),
            None => Err(CoreError::CustomerNotFound(username.to_string())),
        }
    }

    /// Tìm customer theo username - linear scan, miss không phải lỗi
    pub fn find(&self, username: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.username() == username)
    }

    /// Tìm mutable customer theo username
    pub fn find_mut(&mut self, username: &str) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.username() == username)
    }

    /// Số customers trong ledger
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Kiểm tra ledger có rỗng không
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Iterate theo thứ tự thêm vào
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ledger with {} customers", self.customers.len())
    }
}
