//! Repository traits
//!
//! The resource rules only ever talk to these abstractions, so they can run
//! against the JSON file in production and an in-memory store in tests.

use crate::error::AppError;
use crate::models::{CallLogEntry, Customer};
use async_trait::async_trait;

/// Customer collection
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, in insertion order
    async fn list(&self) -> Result<Vec<Customer>, AppError>;

    /// Find a customer by id
    async fn find(&self, id: &str) -> Result<Option<Customer>, AppError>;

    /// Append a new customer
    async fn insert(&self, customer: Customer) -> Result<Customer, AppError>;

    /// Replace the stored record with the same id.
    ///
    /// Returns `None` when no record has that id.
    async fn update(&self, customer: Customer) -> Result<Option<Customer>, AppError>;

    /// Remove a customer by id, returning whether a record was removed
    async fn remove(&self, id: &str) -> Result<bool, AppError>;

    /// Swap the whole collection for `customers`
    async fn replace_all(&self, customers: Vec<Customer>) -> Result<(), AppError>;

    /// Remove every customer
    async fn clear(&self) -> Result<(), AppError> {
        self.replace_all(Vec::new()).await
    }
}

/// Append-only call log
#[async_trait]
pub trait CallLogRepository: Send + Sync {
    /// Append one entry
    async fn append(&self, entry: CallLogEntry) -> Result<(), AppError>;

    /// All entries, oldest first
    async fn list(&self) -> Result<Vec<CallLogEntry>, AppError>;
}
