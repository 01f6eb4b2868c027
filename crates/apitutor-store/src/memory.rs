//! In-memory store

use apitutor_core::{
    models::{CallLogEntry, Customer, Document},
    traits::{CallLogRepository, CustomerRepository},
    AppResult,
};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Process-local implementation of both repositories
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<Document>,
}

impl MemoryStore {
    /// Store holding the seed customers and no calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding exactly `customers` and no calls
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            document: RwLock::new(Document {
                customers,
                calls: Vec::new(),
            }),
        }
    }

    /// Copy of the current document
    pub fn snapshot(&self) -> Document {
        self.document.read().clone()
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(self.document.read().customers.clone())
    }

    async fn find(&self, id: &str) -> AppResult<Option<Customer>> {
        Ok(self
            .document
            .read()
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert(&self, customer: Customer) -> AppResult<Customer> {
        self.document.write().customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> AppResult<Option<Customer>> {
        let mut doc = self.document.write();
        match doc.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(slot) => {
                *slot = customer.clone();
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &str) -> AppResult<bool> {
        let mut doc = self.document.write();
        let before = doc.customers.len();
        doc.customers.retain(|c| c.id != id);
        Ok(doc.customers.len() != before)
    }

    async fn replace_all(&self, customers: Vec<Customer>) -> AppResult<()> {
        self.document.write().customers = customers;
        Ok(())
    }
}

#[async_trait]
impl CallLogRepository for MemoryStore {
    async fn append(&self, entry: CallLogEntry) -> AppResult<()> {
        self.document.write().calls.push(entry);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<CallLogEntry>> {
        Ok(self.document.read().calls.clone())
    }
}
