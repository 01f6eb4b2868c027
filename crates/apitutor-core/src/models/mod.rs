//! Domain models for the API tutor
//!
//! This module contains the core domain models used throughout the application.

pub mod call;
pub mod customer;
pub mod document;

pub use call::CallLogEntry;
pub use customer::{
    Customer, CustomerDraft, CustomerSummary, ANONYMOUS_CALLER, PLACEHOLDER_ID, SEED_ADMIN,
};
pub use document::Document;
