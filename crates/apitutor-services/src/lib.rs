//! Resource rules for the API tutor
//!
//! This crate holds the logic behind every route: who may see, change or
//! remove which customer, which admin operations exist, and the call log
//! every request writes to.
//!
//! # Architecture
//!
//! - Services own `Arc<dyn ...>` repositories, so they run unchanged against
//!   the JSON file store or the in-memory store
//! - Services are cheap to clone and shared across actix workers
//! - Every operation records its call before checking anything else
//!
//! # Services
//!
//! - `CallRecorder` - Appends to and reads the call log
//! - `CustomerService` - Ownership-gated customer CRUD
//! - `AdminService` - Secret-gated maintenance operations

pub mod admin;
pub mod call_log;
pub mod customer;

pub use admin::AdminService;
pub use call_log::{routes, CallRecorder};
pub use customer::CustomerService;
