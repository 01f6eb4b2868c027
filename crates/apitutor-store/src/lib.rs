//! API Tutor Storage Layer
//!
//! This crate provides the implementations of the repository traits defined
//! in apitutor-core:
//!
//! - `JsonFileStore` keeps both collections in one JSON document on disk,
//!   rewritten wholesale on every mutation
//! - `MemoryStore` keeps them in process memory, for tests and throwaway runs

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

// Re-export commonly used types
pub use apitutor_core::{AppError, AppResult};
