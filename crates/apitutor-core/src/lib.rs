//! API Tutor Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the API tutor. It includes:
//!
//! - Domain models (Customer, CallLogEntry)
//! - Repository traits for the customer collection and the call log
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
