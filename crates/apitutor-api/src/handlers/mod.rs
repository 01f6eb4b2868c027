//! HTTP request handlers

pub mod admin;
pub mod customer;
pub mod fallback;
pub mod landing;

pub use admin::configure as configure_admin;
pub use customer::configure as configure_customers;
pub use fallback::invalid_route;
pub use landing::configure as configure_landing;
