//! API layer for the API tutor
//!
//! HTTP handlers for the learner routes (customers CRUD), the admin routes
//! and the landing page. Handlers expect these in app data:
//!
//! - `web::Data<CustomerService>`
//! - `web::Data<AdminService>`
//! - `web::Data<CallRecorder>`
//! - `web::Data<Lessons>`

#![forbid(unsafe_code)]

pub mod dto;
pub mod error;
pub mod handlers;
pub mod lessons;

pub use error::ApiError;
pub use lessons::{Lesson, Lessons};

use actix_web::web;
use handlers::{configure_admin, configure_customers, configure_landing, invalid_route};

/// Register every route plus the invalid-route fallback
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_landing)
        .configure(configure_customers)
        .configure(configure_admin)
        .default_service(web::to(invalid_route));
}
