//! Request identity and authorization for the API tutor
//!
//! The tutor has no accounts. What it calls authorization is three request
//! headers:
//!
//! - `user-id`: who the caller claims to be; the ownership key for records
//! - `auth_key`: must be present (with any value) to create, update or delete
//! - `admin_key`: must equal the configured admin secret for admin routes
//!
//! # Examples
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use apitutor_auth::RequestContext;
//!
//! async fn whoami(ctx: RequestContext) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "caller": ctx.caller_id }))
//! }
//! ```

pub mod extract;
pub mod secret;

pub use extract::{RequestContext, ADMIN_KEY_HEADER, AUTH_KEY_HEADER, USER_ID_HEADER};
pub use secret::AdminSecret;
