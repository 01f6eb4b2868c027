//! Actix-web request extractor for the tutor headers
//!
//! Extraction never fails: every route must log the call before it decides
//! whether the caller was allowed to make it, so the checks themselves live in
//! the services.

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use apitutor_core::models::ANONYMOUS_CALLER;
use futures::future::{ready, Ready};
use std::convert::Infallible;
use tracing::debug;

/// Caller identity header
pub const USER_ID_HEADER: &str = "user-id";

/// Presence-only token header for mutating routes
pub const AUTH_KEY_HEADER: &str = "auth_key";

/// Admin secret header
pub const ADMIN_KEY_HEADER: &str = "admin_key";

/// Read a header as a trimmed, non-empty string
fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Tutor headers of one request
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use apitutor_auth::RequestContext;
///
/// async fn handler(ctx: RequestContext) -> HttpResponse {
///     if ctx.has_auth_key() {
///         HttpResponse::Ok().finish()
///     } else {
///         HttpResponse::Unauthorized().finish()
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of `user-id`
    pub caller_id: Option<String>,

    /// Value of `auth_key`
    pub auth_key: Option<String>,

    /// Value of `admin_key`
    pub admin_key: Option<String>,

    /// Value of `User-Agent`
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Build the context from request headers
    pub fn from_http(req: &HttpRequest) -> Self {
        Self {
            caller_id: header_value(req, USER_ID_HEADER),
            auth_key: header_value(req, AUTH_KEY_HEADER),
            admin_key: header_value(req, ADMIN_KEY_HEADER),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }

    /// Only presence is checked; any value is accepted
    pub fn has_auth_key(&self) -> bool {
        self.auth_key.is_some()
    }

    /// Owner identity for mutations: the caller id, or `anonymous`
    pub fn owner(&self) -> &str {
        self.caller_id.as_deref().unwrap_or(ANONYMOUS_CALLER)
    }

    /// Whether the request came from the Postman client
    pub fn is_postman_client(&self) -> bool {
        self.user_agent
            .as_deref()
            .is_some_and(|ua| ua.contains("Postman"))
    }
}

impl FromRequest for RequestContext {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = Self::from_http(req);
        debug!(
            caller = ctx.caller_id.as_deref().unwrap_or("-"),
            auth_key = ctx.auth_key.is_some(),
            admin_key = ctx.admin_key.is_some(),
            "Request context extracted"
        );
        ready(Ok(ctx))
    }
}
