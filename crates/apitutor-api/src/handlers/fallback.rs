//! Catch-all for unknown routes and methods

use crate::error::ApiError;
use crate::lessons::Lessons;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use apitutor_core::AppError;
use tracing::debug;

/// Answer any unmatched method/path with the invalid-route lesson
pub async fn invalid_route(req: HttpRequest, lessons: web::Data<Lessons>) -> HttpResponse {
    debug!(method = %req.method(), path = %req.path(), "No route matched");

    ApiError::lesson(
        AppError::InvalidRoute(format!("{} {}", req.method(), req.path())),
        lessons.invalid_route(),
    )
    .error_response()
}
