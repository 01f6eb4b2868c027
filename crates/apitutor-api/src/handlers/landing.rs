//! Landing handler

use crate::lessons::Lessons;
use actix_web::{http::header::ContentType, web, HttpResponse};
use apitutor_auth::RequestContext;
use apitutor_core::models::call::NO_CONTEXT;
use apitutor_services::{routes, CallRecorder};
use tracing::instrument;

/// Introduce the project: a lesson for Postman, a short page for browsers
///
/// GET /
#[instrument(skip(recorder, lessons, ctx))]
pub async fn landing(
    recorder: web::Data<CallRecorder>,
    lessons: web::Data<Lessons>,
    ctx: RequestContext,
) -> HttpResponse {
    recorder.record(routes::LANDING, NO_CONTEXT).await;

    if ctx.is_postman_client() {
        HttpResponse::Ok().json(lessons.landing())
    } else {
        HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(lessons.landing_html())
    }
}

/// Configure the landing route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing));
}
