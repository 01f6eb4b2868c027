//! Admin handlers
//!
//! Maintenance endpoints used by the tutorial authors. All of them need the
//! `admin_key` header to match the configured secret.

use crate::dto::RecordsQuery;
use crate::error::ApiError;
use crate::lessons::Lessons;
use actix_web::{web, HttpResponse};
use apitutor_auth::RequestContext;
use apitutor_services::AdminService;
use serde_json::json;
use tracing::instrument;

/// Restore the seed customers
///
/// GET /reset
#[instrument(skip(service, ctx))]
pub async fn reset(
    service: web::Data<AdminService>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    service.reset(&ctx).await.map_err(ApiError::Admin)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "DB reset" })))
}

/// Remove every customer
///
/// GET /clear
#[instrument(skip(service, ctx))]
pub async fn clear(
    service: web::Data<AdminService>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    service.clear(&ctx).await.map_err(ApiError::Admin)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "DB cleared" })))
}

/// Every customer, owners included
///
/// GET /all
#[instrument(skip(service, lessons, ctx))]
pub async fn all_customers(
    service: web::Data<AdminService>,
    lessons: web::Data<Lessons>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    let customers = service.all(&ctx).await.map_err(ApiError::Admin)?;
    Ok(HttpResponse::Ok().json(lessons.all_customers(&customers)))
}

/// The call log
///
/// GET /calls
#[instrument(skip(service, ctx))]
pub async fn calls(
    service: web::Data<AdminService>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    let calls = service.calls(&ctx).await.map_err(ApiError::Admin)?;
    Ok(HttpResponse::Ok().json(calls))
}

/// Delete a customer whoever owns it
///
/// DELETE /records?cust_id=
#[instrument(skip(service, ctx))]
pub async fn delete_record(
    service: web::Data<AdminService>,
    query: RecordsQuery,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    service
        .delete_record(&ctx, query.cust_id.as_deref())
        .await
        .map_err(ApiError::Admin)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "deleted" })))
}

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reset", web::get().to(reset))
        .route("/clear", web::get().to(clear))
        .route("/all", web::get().to(all_customers))
        .route("/calls", web::get().to(calls))
        .route("/records", web::delete().to(delete_record));
}
