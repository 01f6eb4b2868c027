//! Customer handlers
//!
//! Learner-facing CRUD. Each outcome, good or bad, answers with its own lesson.

use crate::dto::{into_draft, CustomerBody, CustomerQuery};
use crate::error::ApiError;
use crate::handlers::fallback::invalid_route;
use crate::lessons::Lessons;
use actix_web::{web, HttpResponse};
use apitutor_auth::RequestContext;
use apitutor_core::AppError;
use apitutor_services::CustomerService;
use tracing::{debug, instrument};

/// List customers visible to the caller
///
/// GET /customers
#[instrument(skip(service, lessons, ctx))]
pub async fn list_customers(
    service: web::Data<CustomerService>,
    lessons: web::Data<Lessons>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    let customers = service.list(&ctx).await?;
    Ok(HttpResponse::Ok().json(lessons.customer_list(&customers)))
}

/// Get one customer by id
///
/// GET /customer?id=
#[instrument(skip(service, lessons, ctx))]
pub async fn get_customer(
    service: web::Data<CustomerService>,
    lessons: web::Data<Lessons>,
    query: CustomerQuery,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    let customer = service
        .get(&ctx, query.id.as_deref())
        .await
        .map_err(|e| {
            let lesson = match &e {
                AppError::MissingParameter(_) => lessons.missing_customer_id(),
                AppError::NotFound(_) => lessons.unknown_customer(),
                _ => return ApiError::from(e),
            };
            ApiError::lesson(e, lesson)
        })?;

    Ok(HttpResponse::Ok().json(lessons.customer(&customer)))
}

/// Add a customer owned by the caller
///
/// POST /customer
#[instrument(skip(service, lessons, ctx, body))]
pub async fn create_customer(
    service: web::Data<CustomerService>,
    lessons: web::Data<Lessons>,
    ctx: RequestContext,
    body: CustomerBody,
) -> Result<HttpResponse, ApiError> {
    let draft = into_draft(body);
    debug!(name = ?draft.name, "Creating customer");

    let created = service.create(&ctx, draft).await.map_err(|e| {
        let lesson = match &e {
            AppError::Unauthorized(_) => lessons.unauthorized(),
            AppError::InvalidInput(_) => lessons.create_incomplete(),
            _ => return ApiError::from(e),
        };
        ApiError::lesson(e, lesson)
    })?;

    Ok(HttpResponse::Created().json(lessons.created(&created)))
}

/// Overwrite a customer the caller added
///
/// PUT /customer/{cust_id}
#[instrument(skip(service, lessons, ctx, body))]
pub async fn update_customer(
    service: web::Data<CustomerService>,
    lessons: web::Data<Lessons>,
    path: web::Path<String>,
    ctx: RequestContext,
    body: CustomerBody,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let draft = into_draft(body);

    service
        .update(&ctx, &id, draft)
        .await
        .map_err(|e| {
            let lesson = match &e {
                AppError::Unauthorized(_) => lessons.unauthorized(),
                AppError::InvalidInput(field) if field == "id" => lessons.update_placeholder(),
                AppError::InvalidInput(_) => lessons.update_incomplete(),
                AppError::Forbidden => lessons.update_refused(),
                _ => return ApiError::from(e),
            };
            ApiError::lesson(e, lesson)
        })?;

    Ok(HttpResponse::Created().json(lessons.updated()))
}

/// Remove a customer the caller added
///
/// DELETE /customer/{cust_id}
#[instrument(skip(service, lessons, ctx))]
pub async fn delete_customer(
    service: web::Data<CustomerService>,
    lessons: web::Data<Lessons>,
    path: web::Path<String>,
    ctx: RequestContext,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    service.delete(&ctx, &id).await.map_err(|e| {
        let lesson = match &e {
            AppError::Unauthorized(_) => lessons.unauthorized(),
            AppError::InvalidInput(_) => lessons.delete_placeholder(),
            AppError::Forbidden => lessons.delete_refused(),
            _ => return ApiError::from(e),
        };
        ApiError::lesson(e, lesson)
    })?;

    Ok(HttpResponse::Ok().json(lessons.deleted()))
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::get().to(list_customers))
        .service(
            web::resource("/customer")
                .route(web::get().to(get_customer))
                .route(web::post().to(create_customer))
                .default_service(web::to(invalid_route)),
        )
        .service(
            web::resource("/customer/{cust_id}")
                .route(web::put().to(update_customer))
                .route(web::delete().to(delete_customer))
                .default_service(web::to(invalid_route)),
        );
}
