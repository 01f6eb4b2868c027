//! API Tutor server
//!
//! Training API for learning HTTP basics from a Postman collection. Serves
//! an ownership-gated customers resource, a call log and a few admin routes
//! from a single JSON file.

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use apitutor_api::{configure_routes, Lessons};
use apitutor_auth::AdminSecret;
use apitutor_core::traits::{CallLogRepository, CustomerRepository};
use apitutor_core::AppConfig;
use apitutor_services::{AdminService, CallRecorder, CustomerService};
use apitutor_store::JsonFileStore;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "apitutor={lvl},apitutor_api={lvl},apitutor_services={lvl},apitutor_store={lvl},actix_web=info",
            lvl = log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the CORS policy from a comma separated origin list, `*` for any
fn cors_policy(origins: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);

    if origins.trim() == "*" {
        return cors.allow_any_origin();
    }

    let allowed: Vec<String> = origins
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    cors.allowed_origin_fn(move |origin, _req_head| {
        origin
            .to_str()
            .map(|o| allowed.iter().any(|a| a == o))
            .unwrap_or(false)
    })
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting API Tutor v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = Arc::new(
        JsonFileStore::open(&config.store.path)
            .await
            .with_context(|| format!("Failed to open store at {}", config.store.path))?,
    );
    let customers: Arc<dyn CustomerRepository> = store.clone();
    let calls: Arc<dyn CallLogRepository> = store;

    let secret = AdminSecret::new(config.tutor.admin_secret.clone());

    let recorder = CallRecorder::new(calls);
    let customer_service = web::Data::new(CustomerService::new(customers.clone(), recorder.clone()));
    let admin_service = web::Data::new(AdminService::new(customers, recorder.clone(), secret));
    let recorder = web::Data::new(recorder);
    let lessons = web::Data::new(Lessons::new(&config.tutor));

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let payload_limit = config.server.payload_limit;
    let cors_origins = config.cors.origins.clone();

    info!(
        project = %config.tutor.project,
        store = %config.store.path,
        "Starting HTTP server on {} with {} workers",
        bind_addr,
        workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(customer_service.clone())
            .app_data(admin_service.clone())
            .app_data(recorder.clone())
            .app_data(lessons.clone())
            .app_data(web::JsonConfig::default().limit(payload_limit))
            .app_data(web::FormConfig::default().limit(payload_limit))
            // Middleware
            .wrap(cors_policy(&cors_origins))
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            // Routes
            .configure(configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
