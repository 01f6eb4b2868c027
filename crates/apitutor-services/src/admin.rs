//! Admin service
//!
//! Maintenance operations gated by the `admin_key` header. None of these
//! look at ownership.

use crate::call_log::{context, routes, CallRecorder};
use apitutor_auth::{AdminSecret, RequestContext};
use apitutor_core::{
    models::{CallLogEntry, Customer},
    traits::CustomerRepository,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct AdminService {
    customers: Arc<dyn CustomerRepository>,
    recorder: CallRecorder,
    secret: AdminSecret,
}

impl AdminService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        recorder: CallRecorder,
        secret: AdminSecret,
    ) -> Self {
        if !secret.is_configured() {
            warn!("No admin secret configured; admin routes will refuse every request");
        }

        Self {
            customers,
            recorder,
            secret,
        }
    }

    fn authorize(&self, ctx: &RequestContext) -> AppResult<()> {
        if self.secret.verify(ctx.admin_key.as_deref()) {
            Ok(())
        } else {
            warn!(caller = ?ctx.caller_id, "Rejected admin request");
            Err(AppError::Unauthorized("invalid admin key".to_string()))
        }
    }

    /// Replace all customers with fresh seed records
    #[instrument(skip(self, ctx))]
    pub async fn reset(&self, ctx: &RequestContext) -> AppResult<()> {
        self.recorder.record(routes::RESET, context(&[None])).await;
        self.authorize(ctx)?;

        self.customers.replace_all(Customer::seed_records()).await?;
        info!("Customers reset to seed records");
        Ok(())
    }

    /// Remove every customer, seed records included
    #[instrument(skip(self, ctx))]
    pub async fn clear(&self, ctx: &RequestContext) -> AppResult<()> {
        self.recorder.record(routes::CLEAR, context(&[None])).await;
        self.authorize(ctx)?;

        self.customers.clear().await?;
        info!("Customers cleared");
        Ok(())
    }

    /// Every customer with its owner
    #[instrument(skip(self, ctx))]
    pub async fn all(&self, ctx: &RequestContext) -> AppResult<Vec<Customer>> {
        self.recorder.record(routes::ALL, context(&[None])).await;
        self.authorize(ctx)?;

        self.customers.list().await
    }

    /// The raw call log
    #[instrument(skip(self, ctx))]
    pub async fn calls(&self, ctx: &RequestContext) -> AppResult<Vec<CallLogEntry>> {
        self.recorder.record(routes::CALLS, context(&[None])).await;
        self.authorize(ctx)?;

        self.recorder.history().await
    }

    /// Delete a record regardless of owner. Returns whether anything was
    /// removed; a missing or unknown id is not an error.
    #[instrument(skip(self, ctx))]
    pub async fn delete_record(&self, ctx: &RequestContext, id: Option<&str>) -> AppResult<bool> {
        let id = id.filter(|id| !id.is_empty());
        self.recorder
            .record(routes::DELETE_RECORD, context(&[id]))
            .await;
        self.authorize(ctx)?;

        let Some(id) = id else {
            return Ok(false);
        };

        let removed = self.customers.remove(id).await?;
        info!(id, removed, "Admin delete");
        Ok(removed)
    }
}
