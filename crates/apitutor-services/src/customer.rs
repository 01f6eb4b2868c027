//! Customer service
//!
//! Ownership-gated CRUD over the customer collection. Reads are open to
//! everyone; writes need an `auth_key` header (any value) and, for existing
//! records, the caller must be the record's owner.

use crate::call_log::{context, routes, CallRecorder};
use apitutor_auth::RequestContext;
use apitutor_core::{
    models::{Customer, CustomerDraft, CustomerSummary, PLACEHOLDER_ID},
    traits::CustomerRepository,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Customer CRUD with ownership rules
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    recorder: CallRecorder,
}

impl CustomerService {
    /// Create a new customer service
    pub fn new(customers: Arc<dyn CustomerRepository>, recorder: CallRecorder) -> Self {
        Self {
            customers,
            recorder,
        }
    }

    /// Seed customers plus the caller's own, without owners
    #[instrument(skip(self, ctx))]
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<CustomerSummary>> {
        let caller = ctx.caller_id.as_deref();
        self.recorder
            .record(routes::LIST_CUSTOMERS, context(&[caller]))
            .await;

        let visible: Vec<CustomerSummary> = self
            .customers
            .list()
            .await?
            .iter()
            .filter(|c| c.visible_to(caller))
            .map(CustomerSummary::from)
            .collect();

        debug!(count = visible.len(), "Listed customers");
        Ok(visible)
    }

    /// Any customer by id, whoever owns it
    #[instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &RequestContext, id: Option<&str>) -> AppResult<CustomerSummary> {
        let caller = ctx.caller_id.as_deref();
        let id = id.filter(|id| !id.is_empty());

        let Some(id) = id else {
            self.recorder
                .record(routes::GET_CUSTOMER, context(&[caller]))
                .await;
            debug!("Customer lookup without id");
            return Err(AppError::MissingParameter("id".to_string()));
        };

        self.recorder
            .record(routes::GET_CUSTOMER, context(&[caller, Some(id)]))
            .await;

        self.customers
            .find(id)
            .await?
            .map(CustomerSummary::from)
            .ok_or_else(|| {
                debug!(id, "Customer not found");
                AppError::NotFound(format!("Customer {} not found", id))
            })
    }

    /// Add a customer owned by the caller
    #[instrument(skip(self, ctx, draft))]
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: CustomerDraft,
    ) -> AppResult<CustomerSummary> {
        self.recorder
            .record(
                routes::CREATE_CUSTOMER,
                context(&[ctx.caller_id.as_deref(), Some(draft.name_or_dash())]),
            )
            .await;

        require_auth_key(ctx)?;
        let (name, customer_type) = draft.require()?;

        let created = self
            .customers
            .insert(Customer::new(name, customer_type, ctx.owner()))
            .await?;

        info!(id = %created.id, owner = %created.admin, "Customer created");
        Ok(CustomerSummary::from(created))
    }

    /// Overwrite a customer the caller owns
    #[instrument(skip(self, ctx, draft))]
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        draft: CustomerDraft,
    ) -> AppResult<CustomerSummary> {
        self.recorder
            .record(
                routes::UPDATE_CUSTOMER,
                context(&[ctx.caller_id.as_deref(), Some(draft.name_or_dash()), Some(id)]),
            )
            .await;

        require_auth_key(ctx)?;
        reject_placeholder(id)?;
        let (name, customer_type) = draft.require()?;

        let owner = ctx.owner();
        let existing = self.owned_record(id, owner).await?;

        let updated = Customer {
            id: existing.id,
            name,
            customer_type,
            admin: owner.to_string(),
        };

        // A concurrent delete can win between the lookup and the write
        let updated = self.customers.update(updated).await?.ok_or(AppError::Forbidden)?;

        info!(id = %updated.id, owner, "Customer updated");
        Ok(CustomerSummary::from(updated))
    }

    /// Remove a customer the caller owns
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        self.recorder
            .record(
                routes::DELETE_CUSTOMER,
                context(&[ctx.caller_id.as_deref(), Some(id)]),
            )
            .await;

        require_auth_key(ctx)?;
        reject_placeholder(id)?;

        let owner = ctx.owner();
        let existing = self.owned_record(id, owner).await?;

        if !self.customers.remove(&existing.id).await? {
            return Err(AppError::Forbidden);
        }

        info!(id, owner, "Customer deleted");
        Ok(())
    }

    /// The record if `owner` may change it, `Forbidden` otherwise
    async fn owned_record(&self, id: &str, owner: &str) -> AppResult<Customer> {
        match self.customers.find(id).await? {
            Some(customer) if customer.is_owned_by(owner) => Ok(customer),
            Some(customer) => {
                warn!(id, owner, actual_owner = %customer.admin, "Refused change to customer not owned by caller");
                Err(AppError::Forbidden)
            }
            None => {
                warn!(id, owner, "Refused change to unknown customer");
                Err(AppError::Forbidden)
            }
        }
    }
}

fn require_auth_key(ctx: &RequestContext) -> AppResult<()> {
    if ctx.has_auth_key() {
        Ok(())
    } else {
        debug!("Request without auth_key header");
        Err(AppError::Unauthorized("auth_key header is required".to_string()))
    }
}

fn reject_placeholder(id: &str) -> AppResult<()> {
    if id == PLACEHOLDER_ID {
        Err(AppError::InvalidInput("id".to_string()))
    } else {
        Ok(())
    }
}
