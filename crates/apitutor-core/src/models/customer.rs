//! Customer model
//!
//! The single resource the tutorial teaches CRUD against. Ownership of a
//! record is tracked through its `admin` field.

use crate::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Owner of the seed records. Never allowed to update or delete anything.
pub const SEED_ADMIN: &str = "postman";

/// Owner stamped on records created without a `user-id` header
pub const ANONYMOUS_CALLER: &str = "anonymous";

/// Id the tutorial collection ships with before the learner fills one in
pub const PLACEHOLDER_ID: &str = "placeholder";

/// Seed data restored by the admin reset: (name, type)
const SEED_CUSTOMERS: [(&str, &str); 3] = [
    ("Blanche Devereux", "Individual"),
    ("Rose Nylund", "Individual"),
    ("Shady Pines", "Company"),
];

/// Customer entity as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Server generated identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Customer type, conventionally "Individual" or "Company"
    #[serde(rename = "type")]
    pub customer_type: String,

    /// Caller that created the record, or `postman` for seed records
    pub admin: String,
}

impl Customer {
    /// Create a customer with a freshly generated id
    pub fn new(
        name: impl Into<String>,
        customer_type: impl Into<String>,
        admin: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            customer_type: customer_type.into(),
            admin: admin.into(),
        }
    }

    /// The three seed records, each with a new id
    pub fn seed_records() -> Vec<Customer> {
        SEED_CUSTOMERS
            .iter()
            .map(|(name, customer_type)| Customer::new(*name, *customer_type, SEED_ADMIN))
            .collect()
    }

    /// Seed records are owned by the tutorial itself
    pub fn is_seed(&self) -> bool {
        self.admin == SEED_ADMIN
    }

    /// Whether `caller` may see this record in the customer list
    pub fn visible_to(&self, caller: Option<&str>) -> bool {
        self.is_seed() || caller.is_some_and(|c| self.admin == c)
    }

    /// Whether `caller` may update or delete this record.
    ///
    /// The seed identity owns nothing, even the seed records.
    pub fn is_owned_by(&self, caller: &str) -> bool {
        caller != SEED_ADMIN && self.admin == caller
    }
}

/// Customer as shown to learners: the owner is never exposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub customer_type: String,
}

impl From<Customer> for CustomerSummary {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            customer_type: customer.customer_type,
        }
    }
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            customer_type: customer.customer_type.clone(),
        }
    }
}

/// Customer fields as sent by a learner in a create or update body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CustomerDraft {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    #[validate(required, length(min = 1))]
    pub customer_type: Option<String>,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, customer_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            customer_type: Some(customer_type.into()),
        }
    }

    /// Name for the call log, `-` when absent
    pub fn name_or_dash(&self) -> &str {
        self.name.as_deref().unwrap_or("-")
    }

    /// Both fields, or `InvalidInput` naming the first one missing or empty
    pub fn require(self) -> AppResult<(String, String)> {
        if self.validate().is_err() {
            let field = if self.name.as_deref().map_or(true, str::is_empty) {
                "name"
            } else {
                "type"
            };
            return Err(AppError::InvalidInput(field.to_string()));
        }

        Ok((
            self.name.unwrap_or_default(),
            self.customer_type.unwrap_or_default(),
        ))
    }
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
