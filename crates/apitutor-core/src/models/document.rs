//! Persisted document
//!
//! Both collections live in one JSON object, `{"customers": [...], "calls": [...]}`.

use super::{CallLogEntry, Customer};
use serde::{Deserialize, Serialize};

/// Whole-store snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub customers: Vec<Customer>,
    pub calls: Vec<CallLogEntry>,
}

/// On-disk shape where either collection may be missing
#[derive(Debug, Deserialize)]
struct PartialDocument {
    customers: Option<Vec<Customer>>,
    calls: Option<Vec<CallLogEntry>>,
}

impl Document {
    /// Fresh document: seed customers, empty call log
    pub fn seeded() -> Self {
        Self {
            customers: Customer::seed_records(),
            calls: Vec::new(),
        }
    }

    /// Parse a stored document, filling in whichever collections are absent.
    ///
    /// Missing `customers` are seeded, missing `calls` start empty; present
    /// collections are kept as-is even when empty.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let partial: PartialDocument = serde_json::from_str(raw)?;
        Ok(Self {
            customers: partial.customers.unwrap_or_else(Customer::seed_records),
            calls: partial.calls.unwrap_or_default(),
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_are_initialized() {
        let doc = Document::from_json("{}").unwrap();
        assert_eq!(doc.customers.len(), 3);
        assert!(doc.calls.is_empty());
    }

    #[test]
    fn test_empty_customers_are_kept() {
        let doc = Document::from_json(r#"{"customers": [], "calls": []}"#).unwrap();
        assert!(doc.customers.is_empty());
    }

    #[test]
    fn test_existing_records_are_kept() {
        let raw = r#"{
            "customers": [{"id": "x1", "name": "Sophia Petrillo", "type": "Individual", "admin": "alice"}],
            "calls": [{"when": "Sun Oct 18 2026 17:01:00 GMT+0000", "where": "GET /", "what": "-"}]
        }"#;
        let doc = Document::from_json(raw).unwrap();
        assert_eq!(doc.customers[0].admin, "alice");
        assert_eq!(doc.calls[0].route, "GET /");
    }

    #[test]
    fn test_malformed_document() {
        assert!(Document::from_json("not json").is_err());
    }
}
