//! Call recording
//!
//! Every route records one entry before doing anything else. Failing to
//! record is logged and otherwise ignored; the request carries on.

use apitutor_core::{
    models::{call::NO_CONTEXT, CallLogEntry},
    traits::CallLogRepository,
    AppResult,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Route labels written to `where`
pub mod routes {
    pub const LANDING: &str = "GET /";
    pub const LIST_CUSTOMERS: &str = "GET /customers";
    pub const GET_CUSTOMER: &str = "GET /customer";
    pub const CREATE_CUSTOMER: &str = "POST /customer";
    pub const UPDATE_CUSTOMER: &str = "PUT /customer";
    pub const DELETE_CUSTOMER: &str = "DEL /customer";
    pub const RESET: &str = "GET /reset";
    pub const CLEAR: &str = "GET /clear";
    pub const ALL: &str = "GET /all";
    pub const CALLS: &str = "GET /calls";
    pub const DELETE_RECORD: &str = "DEL /records";
}

/// Writes and reads the call log
#[derive(Clone)]
pub struct CallRecorder {
    calls: Arc<dyn CallLogRepository>,
}

impl CallRecorder {
    pub fn new(calls: Arc<dyn CallLogRepository>) -> Self {
        Self { calls }
    }

    /// Append an entry stamped now. Never fails.
    pub async fn record(&self, route: &str, context: impl Into<String>) {
        let entry = CallLogEntry::now(route, context);
        debug!(route = %entry.route, what = %entry.context, "Recording call");

        if let Err(e) = self.calls.append(entry).await {
            warn!(route, "Failed to record call: {}", e);
        }
    }

    /// Every recorded call, oldest first
    pub async fn history(&self) -> AppResult<Vec<CallLogEntry>> {
        self.calls.list().await
    }
}

/// Join the caller and field values into a `what` string, `-` for absent parts
pub(crate) fn context(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .map(|p| p.unwrap_or(NO_CONTEXT))
        .collect::<Vec<_>>()
        .join(" ")
}
