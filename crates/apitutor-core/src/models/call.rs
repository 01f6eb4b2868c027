//! Call log model
//!
//! One entry per request the tutor receives, kept so course admins can see
//! how learners progress through the collection.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Placeholder context for routes that carry no caller-specific detail
pub const NO_CONTEXT: &str = "-";

/// Timestamp layout of `when`, e.g. `Sun Oct 18 2026 17:01:00 GMT+0000`
const WHEN_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Append-only call log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Request time
    pub when: String,

    /// Method and path label, e.g. `POST /customer`
    #[serde(rename = "where")]
    pub route: String,

    /// Caller id and relevant field values
    #[serde(rename = "what")]
    pub context: String,
}

impl CallLogEntry {
    /// Create an entry stamped with the current local time
    pub fn now(route: impl Into<String>, context: impl Into<String>) -> Self {
        Self::at(&Local::now(), route, context)
    }

    /// Create an entry stamped with the given time
    pub fn at<Tz>(time: &DateTime<Tz>, route: impl Into<String>, context: impl Into<String>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            when: time.format(WHEN_FORMAT).to_string(),
            route: route.into(),
            context: context.into(),
        }
    }
}
