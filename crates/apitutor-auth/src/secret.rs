//! Admin secret verification

use std::fmt;

/// Server-side secret gating the maintenance routes
///
/// An unset secret closes the admin routes entirely.
#[derive(Clone, Default)]
pub struct AdminSecret(Option<String>);

impl AdminSecret {
    /// Wrap the configured secret. Blank values count as unset.
    pub fn new(secret: Option<String>) -> Self {
        Self(secret.filter(|s| !s.is_empty()))
    }

    /// Whether any secret is configured
    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Check a presented key against the secret in constant time
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match (self.0.as_deref(), presented) {
            (Some(expected), Some(given)) => constant_time_eq(expected.as_bytes(), given.as_bytes()),
            _ => false,
        }
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_configured() { "set" } else { "unset" };
        f.debug_tuple("AdminSecret").field(&state).finish()
    }
}

/// Compare without short-circuiting on the first differing byte.
///
/// Only the length leaks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
