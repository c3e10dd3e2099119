//! One-time check of whether tracking can run at all.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::TrackingClient;

/// Outcome of the enablement probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Client present and credential configured.
    Enabled,
    /// No client was supplied.
    ClientMissing,
    /// Client present, but it has no usable credential.
    NotConfigured,
}

/// Cached result of probing the tracking client at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnablementGuard {
    availability: Availability,
}

impl EnablementGuard {
    /// Probe `client` once.
    ///
    /// A missing client disables tracking silently. A client without a
    /// credential disables it with a single warning. Never fails.
    pub fn probe<C: TrackingClient>(client: Option<&C>) -> Self {
        let availability = match client {
            None => Availability::ClientMissing,
            Some(client) => match client.api_key() {
                Ok(Some(key)) if !key.trim().is_empty() => Availability::Enabled,
                Ok(_) => {
                    warn!("Tracking client has no API key configured; trial logging is disabled");
                    Availability::NotConfigured
                }
                Err(e) => {
                    warn!("Tracking client is not configured ({}); trial logging is disabled", e);
                    Availability::NotConfigured
                }
            },
        };
        Self { availability }
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_enabled(&self) -> bool {
        self.availability == Availability::Enabled
    }
}
