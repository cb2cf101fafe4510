//! Serializable registry introspection.
//!
//! These types are intentionally serializable so a registry snapshot can be
//! dumped to logs or wired into any observability sink. A snapshot is a
//! point-in-time copy: producing one never fires handlers and never mutates
//! the registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::subscriber::SubscriptionId;

/// A firing policy and its counters, as observed at snapshot time.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyState {
    /// Fires on every notification.
    Always,

    /// Fires until `fired` reaches `amount`; an entry with `fired == amount`
    /// is registered but permanently silent.
    CountLimited { amount: usize, fired: usize },

    /// Fires on every `frequency`-th notification; `calls` counts progress
    /// toward the next firing.
    FrequencyLimited { frequency: usize, calls: usize },
}

/// One registered subscription, handler elided.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberInfo {
    pub id: SubscriptionId,
    pub policy: PolicyState,
}

/// The full registry shape at a point in time.
///
/// Keyed by exact event name; the map is ordered for stable reports, the
/// per-event sequences preserve registry insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterSnapshot {
    /// Registered event names and their subscriber sequences.
    pub events: BTreeMap<String, Vec<SubscriberInfo>>,
}

impl EmitterSnapshot {
    /// Total number of registered subscribers across all event names.
    #[must_use]
    pub fn subscriber_total(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }
}
