//! Subscriber records and their firing policies.
//!
//! A subscriber is a (context, handler, firing-policy) triple attached to
//! exactly one event name. The policy variants form a closed set expressed as
//! a tagged enum: every notification goes through the single [`notify`] entry
//! point, which asks the policy whether this occurrence fires the handler.
//!
//! [`notify`]: Subscriber::notify

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::snapshot::PolicyState;

/// Shared, identity-compared handler context.
///
/// The same context value may back any number of subscriptions; during
/// unsubscription contexts are compared by pointer identity
/// ([`Rc::ptr_eq`]), never by value.
pub type Context<C> = Rc<RefCell<C>>;

/// Boxed handler invoked with its context borrowed mutably.
pub type Handler<C> = Box<dyn FnMut(&mut C)>;

/// Unique identifier for a subscription.
///
/// Used only in diagnostics (trace output and snapshots), never for lookup.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Decides, per notification, whether the handler fires this time.
///
/// Counters mutate; nothing else about a subscriber does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FiringPolicy {
    /// Every notification fires the handler.
    Always,
    /// Fires until `fired` reaches `amount`, then stays silent.
    CountLimited { amount: usize, fired: usize },
    /// Fires on every `frequency`-th notification.
    FrequencyLimited { frequency: usize, calls: usize },
}

impl FiringPolicy {
    pub(crate) fn count_limited(amount: usize) -> Self {
        Self::CountLimited { amount, fired: 0 }
    }

    pub(crate) fn frequency_limited(frequency: usize) -> Self {
        Self::FrequencyLimited { frequency, calls: 0 }
    }

    /// Record one notification and decide whether it fires the handler.
    fn should_fire(&mut self) -> bool {
        match self {
            Self::Always => true,
            Self::CountLimited { amount, fired } => {
                if *fired < *amount {
                    *fired += 1;
                    true
                } else {
                    false
                }
            }
            Self::FrequencyLimited { frequency, calls } => {
                *calls += 1;
                if *calls == *frequency {
                    *calls = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub(crate) fn state(&self) -> PolicyState {
        match *self {
            Self::Always => PolicyState::Always,
            Self::CountLimited { amount, fired } => PolicyState::CountLimited { amount, fired },
            Self::FrequencyLimited { frequency, calls } => {
                PolicyState::FrequencyLimited { frequency, calls }
            }
        }
    }
}

/// A registered subscription: context, handler, and firing policy.
pub(crate) struct Subscriber<C: 'static> {
    id: SubscriptionId,
    context: Context<C>,
    handler: Handler<C>,
    policy: FiringPolicy,
}

impl<C: 'static> Subscriber<C> {
    pub(crate) fn new(context: Context<C>, handler: Handler<C>, policy: FiringPolicy) -> Self {
        Self {
            id: SubscriptionId::new(),
            context,
            handler,
            policy,
        }
    }

    pub(crate) fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn context(&self) -> &Context<C> {
        &self.context
    }

    pub(crate) fn policy_state(&self) -> PolicyState {
        self.policy.state()
    }

    /// One event occurrence: update the policy, conditionally fire.
    ///
    /// The context is borrowed mutably for the duration of the handler call.
    /// Handler panics propagate to the emitting caller.
    pub(crate) fn notify(&mut self) {
        if !self.policy.should_fire() {
            return;
        }

        trace!(subscription = %self.id, "handler fired");
        let mut context = self.context.borrow_mut();
        (self.handler)(&mut context);
    }
}

impl<C: 'static> fmt::Debug for Subscriber<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
