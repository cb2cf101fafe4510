//! Subscription registry and namespace matching.
//!
//! The registry maps exact event-name strings to ordered subscriber
//! sequences. Keys are stored verbatim, dots included; insertion order is
//! invocation order. Namespace containment is decided on the dot boundary,
//! so `"a"` covers `"a.b"` but never `"ab"`.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::snapshot::{EmitterSnapshot, SubscriberInfo};
use crate::subscriber::{Context, Subscriber};

/// True when `event` equals `namespace` or sits strictly inside it.
fn in_namespace(event: &str, namespace: &str) -> bool {
    event == namespace
        || (event.starts_with(namespace) && event.as_bytes().get(namespace.len()) == Some(&b'.'))
}

#[derive(Debug)]
pub(crate) struct Registry<C: 'static> {
    subscribers: HashMap<String, Vec<Subscriber<C>>>,
}

impl<C: 'static> Registry<C> {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Append a subscriber to the sequence keyed by `event`, creating the
    /// sequence if absent.
    pub(crate) fn subscribe(&mut self, event: &str, subscriber: Subscriber<C>) {
        self.subscribers
            .entry(event.to_owned())
            .or_default()
            .push(subscriber);
    }

    /// All registered event names inside `namespace`, including `namespace`
    /// itself when it has subscribers.
    pub(crate) fn events_under(&self, namespace: &str) -> Vec<String> {
        self.subscribers
            .keys()
            .filter(|event| in_namespace(event.as_str(), namespace))
            .cloned()
            .collect()
    }

    /// Drop every subscriber under `event` whose context is pointer-identical
    /// to `context`. Contexts are compared, never handlers.
    pub(crate) fn unsubscribe(&mut self, event: &str, context: &Context<C>) {
        if let Some(subscribers) = self.subscribers.get_mut(event) {
            subscribers.retain(|subscriber| !Rc::ptr_eq(subscriber.context(), context));
        }
    }

    /// Notify the subscribers registered exactly under `event`, in insertion
    /// order. Unknown keys are a no-op.
    pub(crate) fn notify(&mut self, event: &str) {
        if let Some(subscribers) = self.subscribers.get_mut(event) {
            for subscriber in subscribers.iter_mut() {
                subscriber.notify();
            }
        }
    }

    pub(crate) fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers.get(event).map_or(0, Vec::len)
    }

    /// Point-in-time copy of the registry shape. Fires nothing.
    pub(crate) fn snapshot(&self) -> EmitterSnapshot {
        let events: BTreeMap<String, Vec<SubscriberInfo>> = self
            .subscribers
            .iter()
            .map(|(event, subscribers)| {
                let infos = subscribers
                    .iter()
                    .map(|subscriber| SubscriberInfo {
                        id: subscriber.id(),
                        policy: subscriber.policy_state(),
                    })
                    .collect();
                (event.clone(), infos)
            })
            .collect();

        EmitterSnapshot { events }
    }
}
