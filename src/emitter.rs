//! The emitter: public subscription API and the bubbling emission algorithm.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::registry::Registry;
use crate::snapshot::EmitterSnapshot;
use crate::subscriber::{Context, FiringPolicy, Handler, Subscriber};

/// A namespaced publish/subscribe event emitter.
///
/// Each emitter owns an independent subscription registry; see the crate
/// docs for the event-name and bubbling semantics. All five operations
/// return `&mut Self` so calls can be chained.
///
/// None of the operations validate event names: names are taken verbatim,
/// dots included, and an emission of an unregistered name is simply silent.
#[derive(Debug)]
pub struct Emitter<C: 'static> {
    registry: Registry<C>,
}

impl<C: 'static> Emitter<C> {
    /// Create an independent emitter with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Subscribe `handler` to `event`, firing on every emission.
    ///
    /// The handler is invoked with `context` borrowed mutably. The same
    /// context value may back any number of subscriptions; it is the
    /// identity key for [`off`](Self::off).
    pub fn on<F>(&mut self, event: &str, context: &Context<C>, handler: F) -> &mut Self
    where
        F: FnMut(&mut C) + 'static,
    {
        self.subscribe(event, context, Box::new(handler), FiringPolicy::Always)
    }

    /// Subscribe `handler` to `event`, firing on at most `times` emissions.
    ///
    /// Once the quota is exhausted the subscription stays registered but is
    /// permanently silent; only [`off`](Self::off) removes it. `times == 0`
    /// means no quota at all and behaves exactly like [`on`](Self::on).
    pub fn several<F>(
        &mut self,
        event: &str,
        context: &Context<C>,
        handler: F,
        times: usize,
    ) -> &mut Self
    where
        F: FnMut(&mut C) + 'static,
    {
        let policy = if times == 0 {
            FiringPolicy::Always
        } else {
            FiringPolicy::count_limited(times)
        };
        self.subscribe(event, context, Box::new(handler), policy)
    }

    /// Subscribe `handler` to `event`, firing on every `frequency`-th
    /// emission (the `frequency`-th, `2 * frequency`-th, and so on).
    ///
    /// `frequency == 0` means no throttling and behaves exactly like
    /// [`on`](Self::on).
    pub fn through<F>(
        &mut self,
        event: &str,
        context: &Context<C>,
        handler: F,
        frequency: usize,
    ) -> &mut Self
    where
        F: FnMut(&mut C) + 'static,
    {
        let policy = if frequency == 0 {
            FiringPolicy::Always
        } else {
            FiringPolicy::frequency_limited(frequency)
        };
        self.subscribe(event, context, Box::new(handler), policy)
    }

    /// Unsubscribe `context` from `event` and from every event nested under
    /// it.
    ///
    /// Nesting follows the dot boundary: `off("a", ..)` detaches matching
    /// subscribers from `"a"`, `"a.b"`, `"a.b.c"`, but never from `"ab"`.
    /// Contexts are compared by pointer identity; two subscriptions sharing
    /// a handler but not a context are independent.
    pub fn off(&mut self, event: &str, context: &Context<C>) -> &mut Self {
        debug!(event, "unsubscribing namespace");
        for key in self.registry.events_under(event) {
            self.registry.unsubscribe(&key, context);
        }
        self
    }

    /// Emit `event`: notify its subscribers in insertion order, then bubble
    /// up through each dot-truncated ancestor (`"a.b.c"` notifies `"a.b.c"`,
    /// then `"a.b"`, then `"a"`).
    ///
    /// Delivery is synchronous, in the caller's control flow. Each namespace
    /// on the chain is visited exactly once, as a literal string key.
    /// Handlers receive only their context; the `&mut self` receiver means a
    /// handler cannot re-enter the emitter.
    ///
    /// # Panics
    ///
    /// A panicking handler is not isolated: the panic unwinds to the caller
    /// and the remaining subscribers and ancestor namespaces of this call do
    /// not fire. Also panics if a context is still borrowed elsewhere when
    /// its handler fires.
    pub fn emit(&mut self, event: &str) -> &mut Self {
        debug!(event, "emit");
        let mut current = event;
        loop {
            trace!(event = current, "notifying namespace");
            self.registry.notify(current);
            let Some(cut) = current.rfind('.') else { break };
            current = &current[..cut];
        }
        self
    }

    /// Number of subscribers registered exactly under `event`, silent ones
    /// included.
    #[must_use]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.registry.subscriber_count(event)
    }

    /// Point-in-time copy of the registry shape. Fires nothing.
    #[must_use]
    pub fn snapshot(&self) -> EmitterSnapshot {
        self.registry.snapshot()
    }

    fn subscribe(
        &mut self,
        event: &str,
        context: &Context<C>,
        handler: Handler<C>,
        policy: FiringPolicy,
    ) -> &mut Self {
        let subscriber = Subscriber::new(Rc::clone(context), handler, policy);
        debug!(event, subscription = %subscriber.id(), policy = ?subscriber.policy_state(), "subscribed");
        self.registry.subscribe(event, subscriber);
        self
    }
}

impl<C: 'static> Default for Emitter<C> {
    fn default() -> Self {
        Self::new()
    }
}
