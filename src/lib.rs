//! # Herald - Namespaced publish/subscribe event emitter
//!
//! Herald delivers notifications through dotted-hierarchy event names:
//! emitting `"lecture.slide.funny"` notifies that exact name first, then
//! bubbles up through `"lecture.slide"` and `"lecture"`. Subscriptions come
//! in three variants - unconditional, count-limited, and
//! frequency-throttled - and unsubscription detaches a whole namespace
//! subtree at once.
//!
//! ## Core Concepts
//!
//! - **Event name**: a dot-delimited string naming a channel and,
//!   implicitly, its ancestor namespaces. Names are exact keys: nothing is
//!   trimmed, lowercased, or otherwise normalized.
//! - **Context**: a shared value ([`Context`], an `Rc<RefCell<_>>`) borrowed
//!   mutably by the handler on each firing, and compared by pointer identity
//!   when unsubscribing.
//! - **Subscriber**: a registered (context, handler, firing-policy) triple
//!   attached to exactly one event name.
//! - **Namespace bubbling**: an emission visits the emitted name and each
//!   successively shorter dot-truncated ancestor, exactly once each.
//!
//! Delivery is synchronous and single-threaded: handlers run in the calling
//! control flow, in registration order per name. There is no queue, no
//! worker, and no handler isolation - a panicking handler unwinds straight
//! to the caller of [`Emitter::emit`].
//!
//! ## Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use herald::Emitter;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut emitter = Emitter::new();
//! emitter
//!     .on("lecture.slide", &log, |l| l.push("slide"))
//!     .several("lecture", &log, |l| l.push("lecture"), 1);
//!
//! emitter.emit("lecture.slide");
//! emitter.emit("lecture.slide");
//!
//! // The count-limited subscription fired on the first bubble only.
//! assert_eq!(*log.borrow(), vec!["slide", "lecture", "slide"]);
//! ```
//!
//! ## Diagnostics
//!
//! Every operation emits `tracing` events at debug/trace level, and
//! [`Emitter::snapshot`] produces a serializable copy of the registry shape.
//! Neither is part of the functional contract; no `tracing` subscriber is
//! installed by this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod emitter;
mod registry;
pub mod snapshot;
pub mod subscriber;

// Re-export primary types at crate root for convenience
pub use emitter::Emitter;
pub use snapshot::{EmitterSnapshot, PolicyState, SubscriberInfo};
pub use subscriber::{Context, Handler, SubscriptionId};
