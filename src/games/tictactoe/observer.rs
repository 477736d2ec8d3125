//! Change notifications for presentation layers.

use super::{Phase, RoundInfo, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// State change emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A square changed, including resets back to empty.
    CellChanged {
        /// Board index.
        index: usize,
        /// New contents.
        square: Square,
    },
    /// Phase or round changed.
    StatusChanged {
        /// New phase.
        phase: Phase,
        /// Round details for display.
        info: RoundInfo,
    },
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent) + Send>;

/// Registry of event handlers, called in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    handlers: BTreeMap<SubscriptionId, Handler>,
}

impl Observers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` and returns its handle.
    #[instrument(skip_all)]
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.insert(id, Box::new(handler));
        debug!(?id, "Observer subscribed");
        id
    }

    /// Removes a handler. Returns false for an unknown handle.
    #[instrument(skip(self))]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    /// Delivers `event` to every handler.
    pub fn notify_all(&mut self, event: &GameEvent) {
        for handler in self.handlers.values_mut() {
            handler(event);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribed", &self.handlers.len())
            .finish()
    }
}
