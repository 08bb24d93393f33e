//! Locale change notifications.
//!
//! Listeners run synchronously on the thread that changed the locale, after
//! the change is stored. The registry lock is released before any listener
//! runs, so listeners may subscribe, unsubscribe or translate.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

/// Which locale slot changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleEvent {
    LocaleCode,
    Fallback,
}

impl LocaleEvent {
    pub fn name(self) -> &'static str {
        match self {
            LocaleEvent::LocaleCode => "localeCode",
            LocaleEvent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for LocaleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Called with `(new_code, old_code)`.
type Listener = Arc<dyn Fn(&str, &str) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, LocaleEvent, Listener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Listener registry for locale and fallback changes.
#[derive(Clone, Default)]
pub struct LocaleEvents {
    registry: Arc<Mutex<Registry>>,
}

impl LocaleEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every change of the `event` slot.
    ///
    /// The listener stays registered until [`Subscription::unsubscribe`] is
    /// called; dropping the handle does not remove it.
    pub fn on_change(
        &self,
        event: LocaleEvent,
        callback: impl Fn(&str, &str) + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, event, Arc::new(callback)));
        Subscription {
            id,
            event,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notify every listener of `event`, in registration order.
    pub fn trigger(&self, event: LocaleEvent, new_code: &str, old_code: &str) {
        let listeners: Vec<Listener> = lock(&self.registry)
            .listeners
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        trace!(
            event = %event,
            new = %new_code,
            old = %old_code,
            listeners = listeners.len(),
            "locale change"
        );
        for listener in listeners {
            listener(new_code, old_code);
        }
    }

    pub fn listener_count(&self, event: LocaleEvent) -> usize {
        lock(&self.registry)
            .listeners
            .iter()
            .filter(|(_, e, _)| *e == event)
            .count()
    }

    /// Drop every listener.
    pub fn clear(&self) {
        lock(&self.registry).listeners.clear();
    }
}

impl fmt::Debug for LocaleEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = lock(&self.registry).listeners.len();
        f.debug_struct("LocaleEvents")
            .field("listeners", &listeners)
            .finish()
    }
}

/// Handle to a registered listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    event: LocaleEvent,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn event(&self) -> LocaleEvent {
        self.event
    }

    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = lock(&registry)
            .listeners
            .iter()
            .any(|(id, _, _)| *id == self.id);
        active
    }

    /// Remove the listener. A no-op if it is already gone.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry)
                .listeners
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}
