//! Listener registry: named events, one-shot entries and synchronous dispatch

use crate::error::{EmitterError, Operation};
use crate::listener::Listener;
use crate::validation::{count_listeners, has_event, is_valid_event_name};
use compact_str::CompactString;
use parking_lot::{Mutex, MutexGuard};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, trace};

/// Listener list for one event name, in registration order.
pub type ListenerList<A> = SmallVec<[Listener<A>; 4]>;

/// Event name to entry mapping held by a [`Registry`].
pub type Subscriptions<A> = HashMap<CompactString, EventEntry<A>>;

/// Listeners for one event name plus the run-once flag shared by all of them.
pub struct EventEntry<A> {
    pub listeners: ListenerList<A>,
    pub run_once: bool,
}

impl<A> Default for EventEntry<A> {
    fn default() -> Self {
        Self {
            listeners: SmallVec::new(),
            run_once: false,
        }
    }
}

/// Which listeners an `off` call removes.
pub enum Unsubscribe<A = serde_json::Value> {
    /// Every listener for the event, flag included
    All,
    /// Every registration of this listener, by identity
    One(Listener<A>),
}

impl<A> Clone for Unsubscribe<A> {
    fn clone(&self) -> Self {
        match self {
            Unsubscribe::All => Unsubscribe::All,
            Unsubscribe::One(listener) => Unsubscribe::One(listener.clone()),
        }
    }
}

impl<A> fmt::Debug for Unsubscribe<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsubscribe::All => f.write_str("All"),
            Unsubscribe::One(listener) => f.debug_tuple("One").field(listener).finish(),
        }
    }
}

/// Mapping from event name to listeners.
///
/// All methods take `&self`. The mapping sits behind a single mutex that is
/// held only while it is read or mutated and never while a listener runs, so
/// listeners may call back into the registry during dispatch.
pub struct Registry<A = serde_json::Value> {
    subscriptions: Mutex<Subscriptions<A>>,
}

impl<A> Registry<A> {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Subscriptions<A>> {
        self.subscriptions.lock()
    }

    fn check_name(operation: Operation, event_name: &str) -> Result<(), EmitterError> {
        if is_valid_event_name(event_name) {
            Ok(())
        } else {
            Err(EmitterError::event_name(operation, format!("{event_name:?}")))
        }
    }

    /// Appends `listener` to `event_name` and sets the entry's run-once flag.
    ///
    /// The flag belongs to the whole entry: the latest registration decides
    /// whether every listener of the event is dropped after the next dispatch.
    ///
    /// Returns the number of listeners for `event_name` after the append.
    pub fn subscribe(
        &self,
        event_name: &str,
        listener: Listener<A>,
        once: bool,
    ) -> Result<usize, EmitterError> {
        let operation = if once { Operation::Once } else { Operation::On };
        Self::check_name(operation, event_name)?;

        let mut subscriptions = self.lock();
        let entry = subscriptions
            .entry(CompactString::new(event_name))
            .or_default();
        entry.listeners.push(listener);
        entry.run_once = once;
        let count = entry.listeners.len();

        debug!(event = event_name, once, count, "📝 Registered listener");
        Ok(count)
    }

    /// Registers a listener that stays until removed.
    pub fn on(&self, event_name: &str, listener: Listener<A>) -> Result<usize, EmitterError> {
        self.subscribe(event_name, listener, false)
    }

    /// Registers a listener and marks the event one-shot.
    pub fn once(&self, event_name: &str, listener: Listener<A>) -> Result<usize, EmitterError> {
        self.subscribe(event_name, listener, true)
    }

    /// Calls every listener of `event_name` with `args`, in registration order.
    ///
    /// The listener list is copied before the first call: registrations and
    /// removals made by a listener apply to later triggers only. A one-shot
    /// event is removed once every listener has run.
    ///
    /// The first listener error aborts the pass and is returned as-is. The
    /// remaining listeners are skipped and a one-shot event is kept.
    ///
    /// Returns `Ok(false)` without calling anything when the event has no
    /// listeners.
    pub fn trigger(&self, event_name: &str, args: &[A]) -> Result<bool, EmitterError> {
        Self::check_name(Operation::Trigger, event_name)?;

        let (snapshot, run_once) = {
            let subscriptions = self.lock();
            match subscriptions.get(event_name) {
                Some(entry) if !entry.listeners.is_empty() => {
                    (entry.listeners.clone(), entry.run_once)
                }
                _ => {
                    trace!(event = event_name, "No listeners for event");
                    return Ok(false);
                }
            }
        };

        debug!(
            event = event_name,
            listeners = snapshot.len(),
            args = args.len(),
            "📤 Triggering event"
        );

        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(e) = listener.call(args) {
                error!(event = event_name, index, "❌ Listener failed: {}", e);
                return Err(e);
            }
        }

        if run_once {
            self.lock().remove(event_name);
            debug!(event = event_name, "One-shot event removed after dispatch");
        }

        Ok(true)
    }

    /// Removes listeners from `event_name`.
    ///
    /// [`Unsubscribe::All`] drops the entry and returns 0.
    /// [`Unsubscribe::One`] drops every registration of that listener,
    /// keeps the others and the run-once flag, and returns what is left.
    /// An entry left empty is pruned.
    pub fn unsubscribe(
        &self,
        event_name: &str,
        which: Unsubscribe<A>,
    ) -> Result<usize, EmitterError> {
        Self::check_name(Operation::Off, event_name)?;

        let mut subscriptions = self.lock();
        match which {
            Unsubscribe::All => {
                if subscriptions.remove(event_name).is_some() {
                    debug!(event = event_name, "🗑️ Removed all listeners");
                }
            }
            Unsubscribe::One(listener) => {
                if let Some(entry) = subscriptions.get_mut(event_name) {
                    let before = entry.listeners.len();
                    entry.listeners.retain(|registered| !registered.same_as(&listener));
                    debug!(
                        event = event_name,
                        removed = before - entry.listeners.len(),
                        "🗑️ Removed listener"
                    );
                    if entry.listeners.is_empty() {
                        subscriptions.remove(event_name);
                    }
                }
            }
        }

        Ok(count_listeners(event_name, &subscriptions))
    }

    /// Short name for [`Registry::unsubscribe`].
    pub fn off(&self, event_name: &str, which: Unsubscribe<A>) -> Result<usize, EmitterError> {
        self.unsubscribe(event_name, which)
    }

    pub fn off_all(&self, event_name: &str) -> Result<usize, EmitterError> {
        self.unsubscribe(event_name, Unsubscribe::All)
    }

    pub fn off_one(&self, event_name: &str, listener: &Listener<A>) -> Result<usize, EmitterError> {
        self.unsubscribe(event_name, Unsubscribe::One(listener.clone()))
    }

    pub fn has_event(&self, event_name: &str) -> bool {
        has_event(event_name, &self.lock())
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        count_listeners(event_name, &self.lock())
    }

    /// Names of every event that currently has listeners, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().map(|name| name.to_string()).collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every event and listener.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Registry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscriptions = self.lock();
        let mut map = f.debug_map();
        for (name, entry) in subscriptions.iter() {
            map.entry(&name.as_str(), &(entry.listeners.len(), entry.run_once));
        }
        map.finish()
    }
}
