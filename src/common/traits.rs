//! Observer traits for the service fabric
//!
//! A service owns keyed state and a [`ListenerSet`]. When a mutation
//! produces new or changed public state, the service calls
//! `ListenerSet::notify`, which invokes every registered listener's
//! `process_add` synchronously, in registration order. The mutation must
//! always precede the notification.

/// Observer registered on a service for a value type `V`
///
/// Listeners receive values by immutable borrow and must never mutate the
/// publisher's stored state. `process_remove` and `process_update` are part
/// of the interface but unused by this system, so they default to no-ops.
pub trait ServiceListener<V>: Send {
    /// Process an add event from the service
    fn process_add(&mut self, data: &V);

    /// Process a remove event from the service
    fn process_remove(&mut self, _data: &V) {}

    /// Process an update event from the service
    fn process_update(&mut self, _data: &V) {}
}

/// Ordered set of listeners owned by a service
pub struct ListenerSet<V> {
    listeners: Vec<Box<dyn ServiceListener<V>>>,
}

impl<V> ListenerSet<V> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener; notification order follows registration order
    pub fn add(&mut self, listener: Box<dyn ServiceListener<V>>) {
        self.listeners.push(listener);
    }

    /// Invoke every listener's add callback synchronously
    pub fn notify(&mut self, data: &V) {
        for listener in &mut self.listeners {
            listener.process_add(data);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<V> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
