use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Window-level events a view can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    KeyPress,
    Scroll,
    TouchStart,
    Resize,
    Focus,
    Blur,
}

/// Events that count as user activity for the session watchdog.
pub const ACTIVITY_EVENTS: [EventKind; 5] = [
    EventKind::MouseDown,
    EventKind::MouseMove,
    EventKind::KeyPress,
    EventKind::Scroll,
    EventKind::TouchStart,
];

impl EventKind {
    pub fn is_activity(self) -> bool {
        ACTIVITY_EVENTS.contains(&self)
    }
}

pub type Listener = Arc<dyn Fn(EventKind) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
}

/// Global event target of one browsing context.
///
/// Listeners run synchronously on [`dispatch`](Self::dispatch), outside the
/// registry lock, so a listener may add or remove listeners itself.
#[derive(Clone, Default)]
pub struct EventTarget {
    registry: Arc<Mutex<Registry>>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let mut registry = self.registry();
        registry.next_id += 1;
        let id = ListenerId(registry.next_id);
        registry.listeners.push((id, kind, listener));
        id
    }

    /// Returns `false` if the listener was already gone.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registry = self.registry();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.registry().listeners.len()
    }

    /// Invokes every listener registered for `kind`; returns how many ran.
    pub fn dispatch(&self, kind: EventKind) -> usize {
        let matching: Vec<Listener> = self
            .registry()
            .listeners
            .iter()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();

        for listener in &matching {
            listener(kind);
        }
        matching.len()
    }
}
