//! Publish/subscribe notifications for layout progress.
//!
//! An [`EventBus`] is owned by each engine. Listeners subscribe to a single
//! [`LayoutEventKind`] and are called synchronously, in subscription order,
//! whenever the engine emits an event of that kind. Delivery is
//! fire-and-forget: listeners cannot influence the operation.

use std::fmt;

use indexmap::IndexMap;
use log::trace;

use crate::{config::LayoutConfig, error::LayoutError, layout::LayoutResult};

/// A notification emitted by the engine.
#[derive(Debug, Clone, Copy)]
pub enum LayoutEvent<'a> {
    Started(&'a LayoutConfig),
    Completed(&'a LayoutResult),
    Failed(&'a LayoutError),
    Optimized(&'a LayoutResult),
}

impl LayoutEvent<'_> {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::Started(_) => LayoutEventKind::Started,
            LayoutEvent::Completed(_) => LayoutEventKind::Completed,
            LayoutEvent::Failed(_) => LayoutEventKind::Failed,
            LayoutEvent::Optimized(_) => LayoutEventKind::Optimized,
        }
    }
}

/// Event names listeners subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    Started,
    Completed,
    Failed,
    Optimized,
}

impl LayoutEventKind {
    /// Conventional event name, e.g. `layout:started`.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutEventKind::Started => "layout:started",
            LayoutEventKind::Completed => "layout:completed",
            LayoutEventKind::Failed => "layout:failed",
            LayoutEventKind::Optimized => "layout:optimized",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&LayoutEvent<'_>)>;

/// Per-kind lists of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: IndexMap<LayoutEventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: LayoutEventKind, listener: F) -> ListenerId
    where
        F: FnMut(&LayoutEvent<'_>) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(listener_id, _)| *listener_id == id) {
                drop(listeners.remove(index));
                return true;
            }
        }
        false
    }

    /// Delivers `event` to every listener of its kind.
    pub fn emit(&mut self, event: LayoutEvent<'_>) {
        let kind = event.kind();
        let Some(listeners) = self.listeners.get_mut(&kind) else {
            return;
        };
        trace!(event = kind.as_str(), listeners = listeners.len(); "Emitting layout event");
        for (_, listener) in listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn listener_count(&self, kind: LayoutEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (kind.as_str(), listeners.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn test_emit_reaches_matching_listeners() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        bus.subscribe(LayoutEventKind::Started, move |event| {
            sink.borrow_mut().push(event.kind());
        });
        let sink = Rc::clone(&seen);
        bus.subscribe(LayoutEventKind::Completed, move |event| {
            sink.borrow_mut().push(event.kind());
        });

        let config = LayoutConfig::new("hierarchical");
        bus.emit(LayoutEvent::Started(&config));
        bus.emit(LayoutEvent::Failed(&LayoutError::MissingAlgorithm));

        assert_eq!(*seen.borrow(), vec![LayoutEventKind::Started]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = bus.subscribe(LayoutEventKind::Completed, move |_| *sink.borrow_mut() += 1);
        assert_eq!(bus.listener_count(LayoutEventKind::Completed), 1);

        let result = LayoutResult::default();
        bus.emit(LayoutEvent::Completed(&result));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(LayoutEvent::Completed(&result));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count(LayoutEventKind::Completed), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(LayoutEventKind::Started.as_str(), "layout:started");
        assert_eq!(LayoutEventKind::Optimized.as_str(), "layout:optimized");
    }
}
