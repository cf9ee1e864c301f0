//! Outbound notification seams for external collaborators.
//!
//! Chat, shortcuts, presence and the rest of the product subscribe to
//! layout changes through these traits; the engine never knows who is
//! listening. Memory implementations are provided for tests and
//! headless use.

use chrono::{DateTime, Utc};

use crate::model::LayoutId;

/// Event emitted after a layout switch is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutChange {
    /// The layout that was active before the switch, if any.
    pub previous_layout: Option<LayoutId>,
    /// Display name of the newly active layout.
    pub new_layout: String,
    /// Id of the newly active layout.
    pub layout_id: LayoutId,
    /// When the switch was accepted.
    pub timestamp: DateTime<Utc>,
}

/// Receives accepted layout switches.
pub trait NotificationSink {
    /// Called once per accepted switch, in acceptance order.
    fn notify(&mut self, change: &LayoutChange);
}

/// Receives key-value context updates (e.g. `("layout", "grid")`).
pub trait ContextSink {
    /// Record or replace the value for `key`.
    fn set(&mut self, key: &str, value: &str);
}

// Shared-handle forms so a caller can keep a handle to a sink it has
// registered with the controller.
impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<std::sync::Mutex<T>> {
    fn notify(&mut self, change: &LayoutChange) {
        if let Ok(mut sink) = self.lock() {
            sink.notify(change);
        }
    }
}

impl<T: ContextSink + ?Sized> ContextSink for std::sync::Arc<std::sync::Mutex<T>> {
    fn set(&mut self, key: &str, value: &str) {
        if let Ok(mut sink) = self.lock() {
            sink.set(key, value);
        }
    }
}

/// In-memory sink capturing every change for later inspection.
#[derive(Debug, Default)]
pub struct MemoryNotifications {
    events: Vec<LayoutChange>,
}

impl MemoryNotifications {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every change received so far, in order.
    pub fn events(&self) -> &[LayoutChange] {
        &self.events
    }
}

impl NotificationSink for MemoryNotifications {
    fn notify(&mut self, change: &LayoutChange) {
        self.events.push(change.clone());
    }
}

/// In-memory context sink capturing every update in arrival order.
#[derive(Debug, Default)]
pub struct MemoryContext {
    entries: Vec<(String, String)>,
}

impl MemoryContext {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(key, value)` update received so far, in order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl ContextSink for MemoryContext {
    fn set(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }
}
