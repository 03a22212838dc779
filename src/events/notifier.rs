//! Outbound notification sinks.
//!
//! The form publishes each [`InputEvent`] through a [`Notifier`]. Any
//! `FnMut(&str, &InputEvent)` closure is a notifier; [`RecordingNotifier`]
//! keeps a shared log for inspection and [`TracingNotifier`] writes events
//! to the `tracing` subscriber.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use super::event::ExternalEvent;
use super::payload::InputEvent;

/// Sink for outbound notifications.
pub trait Notifier {
    /// Publish an event on a topic.
    fn notify(&mut self, topic: &str, event: &InputEvent);
}

impl<F> Notifier for F
where
    F: FnMut(&str, &InputEvent),
{
    fn notify(&mut self, topic: &str, event: &InputEvent) {
        self(topic, event)
    }
}

/// A notifier that records every event into a shared log.
///
/// Clones share the same log, so keep one clone and hand the other to the
/// form.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    events: Rc<RefCell<Vec<(String, InputEvent)>>>,
}

impl RecordingNotifier {
    /// Create a notifier with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<InputEvent> {
        self.events.borrow().iter().map(|(_, e)| e.clone()).collect()
    }

    /// Topics events were published on, oldest first.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.events.borrow().iter().map(|(t, _)| t.clone()).collect()
    }

    /// Event types, oldest first.
    #[must_use]
    pub fn event_types(&self) -> Vec<ExternalEvent> {
        self.events.borrow().iter().map(|(_, e)| e.event_type).collect()
    }

    /// Number of recorded events of one type.
    #[must_use]
    pub fn count(&self, event_type: ExternalEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(_, e)| e.event_type == event_type)
            .count()
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<InputEvent> {
        self.events.borrow().last().map(|(_, e)| e.clone())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, topic: &str, event: &InputEvent) {
        self.events.borrow_mut().push((topic.to_string(), event.clone()));
    }
}

/// A notifier that logs events and drops them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, topic: &str, event: &InputEvent) {
        info!(
            topic,
            event = %event.event_type,
            emitted_by = %event.emitted_by(),
            cards = event.merchant_payload.cards.len(),
            "input event"
        );
    }
}
