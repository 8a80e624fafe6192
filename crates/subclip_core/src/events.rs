use crate::types::{Frame, Subclip};
use tokio::sync::mpsc;

/// Player mark changes the form listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkEvent {
    InSet(Frame),
    OutSet(Frame),
}

/// Events the form emits for sibling views.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Subclips were created, updated or deleted. Carries the clips created
    /// by a multi-clip batch, otherwise empty.
    SubclipSaved(Vec<Subclip>),
    /// The host should show the player settings instead of the form.
    ShowSettings,
}

pub type EventSender = mpsc::UnboundedSender<FormEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<FormEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Drain everything currently queued on `rx`.
pub fn drain(rx: &mut EventReceiver) -> Vec<FormEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
