use notekit_types::{InteractionEvent, Interactive, NoteDetail, reconcile};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

const EVENT_CAPACITY: usize = 64;

/// Anything holding copies of subjects that must follow interaction events.
pub trait Observer {
    /// Apply `event`; returns how many entries changed.
    fn apply_event(&mut self, event: &InteractionEvent) -> usize;
}

impl<S: Interactive> Observer for Vec<S> {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        reconcile(self, event)
    }
}

impl Observer for NoteDetail {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        reconcile(std::slice::from_mut(self), event)
    }
}

/// Fan-out of interaction events to every subscriber.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<InteractionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Deliver to current subscribers. Having none is fine.
    pub fn publish(&self, event: InteractionEvent) {
        let current = event.current();
        tracing::debug!(
            subject = %current.id,
            kind = %current.kind,
            revert = event.is_revert(),
            receivers = self.sender.receiver_count(),
            "publishing interaction event"
        );
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InteractionEvent> {
        self.sender.subscribe()
    }
}

/// Receiver wrapper that skips over lag instead of failing.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<InteractionEvent>,
}

impl From<broadcast::Receiver<InteractionEvent>> for Subscription {
    fn from(receiver: broadcast::Receiver<InteractionEvent>) -> Self {
        Self { receiver }
    }
}

impl Subscription {
    /// Next event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<InteractionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "observer lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Apply every event already queued, without waiting.
    pub fn drain_into<O: Observer + ?Sized>(&mut self, observer: &mut O) -> usize {
        let mut updated = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => updated += observer.apply_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "observer lagged, events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return updated,
            }
        }
    }
}
