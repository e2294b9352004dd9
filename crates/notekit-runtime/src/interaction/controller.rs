use super::events::{EventBus, Subscription};
use super::guard::BusyRegistry;
use crate::config::Config;
use crate::notify::{NoticeKind, Notifier};
use crate::session::Session;
use crate::transport::{ApiRequest, RequestOptions, SIGN_IN_PROMPT, TIMED_OUT, Transport};
use notekit_types::{
    ApiResponse, InteractionEvent, InteractionKind, InteractionState, Interactive, SubjectId,
    SubjectSnapshot,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

pub const INVALID_SUBJECT: &str = "Invalid subject";

/// Why a toggle was refused before anything changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SignInRequired,
    InvalidSubject,
}

/// What a toggle ended up doing. User-facing reporting has already happened
/// through the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Server accepted the change; the optimistic state stands.
    Confirmed(InteractionState),
    /// Confirmation failed; the subject is back at `restored`.
    RolledBack {
        restored: InteractionState,
        message: String,
    },
    /// A toggle of the same kind on the same subject was still pending.
    Suppressed,
    Rejected(Rejection),
}

impl ToggleOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ToggleOutcome::Confirmed(_))
    }
}

/// Optimistic like/collect/follow toggling with rollback.
///
/// Cloning shares the busy registry and the event bus, so every clone guards
/// and notifies the same set of observers.
#[derive(Clone)]
pub struct InteractionController {
    inner: Arc<Inner>,
}

struct Inner {
    session: Session,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    busy: BusyRegistry,
    events: EventBus,
    confirm_timeout: Duration,
    sign_in_redirect_delay: Duration,
}

impl InteractionController {
    pub fn new(
        session: Session,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                session,
                transport,
                notifier,
                busy: BusyRegistry::new(),
                events: EventBus::new(),
                confirm_timeout: config.confirm_timeout(),
                sign_in_redirect_delay: config.sign_in_redirect_delay(),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InteractionEvent> {
        self.inner.events.subscribe()
    }

    /// Subscription that tolerates lag; see [`Subscription::drain_into`].
    pub fn watch(&self) -> Subscription {
        Subscription::from(self.subscribe())
    }

    pub fn is_busy(&self, id: &SubjectId, kind: InteractionKind) -> bool {
        self.inner.busy.is_busy(&(id.clone(), kind))
    }

    /// Flip `kind` on `subject` now, confirm with the server, and undo the
    /// flip if confirmation fails or times out.
    ///
    /// `subject` is mutated synchronously before the call is issued and,
    /// on failure, again before this returns. Other holders of the same
    /// subject are updated through the event bus.
    ///
    /// Dropping the future while the call is pending publishes `Reverted`,
    /// so observers roll back. `subject` itself keeps the applied state; the
    /// caller owns it and should refetch or discard it.
    pub async fn toggle<S>(&self, subject: &mut S, kind: InteractionKind) -> ToggleOutcome
    where
        S: Interactive + ?Sized,
    {
        let inner = &self.inner;

        if !inner.session.is_signed_in() {
            inner.notifier.show(SIGN_IN_PROMPT, NoticeKind::Neutral);
            inner
                .session
                .redirect_to_sign_in(inner.sign_in_redirect_delay);
            return ToggleOutcome::Rejected(Rejection::SignInRequired);
        }

        let Some(previous) = subject.snapshot(kind).filter(|s| !s.id.is_empty()) else {
            inner.notifier.show(INVALID_SUBJECT, NoticeKind::Neutral);
            return ToggleOutcome::Rejected(Rejection::InvalidSubject);
        };

        let Some(_busy) = inner.busy.try_acquire((previous.id.clone(), kind)) else {
            tracing::debug!(subject = %previous.id, %kind, "toggle already pending");
            return ToggleOutcome::Suppressed;
        };

        let next = previous.state.toggled();
        subject.set_interaction(kind, next);
        let applied = SubjectSnapshot {
            state: next,
            ..previous.clone()
        };
        tracing::debug!(
            subject = %previous.id,
            %kind,
            active = next.active,
            "applied optimistically"
        );
        inner.events.publish(InteractionEvent::Applied {
            current: applied.clone(),
            previous: previous.clone(),
        });
        let mut pending = PendingRevert::new(&inner.events, &previous, &applied);

        let request = confirm_request(kind, &previous.id);
        let confirmation =
            tokio::time::timeout(inner.confirm_timeout, inner.transport.send(request));
        let failure = match confirmation.await {
            Ok(Ok(ApiResponse::Success { .. })) => None,
            Ok(Ok(ApiResponse::Failure { message, .. })) => Some(message),
            Ok(Err(err)) => Some(err.user_message()),
            Err(_) => Some(TIMED_OUT.to_string()),
        };
        pending.disarm();

        match failure {
            None => {
                tracing::info!(
                    subject = %previous.id,
                    %kind,
                    active = next.active,
                    "toggle confirmed"
                );
                inner
                    .notifier
                    .show(success_message(kind, next.active), NoticeKind::Success);
                ToggleOutcome::Confirmed(next)
            }
            Some(message) => {
                tracing::warn!(
                    subject = %previous.id,
                    %kind,
                    reason = %message,
                    "toggle rolled back"
                );
                subject.set_interaction(kind, previous.state);
                inner.events.publish(InteractionEvent::Reverted {
                    current: previous.clone(),
                    previous: applied,
                });
                inner.notifier.show(&message, NoticeKind::Neutral);
                ToggleOutcome::RolledBack {
                    restored: previous.state,
                    message,
                }
            }
        }
    }
}

/// Publishes `Reverted` on drop unless disarmed once the confirmation
/// settled.
struct PendingRevert<'a> {
    events: &'a EventBus,
    event: Option<InteractionEvent>,
}

impl<'a> PendingRevert<'a> {
    fn new(events: &'a EventBus, previous: &SubjectSnapshot, applied: &SubjectSnapshot) -> Self {
        Self {
            events,
            event: Some(InteractionEvent::Reverted {
                current: previous.clone(),
                previous: applied.clone(),
            }),
        }
    }

    fn disarm(&mut self) {
        self.event = None;
    }
}

impl Drop for PendingRevert<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            tracing::warn!(subject = %event.current().id, "toggle cancelled before confirmation");
            self.events.publish(event);
        }
    }
}

/// Confirming call for one toggle. The controller reports on its own, so the
/// transport stays quiet.
pub fn confirm_request(kind: InteractionKind, id: &SubjectId) -> ApiRequest {
    let request = match kind {
        InteractionKind::Like => {
            ApiRequest::post("/likesAndCollect/like").payload(json!({ "noteId": id }))
        }
        InteractionKind::Collect => {
            ApiRequest::post("/likesAndCollect/collect").payload(json!({ "noteId": id }))
        }
        InteractionKind::Follow => {
            ApiRequest::post("/follow").payload(json!({ "followingId": id }))
        }
    };
    request.options(RequestOptions::default().with_spinner(false).with_toast(false))
}

pub fn success_message(kind: InteractionKind, active: bool) -> &'static str {
    match (kind, active) {
        (InteractionKind::Like, true) => "Liked",
        (InteractionKind::Like, false) => "Like removed",
        (InteractionKind::Collect, true) => "Collected",
        (InteractionKind::Collect, false) => "Removed from collection",
        (InteractionKind::Follow, true) => "Followed",
        (InteractionKind::Follow, false) => "Unfollowed",
    }
}
