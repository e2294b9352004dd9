/// Visual weight of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Neutral,
}

/// Transient, auto-dismissing, non-blocking user notifications.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, kind: NoticeKind);

    /// A blocking spinner should appear. `label` defaults to a generic text.
    fn loading(&self, _label: Option<&str>) {}

    /// The spinner started by `loading` should disappear.
    fn loaded(&self) {}
}

/// Notifier that drops everything; for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn show(&self, message: &str, kind: NoticeKind) {
        tracing::debug!(?kind, message, "notice suppressed");
    }
}
