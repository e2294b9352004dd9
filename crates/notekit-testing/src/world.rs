//! TestWorld pattern for wiring the runtime to scripted collaborators.

use crate::fixtures::TEST_TOKEN;
use crate::recorders::{RecordingNavigator, RecordingNotifier};
use crate::transport::ScriptedTransport;
use notekit_runtime::config::Config;
use notekit_runtime::interaction::InteractionController;
use notekit_runtime::storage::MemoryCredentialStore;
use notekit_runtime::{NoteKit, Session};
use notekit_types::InteractionEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Declarative test environment.
///
/// # Example
/// ```no_run
/// use notekit_testing::TestWorld;
///
/// let world = TestWorld::signed_in();
/// world.transport.respond("/likesAndCollect/like", serde_json::json!({"status": true}));
/// let kit = world.client();
/// ```
pub struct TestWorld {
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: Arc<MemoryCredentialStore>,
    pub config: Config,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Signed-out environment with default configuration.
    pub fn new() -> Self {
        Self {
            transport: Arc::new(ScriptedTransport::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            navigator: Arc::new(RecordingNavigator::new()),
            store: Arc::new(MemoryCredentialStore::new()),
            config: Config::default(),
        }
    }

    pub fn signed_in() -> Self {
        Self {
            store: Arc::new(MemoryCredentialStore::with_token(TEST_TOKEN)),
            ..Self::new()
        }
    }

    pub fn with_config(mut self, configure: impl FnOnce(&mut Config)) -> Self {
        configure(&mut self.config);
        self
    }

    pub fn session(&self) -> Session {
        Session::new(self.store.clone(), self.navigator.clone())
    }

    /// A fresh controller. Clone it to share its busy guard and event bus.
    pub fn controller(&self) -> InteractionController {
        InteractionController::new(
            self.session(),
            self.transport.clone(),
            self.notifier.clone(),
            &self.config,
        )
    }

    pub fn client(&self) -> NoteKit {
        NoteKit::new(
            self.config.clone(),
            self.session(),
            self.transport.clone(),
            self.notifier.clone(),
        )
    }
}

/// Everything currently queued on a receiver.
pub fn drain(receiver: &mut broadcast::Receiver<InteractionEvent>) -> Vec<InteractionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
