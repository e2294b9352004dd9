use crate::Result;
use crate::config::Config;
use crate::interaction::InteractionController;
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::services::{
    AuthService, CommentService, FeedService, NoteService, ProfileService, PublishService,
    SearchService, ServiceContext,
};
use crate::session::Session;
use crate::storage::{CredentialStore, FileCredentialStore};
use crate::transport::{HttpTransport, Transport};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_FILE: &str = "config.toml";
pub const CREDENTIALS_FILE: &str = "session.json";

/// Entry point wiring one session, transport and notifier into the
/// interaction controller and the page services.
pub struct NoteKit {
    ctx: ServiceContext,
    interactions: InteractionController,
    comments: Arc<CommentService>,
    profile: Arc<ProfileService>,
    data_dir: Option<PathBuf>,
}

impl NoteKit {
    pub fn new(
        config: Config,
        session: Session,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let interactions = InteractionController::new(
            session.clone(),
            transport.clone(),
            notifier.clone(),
            &config,
        );
        let ctx = ServiceContext::new(session, transport, notifier, Arc::new(config));
        Self {
            comments: Arc::new(CommentService::new(ctx.clone())),
            profile: Arc::new(ProfileService::new(ctx.clone())),
            ctx,
            interactions,
            data_dir: None,
        }
    }

    /// HTTP-backed client over any credential store.
    pub fn connect(
        config: Config,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;
        let session = Session::new(store, navigator);
        let transport = HttpTransport::new(&config, session.clone(), notifier.clone())?;
        Ok(Self::new(config, session, Arc::new(transport), notifier))
    }

    /// Client rooted at a data directory: `config.toml` (defaults when
    /// absent) and the credential file `session.json`.
    pub fn open(
        data_dir: impl Into<PathBuf>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
        Self::open_with_config(data_dir, config, navigator, notifier)
    }

    /// Like [`open`](Self::open) with an already loaded config.
    pub fn open_with_config(
        data_dir: impl Into<PathBuf>,
        config: Config,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let data_dir = data_dir.into();
        let store = FileCredentialStore::open(data_dir.join(CREDENTIALS_FILE))?;
        tracing::debug!(
            data_dir = %data_dir.display(),
            base_url = %config.base_url,
            "opening notekit"
        );

        let mut client = Self::connect(config, Arc::new(store), navigator, notifier)?;
        client.data_dir = Some(data_dir);
        Ok(client)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.ctx.notifier
    }

    pub fn interactions(&self) -> &InteractionController {
        &self.interactions
    }

    pub fn feed(&self) -> FeedService {
        FeedService::new(self.ctx.clone())
    }

    pub fn notes(&self) -> NoteService {
        NoteService::new(self.ctx.clone())
    }

    pub fn comments(&self) -> Arc<CommentService> {
        self.comments.clone()
    }

    pub fn search(&self) -> SearchService {
        SearchService::new(self.ctx.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.ctx.clone())
    }

    pub fn profile(&self) -> Arc<ProfileService> {
        self.profile.clone()
    }

    pub fn publish(&self) -> PublishService {
        PublishService::new(self.ctx.clone())
    }
}
