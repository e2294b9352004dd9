pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod interaction;
pub mod navigation;
pub mod notify;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod transport;

pub use client::NoteKit;
pub use config::{Config, resolve_data_dir};
pub use error::{Error, Result};
pub use format::{format_comment_time, format_comment_time_now};
pub use interaction::{InteractionController, Observer, Rejection, Subscription, ToggleOutcome};
pub use navigation::{Navigator, Route};
pub use notify::{NoticeKind, Notifier, SilentNotifier};
pub use session::Session;
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use transport::{
    ApiRequest, HttpTransport, Method, RequestOptions, Transport, TransportError,
    TransportResult, UploadRequest,
};
