use crate::types::OutputFormat;
use crate::ui::{ConsoleNavigator, ConsoleNotifier};
use anyhow::Result;
use notekit_runtime::client::CONFIG_FILE;
use notekit_runtime::{Config, NoteKit};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ExecutionContext {
    data_dir: PathBuf,
    pub format: OutputFormat,
    client: OnceCell<NoteKit>,
    config: OnceCell<Config>,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, format: OutputFormat) -> Self {
        Self {
            data_dir,
            format,
            client: OnceCell::new(),
            config: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Ok(Config::load_from(&self.config_path())?))
    }

    /// Client rooted at the data directory, opened on first use.
    ///
    /// Sign-in redirects fire immediately: a command exits long before a
    /// delayed one would run.
    pub fn client(&self) -> Result<&NoteKit> {
        self.client.get_or_try_init(|| {
            let config = immediate_redirects(self.config()?.clone());
            Ok(NoteKit::open_with_config(
                &self.data_dir,
                config,
                Arc::new(ConsoleNavigator::new()),
                Arc::new(ConsoleNotifier::new()),
            )?)
        })
    }
}

fn immediate_redirects(mut config: Config) -> Config {
    config.sign_in_redirect_delay_ms = 0;
    config.unauthorized_redirect_delay_ms = 0;
    config
}
