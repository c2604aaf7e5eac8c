pub mod create;
pub mod create_batch;
pub mod delete;
pub mod list;
pub mod locales;
pub mod validate;

use achievements_core::{config::Config, BulkDeleter, GroupIdCache, Reconciler};
use anyhow::{Context, Result};
use connect_client::ConnectClient;
use std::future::Future;
use std::path::Path;

/// Everything a remote command needs, built once per process.
pub struct Session {
    pub config: Config,
    pub client: ConnectClient,
    pub cache: GroupIdCache,
}

impl Session {
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = Config::load(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?;
        let client = ConnectClient::new(config.api_base(), config.token())
            .context("failed to build HTTP client")?;
        tracing::debug!(app_id = %config.app_id, api = %client.base_url(), "session ready");
        Ok(Self {
            config,
            client,
            cache: GroupIdCache::new(),
        })
    }

    pub fn reconciler(&self) -> Reconciler<'_, ConnectClient> {
        Reconciler::new(&self.client, &self.cache, &self.config.app_id)
    }

    pub fn deleter(&self) -> BulkDeleter<'_, ConnectClient> {
        BulkDeleter::new(&self.client, &self.cache, &self.config.app_id)
            .with_pacing(self.config.pacing())
    }
}

/// Drive `fut` on a single-threaded runtime; remote calls are strictly serial.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    Ok(rt.block_on(fut))
}
