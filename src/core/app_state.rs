//! Application state - Central state management for the console

use std::sync::{Arc, RwLock};

use anyhow::Result;
use tokio::runtime::Handle;
use tracing::{info, warn};

use super::disk_store::DiskStore;
use super::settings::{Settings, DAEMON_URL_ENV};
use super::vm_store::VmStore;
use crate::daemon::DaemonClient;
use crate::persistence::Database;

/// Central application state
pub struct AppState {
    /// Virtual disks created this session
    pub disks: DiskStore,
    /// Virtual machines created this session
    pub machines: VmStore,
    /// Application settings
    pub settings: Arc<RwLock<Settings>>,
    /// Database connection
    pub database: Arc<Database>,
    /// Client for the container daemon, rebuilt when its settings change
    client: Arc<RwLock<DaemonClient>>,
    /// Runtime that daemon requests are spawned on
    runtime: Handle,
}

impl AppState {
    /// Create a new application state, honouring `VIRTUAL_MANAGER_DAEMON_URL`
    pub fn new(database: Database, runtime: Handle) -> Result<Self> {
        Self::with_daemon_override(database, runtime, Settings::env_daemon_override())
    }

    /// Create a new application state whose startup client targets `daemon_override`
    /// when it is usable. The override never reaches the stored settings.
    pub fn with_daemon_override(
        database: Database,
        runtime: Handle,
        daemon_override: Option<String>,
    ) -> Result<Self> {
        let mut settings = database.load_settings()?.unwrap_or_default();
        let timeout = settings.request_timeout();

        let overridden = daemon_override.and_then(|url| match DaemonClient::new(&url, timeout) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Ignoring {}={}: {}", DAEMON_URL_ENV, url, e);
                None
            }
        });

        let client = match overridden {
            Some(client) => client,
            None => match DaemonClient::new(&settings.daemon_url, timeout) {
                Ok(client) => client,
                Err(e) => {
                    // A bad stored URL must not keep the console from starting
                    let fallback = Settings::default().daemon_url;
                    warn!(
                        "Stored daemon URL {} is unusable ({}), falling back to {}",
                        settings.daemon_url, e, fallback
                    );
                    settings.daemon_url = fallback;
                    DaemonClient::new(&settings.daemon_url, timeout)?
                }
            },
        };
        info!("Daemon client targeting {}", client.base_url());

        Ok(Self {
            disks: DiskStore::new(),
            machines: VmStore::new(),
            settings: Arc::new(RwLock::new(settings)),
            database: Arc::new(database),
            client: Arc::new(RwLock::new(client)),
            runtime,
        })
    }

    /// Current daemon client
    pub fn client(&self) -> DaemonClient {
        self.client
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Validate settings and rebuild the daemon client, persisting only when
    /// the new URL is usable. On error nothing is stored and the old client stays.
    pub fn save_settings(&self) -> Result<()> {
        let snapshot = {
            let mut settings = self
                .settings
                .write()
                .map_err(|e| anyhow::anyhow!("Settings lock poisoned: {}", e))?;
            settings.validate();
            settings.clone()
        };

        let client = DaemonClient::new(&snapshot.daemon_url, snapshot.request_timeout())
            .map_err(|e| {
                warn!("Settings not saved, keeping previous daemon client: {}", e);
                e
            })?;

        self.database.save_settings(&snapshot)?;

        info!("Daemon client now targeting {}", client.base_url());
        *self
            .client
            .write()
            .map_err(|e| anyhow::anyhow!("Client lock poisoned: {}", e))? = client;
        Ok(())
    }

    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            disks: self.disks.clone(),
            machines: self.machines.clone(),
            settings: Arc::clone(&self.settings),
            database: Arc::clone(&self.database),
            client: Arc::clone(&self.client),
            runtime: self.runtime.clone(),
        }
    }
}
