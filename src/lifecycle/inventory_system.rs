use crate::clients::{LogClient, PhoneClient};
use crate::model::{ActionLogEntry, Phone};
use crate::phone_actor::PhoneContext;
use crate::pricing::{ConfigurationError, PricingEngine};
use crate::settings::{Settings, StorageBackend};
use crate::{log_actor, phone_actor};
use record_actor::{FrameworkError, JsonFileStore, MemoryStore, RecordStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid pricing configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Could not load persisted records: {0}")]
    Hydration(#[from] FrameworkError),
}

/// Owns the running phone and log actors.
///
/// Both actors are hydrated before anything is spawned, so a bad configuration or an unreadable
/// store fails [`start`](Self::start) instead of surfacing later as a closed mailbox.
///
/// # Example
///
/// ```rust
/// use phone_dash::lifecycle::InventorySystem;
/// use phone_dash::pricing::PricingEngine;
/// use record_actor::MemoryStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = InventorySystem::with_stores(
///         PricingEngine::default(),
///         16,
///         MemoryStore::new(),
///         MemoryStore::new(),
///     )
///     .await?;
///
///     assert!(system.phones.list_all().await?.is_empty());
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct InventorySystem {
    /// Client for the phone actor.
    pub phones: PhoneClient,

    /// Client for the action log actor.
    pub logs: LogClient,

    /// Phone actor first: it holds a log client and must stop before the log actor can.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Builds the engine and the stores named in `settings`.
    pub async fn start(settings: &Settings) -> Result<Self, StartupError> {
        let engine = settings.pricing_engine()?;
        let capacity = settings.storage.mailbox_capacity;

        match settings.storage.backend {
            StorageBackend::Memory => {
                info!("Starting with in-memory storage");
                Self::with_stores(engine, capacity, MemoryStore::new(), MemoryStore::new()).await
            }
            StorageBackend::Json => {
                let dir = &settings.storage.data_dir;
                info!(data_dir = %dir.display(), "Starting with JSON storage");
                Self::with_stores(
                    engine,
                    capacity,
                    JsonFileStore::new(dir.join("phones.json")),
                    JsonFileStore::new(dir.join("logs.json")),
                )
                .await
            }
        }
    }

    pub async fn with_stores(
        engine: PricingEngine,
        capacity: usize,
        phone_store: impl RecordStore<Phone> + 'static,
        log_store: impl RecordStore<ActionLogEntry> + 'static,
    ) -> Result<Self, StartupError> {
        let (mut log_actor, logs) = log_actor::new(capacity, log_store);
        let (mut phone_actor, phones) = phone_actor::new(capacity, phone_store, logs.clone());

        let log_count = log_actor.hydrate().await?;
        let phone_count = phone_actor.hydrate().await?;

        let context = PhoneContext::new(Arc::new(engine), logs.clone());
        let phone_handle = tokio::spawn(phone_actor.run(context));
        let log_handle = tokio::spawn(log_actor.run(()));

        info!(phones = phone_count, log_entries = log_count, "System started");
        Ok(Self {
            phones,
            logs,
            handles: vec![phone_handle, log_handle],
        })
    }

    /// Drops the clients and waits for both actors to drain their mailboxes.
    ///
    /// Clones of the clients held elsewhere keep their actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.phones);
        drop(self.logs);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
