//! # Log Client
//!
//! Appends to and reads from the action log actor.
use crate::log_actor::LogError;
use crate::model::{ActionKind, ActionLogEntry, LogCreate};
use async_trait::async_trait;
use record_actor::{DomainClient, FrameworkError, RecordClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct LogClient {
    inner: RecordClient<ActionLogEntry>,
}

impl LogClient {
    pub fn new(inner: RecordClient<ActionLogEntry>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DomainClient<ActionLogEntry> for LogClient {
    type Error = LogError;

    fn inner(&self) -> &RecordClient<ActionLogEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<LogError>()
            .unwrap_or_else(|e| LogError::ActorCommunication(e.to_string()))
    }
}

impl LogClient {
    #[instrument(skip(self))]
    pub async fn append(&self, entry: LogCreate) -> Result<ActionLogEntry, LogError> {
        debug!("Sending request");
        self.inner.create(entry).await.map_err(Self::map_error)
    }

    pub async fn record(
        &self,
        action: ActionKind,
        details: impl Into<String>,
    ) -> Result<ActionLogEntry, LogError> {
        self.append(LogCreate::new(action, details)).await
    }

    /// The newest `limit` entries, newest first.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: usize) -> Result<Vec<ActionLogEntry>, LogError> {
        debug!("Sending request");
        let entries = self.list().await?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }
}
