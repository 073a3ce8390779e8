//! [`Record`] implementation for [`ActionLogEntry`].
//!
//! The log is append-only: `create` stamps a new entry, every other mutation is refused.

use super::LogError;
use crate::model::{ActionLogEntry, LogCreate, LogId};
use async_trait::async_trait;
use chrono::Utc;
use record_actor::Record;

/// The log has no custom actions.
#[derive(Debug, Clone)]
pub enum LogAction {}

#[async_trait]
impl Record for ActionLogEntry {
    type Id = LogId;
    type Create = LogCreate;
    type Update = ();
    type Action = LogAction;
    type ActionResult = ();
    type Context = ();
    type Error = LogError;

    fn id(&self) -> LogId {
        self.id
    }

    fn from_create_params(id: LogId, params: LogCreate) -> Result<Self, LogError> {
        Ok(Self {
            id,
            timestamp: Utc::now(),
            action: params.action,
            details: params.details,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), LogError> {
        Err(LogError::Immutable(self.id))
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), LogError> {
        Err(LogError::Immutable(self.id))
    }

    async fn handle_action(&mut self, action: LogAction, _ctx: &()) -> Result<(), LogError> {
        match action {}
    }
}
