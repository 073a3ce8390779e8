//! # Phone Client
//!
//! High-level API for the phone actor. Single-phone operations are one request each; the bulk
//! operations (`bulk_import`, `bulk_list`, `update_all_prices`) are client-side sequences of
//! independent requests, so one phone failing never stops or undoes the rest. Each bulk run
//! appends one summary entry to the action log.
use crate::analytics::{paginate, DashboardAnalytics, PhoneFilter, PhonePage, PhoneQuery};
use crate::clients::LogClient;
use crate::import::{BulkImportOutcome, ImportRejection, ImportRow};
use crate::listing::{BulkListOutcome, ListingReceipt};
use crate::model::{ActionKind, ActionLogEntry, Phone, PhoneCreate, PhoneId, PhoneUpdate, Platform};
use crate::phone_actor::{PhoneAction, PhoneActionResult, PhoneError};
use async_trait::async_trait;
use record_actor::{DomainClient, FrameworkError, RecordClient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Phone actor.
#[derive(Clone)]
pub struct PhoneClient {
    inner: RecordClient<Phone>,
    log: LogClient,
}

/// Tally of a batch price recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdateOutcome {
    pub repriced: usize,
    /// Phones whose prices actually moved.
    pub changed: usize,
    /// Phones that vanished or failed mid-batch.
    pub failed: usize,
}

#[async_trait]
impl DomainClient<Phone> for PhoneClient {
    type Error = PhoneError;

    fn inner(&self) -> &RecordClient<Phone> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<PhoneError>()
            .unwrap_or_else(|e| PhoneError::ActorCommunication(e.to_string()))
    }

    /// Removes the phone with its listings. Its log entries are kept.
    #[instrument(skip(self))]
    async fn delete(&self, id: PhoneId) -> Result<Phone, PhoneError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(Self::for_phone(id))
    }
}

impl PhoneClient {
    pub fn new(inner: RecordClient<Phone>, log: LogClient) -> Self {
        Self { inner, log }
    }

    /// Error mapping for requests addressed to one phone.
    fn for_phone(id: PhoneId) -> impl Fn(FrameworkError) -> PhoneError {
        move |e| match e {
            FrameworkError::NotFound(_) => PhoneError::NotFound(id),
            other => Self::map_error(other),
        }
    }

    async fn log_summary(&self, action: ActionKind, details: String) {
        if let Err(e) = self.log.record(action, details).await {
            warn!(error = %e, %action, "Action log append failed");
        }
    }

    #[instrument(skip(self))]
    pub async fn create_phone(&self, params: PhoneCreate) -> Result<Phone, PhoneError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_phone(&self, id: PhoneId) -> Result<Phone, PhoneError> {
        debug!("Sending request");
        self.get(id).await?.ok_or(PhoneError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_phone(&self, id: PhoneId, update: PhoneUpdate) -> Result<Phone, PhoneError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(Self::for_phone(id))
    }

    pub async fn delete_phone(&self, id: PhoneId) -> Result<Phone, PhoneError> {
        self.delete(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Phone>, PhoneError> {
        self.list().await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &PhoneQuery) -> Result<PhonePage, PhoneError> {
        debug!("Sending request");
        let filter = query.filter.clone();
        let matched = self
            .inner
            .list_where(move |phone| filter.matches(phone))
            .await
            .map_err(Self::map_error)?;
        Ok(paginate(matched, query.skip, query.limit))
    }

    #[instrument(skip(self))]
    pub async fn analytics(&self, filter: &PhoneFilter) -> Result<DashboardAnalytics, PhoneError> {
        debug!("Sending request");
        let filter = filter.clone();
        let matched = self
            .inner
            .list_where(move |phone| filter.matches(phone))
            .await
            .map_err(Self::map_error)?;
        Ok(DashboardAnalytics::summarize(&matched))
    }

    /// The newest `limit` action log entries, newest first.
    pub async fn logs(&self, limit: usize) -> Result<Vec<ActionLogEntry>, PhoneError> {
        Ok(self.log.recent(limit).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_on_platform(
        &self,
        id: PhoneId,
        platform: Platform,
    ) -> Result<ListingReceipt, PhoneError> {
        debug!("Listing phone {} on platform {}", id, platform);
        match self
            .inner
            .perform_action(id, PhoneAction::List(platform))
            .await
        {
            Ok(PhoneActionResult::List(receipt)) => Ok(receipt),
            Ok(_) => unreachable!("List action must return List result"),
            Err(e) => Err(Self::for_phone(id)(e)),
        }
    }

    /// Returns whether the phone was listed there.
    #[instrument(skip(self))]
    pub async fn unlist_from_platform(
        &self,
        id: PhoneId,
        platform: Platform,
    ) -> Result<bool, PhoneError> {
        debug!("Unlisting phone {} from platform {}", id, platform);
        match self
            .inner
            .perform_action(id, PhoneAction::Unlist(platform))
            .await
        {
            Ok(PhoneActionResult::Unlist { removed, .. }) => Ok(removed),
            Ok(_) => unreachable!("Unlist action must return Unlist result"),
            Err(e) => Err(Self::for_phone(id)(e)),
        }
    }

    /// Recomputes one phone's platform prices and returns them.
    #[instrument(skip(self))]
    pub async fn reprice(&self, id: PhoneId) -> Result<BTreeMap<Platform, Decimal>, PhoneError> {
        debug!("Repricing phone {}", id);
        self.reprice_inner(id).await.map(|(prices, _)| prices)
    }

    async fn reprice_inner(
        &self,
        id: PhoneId,
    ) -> Result<(BTreeMap<Platform, Decimal>, bool), PhoneError> {
        match self.inner.perform_action(id, PhoneAction::Reprice).await {
            Ok(PhoneActionResult::Reprice { prices, changed }) => Ok((prices, changed)),
            Ok(_) => unreachable!("Reprice action must return Reprice result"),
            Err(e) => Err(Self::for_phone(id)(e)),
        }
    }

    /// Recomputes every phone's platform prices, one request per phone.
    #[instrument(skip(self))]
    pub async fn update_all_prices(&self) -> Result<PriceUpdateOutcome, PhoneError> {
        let phones = self.list().await?;
        let mut outcome = PriceUpdateOutcome::default();

        for phone in phones {
            match self.reprice_inner(phone.id).await {
                Ok((_, changed)) => {
                    outcome.repriced += 1;
                    if changed {
                        outcome.changed += 1;
                    }
                }
                Err(e) => {
                    warn!(phone_id = %phone.id, error = %e, "Reprice failed");
                    outcome.failed += 1;
                }
            }
        }

        info!(
            repriced = outcome.repriced,
            changed = outcome.changed,
            failed = outcome.failed,
            "Price update finished"
        );
        self.log_summary(
            ActionKind::PriceUpdate,
            format!(
                "Prices recalculated for {} phones ({} changed, {} failed).",
                outcome.repriced, outcome.changed, outcome.failed
            ),
        )
        .await;
        Ok(outcome)
    }

    /// Creates one phone per valid row. Rows are numbered from 1 in the outcome.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn bulk_import(&self, rows: Vec<ImportRow>) -> BulkImportOutcome {
        let mut outcome = BulkImportOutcome::default();

        for (index, row) in rows.into_iter().enumerate() {
            let result = match row.to_create() {
                Ok(params) => self.create_phone(params).await,
                Err(errors) => Err(PhoneError::Validation(errors)),
            };
            match result {
                Ok(phone) => outcome.created.push(phone),
                Err(reason) => {
                    debug!(row = index + 1, error = %reason, "Row rejected");
                    outcome.rejected.push(ImportRejection {
                        row: index + 1,
                        input: row,
                        reason,
                    });
                }
            }
        }

        info!(
            created = outcome.created.len(),
            rejected = outcome.rejected.len(),
            "Bulk import finished"
        );
        self.log_summary(
            ActionKind::BulkImport,
            format!(
                "Bulk upload: {} phones created, {} rows rejected.",
                outcome.created.len(),
                outcome.rejected.len()
            ),
        )
        .await;
        outcome
    }

    /// Tries to list every phone matching `filter`. Each phone succeeds or fails on its own.
    #[instrument(skip(self))]
    pub async fn bulk_list(
        &self,
        filter: &PhoneFilter,
        platform: Platform,
    ) -> Result<BulkListOutcome, PhoneError> {
        let selection = filter.clone();
        let phones = self
            .inner
            .list_where(move |phone| selection.matches(phone))
            .await
            .map_err(Self::map_error)?;
        let mut outcome = BulkListOutcome::default();

        for phone in phones {
            match self.list_on_platform(phone.id, platform).await {
                Ok(_) => outcome.success += 1,
                Err(e) => {
                    debug!(phone_id = %phone.id, error = %e, "Listing skipped");
                    outcome.failed += 1;
                }
            }
        }

        info!(
            %platform,
            success = outcome.success,
            failed = outcome.failed,
            "Bulk listing finished"
        );
        self.log_summary(
            ActionKind::BulkList,
            format!(
                "Bulk listing on platform {}: {} listed, {} failed.",
                platform, outcome.success, outcome.failed
            ),
        )
        .await;
        Ok(outcome)
    }
}
