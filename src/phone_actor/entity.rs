//! [`Record`] implementation for [`Phone`].
//!
//! Validation happens in `from_create_params` and after every update merge; prices are
//! recomputed whenever the base price or the overrides change. Audit entries are written in
//! `on_committed`, so the log only ever describes changes that reached the store.

use super::{PhoneAction, PhoneActionResult, PhoneContext, PhoneError};
use crate::listing;
use crate::model::{ActionKind, LogCreate, Phone, PhoneCreate, PhoneId, PhoneUpdate};
use crate::validation::{normalize, validate_phone};
use async_trait::async_trait;
use record_actor::{Change, Record};
use tracing::warn;

#[async_trait]
impl Record for Phone {
    type Id = PhoneId;
    type Create = PhoneCreate;
    type Update = PhoneUpdate;
    type Action = PhoneAction;
    type ActionResult = PhoneActionResult;
    type Context = PhoneContext;
    type Error = PhoneError;

    fn id(&self) -> PhoneId {
        self.id
    }

    fn from_create_params(id: PhoneId, params: PhoneCreate) -> Result<Self, PhoneError> {
        let mut phone = Phone::new(id, params);
        let errors = validate_phone(&phone);
        if !errors.is_empty() {
            return Err(PhoneError::Validation(errors));
        }
        normalize(&mut phone);
        Ok(phone)
    }

    async fn on_create(&mut self, ctx: &PhoneContext) -> Result<(), PhoneError> {
        ctx.engine.apply_prices(self);
        Ok(())
    }

    /// Merges the provided fields, then validates the merged phone as a whole.
    ///
    /// Stock changes never touch listings; a phone listed with stock keeps its listings at zero.
    async fn on_update(
        &mut self,
        update: PhoneUpdate,
        ctx: &PhoneContext,
    ) -> Result<(), PhoneError> {
        let reprice = update.touches_prices();

        if let Some(model_name) = update.model_name {
            self.model_name = model_name;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(condition) = update.condition {
            self.condition = condition;
        }
        if let Some(specifications) = update.specifications {
            self.specifications = specifications;
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(base_price) = update.base_price {
            self.base_price = base_price;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(manual_overrides) = update.manual_overrides {
            self.manual_overrides = manual_overrides;
        }

        let errors = validate_phone(self);
        if !errors.is_empty() {
            return Err(PhoneError::Validation(errors));
        }
        normalize(self);
        if reprice {
            ctx.engine.apply_prices(self);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PhoneAction,
        ctx: &PhoneContext,
    ) -> Result<PhoneActionResult, PhoneError> {
        match action {
            PhoneAction::List(platform) => {
                let receipt = listing::try_list(self, platform, &ctx.engine)?;
                Ok(PhoneActionResult::List(receipt))
            }
            PhoneAction::Unlist(platform) => Ok(PhoneActionResult::Unlist {
                platform,
                removed: listing::unlist(self, platform),
            }),
            PhoneAction::Reprice => {
                let changed = ctx.engine.apply_prices(self);
                Ok(PhoneActionResult::Reprice {
                    prices: self.platform_prices.clone(),
                    changed,
                })
            }
        }
    }

    async fn on_committed(&self, change: Change<'_, Self>, ctx: &PhoneContext) {
        let entry = match change {
            Change::Created => LogCreate::new(
                ActionKind::Create,
                format!("New phone '{}' was added.", self.model_name),
            ),
            Change::Updated => LogCreate::new(
                ActionKind::Update,
                format!("Phone ID {} ('{}') was updated.", self.id.0, self.model_name),
            ),
            Change::Deleted => LogCreate::new(
                ActionKind::Delete,
                format!("Phone '{}' (ID: {}) was deleted.", self.model_name, self.id.0),
            ),
            Change::Acted(PhoneActionResult::List(receipt)) => LogCreate::new(
                ActionKind::List,
                format!(
                    "'{}' listed on platform {} at {} as '{}'.",
                    self.model_name, receipt.platform, receipt.price, receipt.condition_label
                ),
            ),
            Change::Acted(PhoneActionResult::Unlist {
                platform,
                removed: true,
            }) => LogCreate::new(
                ActionKind::Unlist,
                format!("'{}' removed from platform {}.", self.model_name, platform),
            ),
            Change::Acted(PhoneActionResult::Reprice { changed: true, .. }) => LogCreate::new(
                ActionKind::Reprice,
                format!("Prices for phone ID {} were recalculated.", self.id.0),
            ),
            // Nothing changed.
            Change::Acted(_) => return,
        };

        if let Err(e) = ctx.log.append(entry).await {
            warn!(phone_id = %self.id, error = %e, "Action log append failed");
        }
    }
}
