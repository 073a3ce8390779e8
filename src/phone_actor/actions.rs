//! Custom actions for the Phone actor.
//!
//! Operations on a [`Phone`](crate::model::Phone) beyond CRUD: listing state and price
//! recomputation. They are handled by the phone's
//! [`Record::handle_action`](record_actor::Record::handle_action).

use crate::listing::ListingReceipt;
use crate::model::Platform;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub enum PhoneAction {
    /// Lists the phone if every listing rule passes.
    ///
    /// # Errors
    /// Fails with the first rule that rejects the listing.
    List(Platform),
    /// Removes a listing. Never fails for a phone that exists.
    Unlist(Platform),
    /// Recomputes `platform_prices` from the current base price and overrides.
    Reprice,
}

/// Results from PhoneActions - variants match 1:1 with PhoneAction
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneActionResult {
    List(ListingReceipt),
    /// `removed` is false when the phone was not listed there.
    Unlist { platform: Platform, removed: bool },
    Reprice {
        prices: BTreeMap<Platform, Decimal>,
        changed: bool,
    },
}
