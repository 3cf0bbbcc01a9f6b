use mkt_common::Money;

use crate::{db_types::Profile, mkt_api::errors::MarketplaceError};

#[allow(async_fn_in_trait)]
pub trait ProfileManagement {
    /// Fetches the profile with the given id. If no such profile exists, `None` is returned.
    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<Profile>, MarketplaceError>;

    /// Sums the prices of every unpaid job on contracts where the given profile is the client.
    ///
    /// Returns `None` if the client has no unpaid jobs at all.
    async fn fetch_outstanding_total_for_client(&self, client_id: i64) -> Result<Option<Money>, MarketplaceError>;

    /// Adds `amount` to the profile's balance and returns the updated profile, or `None` if the profile does not exist.
    ///
    /// No policy checks are made here. See [`crate::AccountApi::deposit`].
    async fn credit_balance(&self, profile_id: i64, amount: Money) -> Result<Option<Profile>, MarketplaceError>;
}
