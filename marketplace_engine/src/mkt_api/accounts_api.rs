//! Profile lookups and deposits.
use std::fmt::Debug;

use log::{debug, trace};
use mkt_common::Money;

use crate::{db_types::Profile, mkt_api::errors::MarketplaceError, ProfileManagement};

/// A deposit may not exceed this fraction of the client's outstanding total, expressed as `numerator / denominator`.
const DEPOSIT_CAP_NUMERATOR: i64 = 5;
const DEPOSIT_CAP_DENOMINATOR: i64 = 4;

pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: ProfileManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches the profile with the given id. If no profile exists, `None` is returned.
    pub async fn profile_by_id(&self, profile_id: i64) -> Result<Option<Profile>, MarketplaceError> {
        self.db.fetch_profile(profile_id).await
    }

    /// Adds `amount` to a client's balance and returns the updated profile.
    ///
    /// The deposit is refused if
    /// * the amount is not positive,
    /// * the profile does not exist or is not a client,
    /// * the client has no unpaid jobs, or
    /// * the amount is more than 125% of the total price of the client's unpaid jobs.
    pub async fn deposit(&self, profile_id: i64, amount: Money) -> Result<Profile, MarketplaceError> {
        if !amount.is_positive() {
            return Err(MarketplaceError::InvalidAmount(amount));
        }
        let profile = self.db.fetch_profile(profile_id).await?.ok_or(MarketplaceError::ProfileNotFound(profile_id))?;
        if !profile.is_client() {
            return Err(MarketplaceError::NotAClient(profile_id));
        }
        let outstanding = self
            .db
            .fetch_outstanding_total_for_client(profile_id)
            .await?
            .filter(Money::is_positive)
            .ok_or(MarketplaceError::NoOutstandingJobs(profile_id))?;
        trace!("💰️ Client #{profile_id} has {outstanding} in unpaid jobs");
        if exceeds_deposit_cap(amount, outstanding) {
            let limit = Money::from_cents(outstanding.cents() * DEPOSIT_CAP_NUMERATOR / DEPOSIT_CAP_DENOMINATOR);
            return Err(MarketplaceError::DepositLimitExceeded { amount, limit });
        }
        let profile =
            self.db.credit_balance(profile_id, amount).await?.ok_or(MarketplaceError::ProfileNotFound(profile_id))?;
        debug!("💰️ Deposited {amount} for client #{profile_id}. New balance: {}", profile.balance);
        Ok(profile)
    }
}

/// Integer form of `amount > 1.25 * outstanding`.
fn exceeds_deposit_cap(amount: Money, outstanding: Money) -> bool {
    amount * DEPOSIT_CAP_DENOMINATOR > outstanding * DEPOSIT_CAP_NUMERATOR
}
