use crate::{
    db_types::Job,
    mkt_api::errors::MarketplaceError,
    JobPayment,
    JobQueryFilter,
};

#[allow(async_fn_in_trait)]
pub trait JobManagement {
    /// Fetches every job matching the filter, ordered by id.
    async fn fetch_jobs(&self, filter: JobQueryFilter) -> Result<Vec<Job>, MarketplaceError>;

    /// Settles a job in a single atomic transaction:
    /// * the job is marked as paid, with the current time as its payment date. If the job is already paid, the
    ///   transaction aborts with [`MarketplaceError::JobAlreadyPaid`].
    /// * the client's balance is reduced by `amount`. If the client cannot cover it, the transaction aborts with
    ///   [`MarketplaceError::InsufficientFunds`].
    /// * the contractor's balance is increased by `amount`.
    ///
    /// Either all three changes are committed, or none are. The paid job is returned.
    async fn pay_job(&self, payment: JobPayment) -> Result<Job, MarketplaceError>;
}
