use mkt_common::Money;
use thiserror::Error;

/// Every outcome of a marketplace operation that is not a success.
///
/// Backends report driver failures as [`MarketplaceError::DatabaseError`]; the remaining variants describe business
/// rule violations, which callers are expected to translate into their own error vocabulary.
#[derive(Debug, Clone, Error)]
pub enum MarketplaceError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Profile #{0} does not exist")]
    ProfileNotFound(i64),
    #[error("Job #{0} does not exist, or does not belong to the caller")]
    JobNotFound(i64),
    #[error("Profile #{0} is not a client")]
    NotAClient(i64),
    #[error("Profile #{profile_id} cannot cover a payment of {price}")]
    InsufficientFunds { profile_id: i64, price: Money },
    #[error("Job #{0} has already been paid")]
    JobAlreadyPaid(i64),
    #[error("Client #{0} has no outstanding jobs to deposit against")]
    NoOutstandingJobs(i64),
    #[error("A deposit of {amount} exceeds the limit of {limit}")]
    DepositLimitExceeded { amount: Money, limit: Money },
    #[error("Invalid amount: {0}. Amounts must be positive")]
    InvalidAmount(Money),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Payment transaction aborted: {0}")]
    PaymentAborted(String),
}
