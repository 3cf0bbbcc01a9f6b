use mkt_common::Money;
use thiserror::Error;

use crate::mkt_api::errors::MarketplaceError;

#[derive(Debug, Error)]
pub enum SqliteDatabaseError {
    #[error("Database connection error: {0}")]
    DriverError(#[from] sqlx::Error),
    #[error("Could not run database migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Job #{0} is already paid")]
    JobAlreadyPaid(i64),
    #[error("Profile #{profile_id} has insufficient funds to cover {amount}")]
    InsufficientFunds { profile_id: i64, amount: Money },
    #[error("Profile #{0} could not be credited")]
    CreditFailed(i64),
}

impl From<SqliteDatabaseError> for MarketplaceError {
    fn from(e: SqliteDatabaseError) -> Self {
        match e {
            SqliteDatabaseError::JobAlreadyPaid(id) => Self::JobAlreadyPaid(id),
            SqliteDatabaseError::InsufficientFunds { profile_id, amount } => {
                Self::InsufficientFunds { profile_id, price: amount }
            },
            SqliteDatabaseError::CreditFailed(_) => Self::PaymentAborted(e.to_string()),
            SqliteDatabaseError::DriverError(_) | SqliteDatabaseError::MigrationError(_) => {
                Self::DatabaseError(e.to_string())
            },
        }
    }
}
