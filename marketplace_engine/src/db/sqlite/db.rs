//! `SqliteDatabase` is the SQLite implementation of the marketplace backend.
//!
//! It implements every trait in the [`crate::db::traits`] module. Read operations borrow a pooled connection for the
//! duration of a single query. Writes run inside a transaction that is committed before the method returns.
//! [`JobManagement::pay_job`] opens its transaction before the first write, and it is rolled back automatically if it
//! is dropped without being committed.
use std::fmt::Debug;

use log::*;
use mkt_common::Money;
use sqlx::SqlitePool;

use super::{contracts, create_database_if_missing, jobs, new_pool, profiles, reports, SqliteDatabaseError};
use crate::{
    db_types::{Contract, Job, Profile},
    mkt_api::errors::MarketplaceError,
    ClientSpending,
    ContractManagement,
    ContractQueryFilter,
    ContractorEarnings,
    DateRange,
    JobManagement,
    JobPayment,
    JobQueryFilter,
    ProfileManagement,
    ReportManagement,
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    /// Creates the database file if necessary, then connects to it.
    pub async fn create_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        create_database_if_missing(url).await?;
        Self::new_with_url(url, max_connections).await
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the embedded migrations. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete for {}", self.url);
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl ProfileManagement for SqliteDatabase {
    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<Profile>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let profile = profiles::fetch_profile(profile_id, &mut conn).await?;
        Ok(profile)
    }

    async fn fetch_outstanding_total_for_client(&self, client_id: i64) -> Result<Option<Money>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let total = profiles::outstanding_total_for_client(client_id, &mut conn).await?;
        Ok(total)
    }

    async fn credit_balance(&self, profile_id: i64, amount: Money) -> Result<Option<Profile>, MarketplaceError> {
        let mut tx = self.pool.begin().await.map_err(SqliteDatabaseError::from)?;
        let profile = profiles::credit_balance(profile_id, amount, &mut tx).await?;
        tx.commit().await.map_err(SqliteDatabaseError::from)?;
        if let Some(p) = &profile {
            debug!("🗃️ Profile #{profile_id} balance is now {}", p.balance);
        }
        Ok(profile)
    }
}

impl ContractManagement for SqliteDatabase {
    async fn fetch_contracts(&self, filter: ContractQueryFilter) -> Result<Vec<Contract>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let contracts = contracts::fetch_contracts(filter, &mut conn).await?;
        Ok(contracts)
    }
}

impl JobManagement for SqliteDatabase {
    async fn fetch_jobs(&self, filter: JobQueryFilter) -> Result<Vec<Job>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let jobs = jobs::fetch_jobs(filter, &mut conn).await?;
        Ok(jobs)
    }

    /// Settles a job in a single atomic transaction:
    /// * the job is flagged as paid, with the current time as its payment date. This only succeeds if the job was
    ///   not already paid, so it also serialises concurrent attempts to pay the same job.
    /// * the client's balance is reduced by the amount, provided it can cover it.
    /// * the contractor's balance is increased by the amount.
    ///
    /// If any step fails, the transaction is rolled back and no changes are persisted.
    async fn pay_job(&self, payment: JobPayment) -> Result<Job, MarketplaceError> {
        let mut tx = self.pool.begin().await.map_err(SqliteDatabaseError::from)?;
        let job = jobs::pay_job(&payment, &mut tx).await.map_err(|e| {
            warn!("🗃️ Payment for job #{} failed and will be rolled back. {e}", payment.job_id);
            e
        })?;
        tx.commit().await.map_err(SqliteDatabaseError::from)?;
        info!("🗃️ Job #{} has been paid. {} transferred to contractor #{}", job.id, payment.amount, payment.contractor_id);
        Ok(job)
    }
}

impl ReportManagement for SqliteDatabase {
    async fn fetch_top_contractors(
        &self,
        period: DateRange,
        limit: u32,
    ) -> Result<Vec<ContractorEarnings>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let rows = reports::top_contractors(period, limit, &mut conn).await?;
        Ok(rows)
    }

    async fn fetch_top_clients(&self, period: DateRange, limit: u32) -> Result<Vec<ClientSpending>, MarketplaceError> {
        let mut conn = self.pool.acquire().await.map_err(SqliteDatabaseError::from)?;
        let rows = reports::top_clients(period, limit, &mut conn).await?;
        Ok(rows)
    }
}
