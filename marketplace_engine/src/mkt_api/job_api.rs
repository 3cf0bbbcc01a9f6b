//! Job listings and the job payment flow.
use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    db_types::{Job, Profile},
    mkt_api::errors::MarketplaceError,
    ContractManagement,
    ContractQueryFilter,
    JobManagement,
    JobPayment,
    JobQueryFilter,
};

pub struct JobApi<B> {
    db: B,
}

impl<B: Debug> Debug for JobApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JobApi ({:?})", self.db)
    }
}

impl<B> JobApi<B>
where B: JobManagement + ContractManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Jobs that are not paid yet, on any contract `profile_id` is a party to. The status of the contract is not
    /// considered. Ordered by id.
    pub async fn unpaid_jobs_for_profile(&self, profile_id: i64) -> Result<Vec<Job>, MarketplaceError> {
        let filter = JobQueryFilter::default().with_party(profile_id).unpaid();
        self.db.fetch_jobs(filter).await
    }

    /// Pays for a job on behalf of `caller`, moving the job price from the caller's balance to the contractor's.
    ///
    /// The caller must be a client, and the client on the job's contract. Jobs that belong to someone else are
    /// reported as not found. The balance check here is a fast path: the backend repeats it atomically, so a payment
    /// can never overdraw a client even if the balance changed since `caller` was loaded.
    pub async fn pay_for_job(&self, caller: &Profile, job_id: i64) -> Result<Job, MarketplaceError> {
        if !caller.is_client() {
            return Err(MarketplaceError::NotAClient(caller.id));
        }
        let filter = JobQueryFilter::default().with_id(job_id).with_client(caller.id);
        let job = self.db.fetch_jobs(filter).await?.into_iter().next().ok_or(MarketplaceError::JobNotFound(job_id))?;
        if job.is_paid() {
            return Err(MarketplaceError::JobAlreadyPaid(job_id));
        }
        let filter = ContractQueryFilter::default().with_id(job.contract_id);
        let contract =
            self.db.fetch_contracts(filter).await?.into_iter().next().ok_or(MarketplaceError::JobNotFound(job_id))?;
        trace!("💸️ Job #{job_id} is billed against contract #{}", contract.id);
        if caller.balance < job.price {
            debug!("💸️ Client #{} has {} but job #{job_id} costs {}", caller.id, caller.balance, job.price);
            return Err(MarketplaceError::InsufficientFunds { profile_id: caller.id, price: job.price });
        }
        let payment =
            JobPayment { job_id, client_id: caller.id, contractor_id: contract.contractor_id, amount: job.price };
        self.db.pay_job(payment).await
    }
}
