use std::fmt::Debug;

use log::trace;

use crate::{
    db_types::{Contract, ContractStatus},
    mkt_api::errors::MarketplaceError,
    ContractManagement,
    ContractQueryFilter,
};

/// Contract queries, always scoped to the profile asking.
pub struct ContractApi<B> {
    db: B,
}

impl<B: Debug> Debug for ContractApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContractApi ({:?})", self.db)
    }
}

impl<B> ContractApi<B>
where B: ContractManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Returns the contract, but only if `profile_id` is the client or the contractor on it. Otherwise the result is
    /// the same as for a contract that does not exist.
    pub async fn contract_for_profile(
        &self,
        contract_id: i64,
        profile_id: i64,
    ) -> Result<Option<Contract>, MarketplaceError> {
        let filter = ContractQueryFilter::default().with_id(contract_id).with_party(profile_id);
        let contract = self.db.fetch_contracts(filter).await?.into_iter().next();
        trace!("📝️ Contract #{contract_id} for profile #{profile_id}: {}", contract.is_some());
        Ok(contract)
    }

    /// All contracts that `profile_id` is a party to, that have not been terminated. Ordered by id.
    pub async fn active_contracts_for_profile(&self, profile_id: i64) -> Result<Vec<Contract>, MarketplaceError> {
        let filter = ContractQueryFilter::default().with_party(profile_id).excluding_status(ContractStatus::Terminated);
        self.db.fetch_contracts(filter).await
    }
}
