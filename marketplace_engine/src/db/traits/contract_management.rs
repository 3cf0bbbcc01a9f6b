use crate::{db_types::Contract, mkt_api::errors::MarketplaceError, ContractQueryFilter};

#[allow(async_fn_in_trait)]
pub trait ContractManagement {
    /// Fetches every contract matching the filter, ordered by id.
    async fn fetch_contracts(&self, filter: ContractQueryFilter) -> Result<Vec<Contract>, MarketplaceError>;
}
