use crate::{mkt_api::errors::MarketplaceError, ClientSpending, ContractorEarnings, DateRange};

/// Aggregations over paid jobs. Only jobs marked as paid with a payment date inside the (inclusive) range count.
///
/// Results are ordered by the total, largest first. Equal totals are ordered by profile id, lowest first.
#[allow(async_fn_in_trait)]
pub trait ReportManagement {
    async fn fetch_top_contractors(
        &self,
        period: DateRange,
        limit: u32,
    ) -> Result<Vec<ContractorEarnings>, MarketplaceError>;

    async fn fetch_top_clients(&self, period: DateRange, limit: u32) -> Result<Vec<ClientSpending>, MarketplaceError>;
}
