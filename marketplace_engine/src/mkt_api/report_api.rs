use std::fmt::Debug;

use log::debug;

use crate::{
    mkt_api::{
        errors::MarketplaceError,
        report_objects::{BestClient, BestProfession},
    },
    DateRange,
    ReportManagement,
};

/// Admin reports over the jobs paid in a given period.
pub struct ReportApi<B> {
    db: B,
}

impl<B: Debug> Debug for ReportApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReportApi ({:?})", self.db)
    }
}

impl<B> ReportApi<B>
where B: ReportManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// The contractor who earned the most in the period, or `None` if no jobs were paid in it.
    pub async fn best_profession(&self, period: DateRange) -> Result<Option<BestProfession>, MarketplaceError> {
        let best = self.db.fetch_top_contractors(period, 1).await?.into_iter().next().map(BestProfession::from);
        if let Some(b) = &best {
            debug!("📊️ Best professional for {period}: #{} with {}", b.professional.id, b.total_earned);
        }
        Ok(best)
    }

    /// The `limit` clients who paid the most in the period, biggest spender first.
    pub async fn best_clients(&self, period: DateRange, limit: u32) -> Result<Vec<BestClient>, MarketplaceError> {
        if limit == 0 {
            return Err(MarketplaceError::InvalidQuery("The limit must be at least 1".into()));
        }
        let clients = self.db.fetch_top_clients(period, limit).await?;
        Ok(clients.into_iter().map(BestClient::from).collect())
    }
}
