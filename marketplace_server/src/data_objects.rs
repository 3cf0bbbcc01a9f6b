use mkt_common::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DepositRequest {
    #[serde(rename = "amountToDeposit")]
    pub amount_to_deposit: Money,
}

/// Query string for the admin reports. `limit` is only used by the best-clients report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQueryParams {
    pub start: String,
    pub end: String,
    pub limit: Option<u32>,
}
