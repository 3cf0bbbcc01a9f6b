use mkt_common::Money;
use serde::{Deserialize, Serialize};

use crate::{db_types::Profile, ClientSpending, ContractorEarnings};

/// Number of clients returned by the best-clients report when the caller does not ask for a specific number.
pub const DEFAULT_BEST_CLIENTS_LIMIT: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestProfession {
    #[serde(rename = "totalEarned")]
    pub total_earned: Money,
    pub professional: Profile,
}

impl From<ContractorEarnings> for BestProfession {
    fn from(row: ContractorEarnings) -> Self {
        Self { total_earned: row.total_earned, professional: row.contractor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestClient {
    pub id: i64,
    pub paid: Money,
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl From<ClientSpending> for BestClient {
    fn from(row: ClientSpending) -> Self {
        Self { id: row.client.id, paid: row.total_paid, full_name: row.client.full_name() }
    }
}
