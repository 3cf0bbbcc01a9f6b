//! Records stored by the marketplace backend.
//!
//! Field names on the wire follow the marketplace's established JSON format (`firstName`, `ClientId`, `paymentDate`
//! and so on), while the database uses snake_case columns.
use std::fmt::Display;

use chrono::{DateTime, Utc};
pub use mkt_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

//--------------------------------------     ProfileType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProfileType {
    Client,
    Contractor,
}

impl Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Contractor => write!(f, "contractor"),
        }
    }
}

//--------------------------------------       Profile       ---------------------------------------------------------
/// A client or contractor account, along with its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub profession: String,
    pub balance: Money,
    #[serde(rename = "type")]
    pub profile_type: ProfileType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_client(&self) -> bool {
        self.profile_type == ProfileType::Client
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

//--------------------------------------   ContractStatus    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ContractStatus {
    New,
    InProgress,
    Terminated,
}

impl Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

//--------------------------------------       Contract      ---------------------------------------------------------
/// An agreement between one client and one contractor. Jobs are billed against a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub terms: String,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "ContractorId")]
    pub contractor_id: i64,
    #[serde(rename = "ClientId")]
    pub client_id: i64,
}

//--------------------------------------         Job         ---------------------------------------------------------
/// A unit of billable work under a contract.
///
/// `paid` is tri-state: jobs that have never been through the payment flow may carry `None` rather than `false`.
/// Both mean "unpaid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub description: String,
    pub price: Money,
    pub paid: Option<bool>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "ContractId")]
    pub contract_id: i64,
}

impl Job {
    pub fn is_paid(&self) -> bool {
        self.paid.unwrap_or(false)
    }
}
