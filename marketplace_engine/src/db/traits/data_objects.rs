use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mkt_common::Money;
use sqlx::FromRow;

use crate::{
    db_types::{ContractStatus, Profile},
    mkt_api::errors::MarketplaceError,
};

//--------------------------------------  ContractQueryFilter  -------------------------------------------------------
/// Criteria for selecting contracts. Every populated field narrows the result; an empty filter selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractQueryFilter {
    pub id: Option<i64>,
    /// Matches contracts where this profile is either the client or the contractor.
    pub party: Option<i64>,
    pub excluded_statuses: Vec<ContractStatus>,
}

impl ContractQueryFilter {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_party(mut self, profile_id: i64) -> Self {
        self.party = Some(profile_id);
        self
    }

    pub fn excluding_status(mut self, status: ContractStatus) -> Self {
        self.excluded_statuses.push(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.party.is_none() && self.excluded_statuses.is_empty()
    }
}

impl Display for ContractQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "All contracts");
        }
        let mut parts = vec![];
        if let Some(id) = self.id {
            parts.push(format!("id: {id}"));
        }
        if let Some(party) = self.party {
            parts.push(format!("party: {party}"));
        }
        if !self.excluded_statuses.is_empty() {
            let statuses = self.excluded_statuses.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(",");
            parts.push(format!("status not in [{statuses}]"));
        }
        write!(f, "{}", parts.join(", "))
    }
}

//--------------------------------------     JobQueryFilter    -------------------------------------------------------
/// Criteria for selecting jobs. Contract-level criteria (`party`, `client_id`) apply to the contract the job is billed
/// against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQueryFilter {
    pub id: Option<i64>,
    pub party: Option<i64>,
    pub client_id: Option<i64>,
    /// Selects every job that is not paid, including those whose paid flag was never set.
    pub unpaid_only: bool,
}

impl JobQueryFilter {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_party(mut self, profile_id: i64) -> Self {
        self.party = Some(profile_id);
        self
    }

    pub fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn unpaid(mut self) -> Self {
        self.unpaid_only = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.party.is_none() && self.client_id.is_none() && !self.unpaid_only
    }
}

impl Display for JobQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "All jobs");
        }
        let mut parts = vec![];
        if let Some(id) = self.id {
            parts.push(format!("id: {id}"));
        }
        if let Some(party) = self.party {
            parts.push(format!("party: {party}"));
        }
        if let Some(client_id) = self.client_id {
            parts.push(format!("client: {client_id}"));
        }
        if self.unpaid_only {
            parts.push("unpaid".to_string());
        }
        write!(f, "{}", parts.join(", "))
    }
}

//--------------------------------------       DateRange       -------------------------------------------------------
/// An inclusive period of time, used to select jobs by payment date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, MarketplaceError> {
        if start > end {
            return Err(MarketplaceError::InvalidQuery(format!("The period start ({start}) is after its end ({end})")));
        }
        Ok(Self { start, end })
    }

    /// Parses a period from user-supplied strings.
    ///
    /// Accepted formats are RFC 3339 timestamps (`2020-08-15T19:11:26Z`), naive timestamps in UTC
    /// (`2020-08-15 19:11:26`) and plain dates (`2020-08-15`). A plain date for `start` means the start of that day,
    /// while a plain date for `end` includes the whole day.
    pub fn parse(start: &str, end: &str) -> Result<Self, MarketplaceError> {
        let start = parse_timestamp(start, false)?;
        let end = parse_timestamp(end, true)?;
        Self::new(start, end)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn parse_timestamp(s: &str, end_of_day: bool) -> Result<DateTime<Utc>, MarketplaceError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Utc.from_utc_datetime(&dt));
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| MarketplaceError::InvalidQuery(format!("'{s}' is not a valid date or timestamp. {e}")))?;
    let dt = if end_of_day { date.and_hms_milli_opt(23, 59, 59, 999) } else { date.and_hms_opt(0, 0, 0) };
    dt.map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| MarketplaceError::InvalidQuery(format!("'{s}' cannot be converted to a timestamp")))
}

//--------------------------------------       JobPayment      -------------------------------------------------------
/// Everything a backend needs to settle a job: the balance moves `amount` from the client to the contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPayment {
    pub job_id: i64,
    pub client_id: i64,
    pub contractor_id: i64,
    pub amount: Money,
}

//--------------------------------------     Report rows       -------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContractorEarnings {
    #[sqlx(flatten)]
    pub contractor: Profile,
    pub total_earned: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ClientSpending {
    #[sqlx(flatten)]
    pub client: Profile,
    pub total_paid: Money,
}
