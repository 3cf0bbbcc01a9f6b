use chrono::{TimeZone, Utc};
use marketplace_engine::{
    db_types::{Contract, ContractStatus, Job, Money, Profile, ProfileType},
    traits::{ContractManagement, JobManagement, ProfileManagement, ReportManagement},
    ClientSpending,
    ContractQueryFilter,
    ContractorEarnings,
    DateRange,
    JobPayment,
    JobQueryFilter,
    MarketplaceError,
};
use mockall::mock;

mock! {
    pub Marketplace {}
    impl ProfileManagement for Marketplace {
        async fn fetch_profile(&self, profile_id: i64) -> Result<Option<Profile>, MarketplaceError>;
        async fn fetch_outstanding_total_for_client(&self, client_id: i64) -> Result<Option<Money>, MarketplaceError>;
        async fn credit_balance(&self, profile_id: i64, amount: Money) -> Result<Option<Profile>, MarketplaceError>;
    }
    impl ContractManagement for Marketplace {
        async fn fetch_contracts(&self, filter: ContractQueryFilter) -> Result<Vec<Contract>, MarketplaceError>;
    }
    impl JobManagement for Marketplace {
        async fn fetch_jobs(&self, filter: JobQueryFilter) -> Result<Vec<Job>, MarketplaceError>;
        async fn pay_job(&self, payment: JobPayment) -> Result<Job, MarketplaceError>;
    }
    impl ReportManagement for Marketplace {
        async fn fetch_top_contractors(&self, period: DateRange, limit: u32) -> Result<Vec<ContractorEarnings>, MarketplaceError>;
        async fn fetch_top_clients(&self, period: DateRange, limit: u32) -> Result<Vec<ClientSpending>, MarketplaceError>;
    }
}

// Fixtures shared by the endpoint tests.

pub const HARRY: i64 = 1;
pub const LINUS: i64 = 6;
pub const JOHN: i64 = 7;

pub fn harry() -> Profile {
    Profile {
        id: HARRY,
        first_name: "Harry".into(),
        last_name: "Potter".into(),
        profession: "Wizard".into(),
        balance: Money::from_cents(115_025),
        profile_type: ProfileType::Client,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
    }
}

pub fn linus() -> Profile {
    Profile {
        id: LINUS,
        first_name: "Linus".into(),
        last_name: "Torvalds".into(),
        profession: "Programmer".into(),
        balance: Money::from_cents(136_415),
        profile_type: ProfileType::Contractor,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
    }
}

pub fn contract(id: i64, status: ContractStatus) -> Contract {
    Contract {
        id,
        terms: "bla bla bla".into(),
        status,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        contractor_id: LINUS,
        client_id: HARRY,
    }
}

pub fn job(id: i64, price: Money, paid: Option<bool>) -> Job {
    Job {
        id,
        description: "work".into(),
        price,
        paid,
        payment_date: None,
        created_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap(),
        contract_id: 1,
    }
}

/// A backend that knows about Harry (client) and Linus (contractor), for the identity middleware.
pub fn profiles_backend() -> MockMarketplace {
    let mut backend = MockMarketplace::new();
    backend.expect_fetch_profile().returning(|id| match id {
        HARRY => Ok(Some(harry())),
        LINUS => Ok(Some(linus())),
        _ => Ok(None),
    });
    backend
}
