//! Marketplace Engine
//!
//! The marketplace engine holds the data model and the business rules of a marketplace where clients hire contractors
//! under contracts, and pay for the jobs done under those contracts. It knows nothing about HTTP.
//!
//! The library is divided into two main sections:
//! 1. Database management ([`mod@db`]). SQLite is the supported backend. You should never need to access the database
//!    directly. Instead, use the public API. The exception is the data types stored in the database, which are defined
//!    in the `db_types` module and are public.
//! 2. The marketplace public API ([`mod@mkt_api`]). This is where the rules live: who may see a contract, who may pay
//!    for a job, how much a client may deposit. A backend must implement the traits in [`traits`] to be used with
//!    these APIs.
mod db;

pub mod db_types;
pub mod mkt_api;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use db::traits;
pub use db::traits::{
    ClientSpending,
    ContractManagement,
    ContractQueryFilter,
    ContractorEarnings,
    DateRange,
    JobManagement,
    JobPayment,
    JobQueryFilter,
    ProfileManagement,
    ReportManagement,
};
pub use mkt_api::{
    accounts_api::AccountApi,
    contract_api::ContractApi,
    errors::MarketplaceError,
    job_api::JobApi,
    report_api::ReportApi,
    report_objects,
};
