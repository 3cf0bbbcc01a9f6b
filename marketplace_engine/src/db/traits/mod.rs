//! # Backend interface contracts
//!
//! The traits in this module describe what a storage backend must provide for the marketplace APIs to work. They form
//! a typed repository layer: every query is expressed through a structured filter or value object from
//! [`data_objects`], never through raw SQL fragments.
//!
//! * [`ProfileManagement`] reads profiles and adjusts balances outside of the payment flow (deposits).
//! * [`ContractManagement`] selects contracts.
//! * [`JobManagement`] selects jobs and settles payments atomically.
//! * [`ReportManagement`] aggregates paid jobs for the admin reports.
//!
//! Business rules (who may pay, deposit caps and so on) live in the APIs in [`crate::mkt_api`], not in the backends.
//! Backends are only responsible for atomicity and for reporting guard failures faithfully.
mod contract_management;
mod job_management;
mod profile_management;
mod report_management;

pub mod data_objects;

pub use contract_management::ContractManagement;
pub use data_objects::{ClientSpending, ContractQueryFilter, ContractorEarnings, DateRange, JobPayment, JobQueryFilter};
pub use job_management::JobManagement;
pub use profile_management::ProfileManagement;
pub use report_management::ReportManagement;
