//! # Marketplace public API
//!
//! The `mkt_api` module holds the business rules of the marketplace. Each API wraps a backend that implements the
//! backend traits it needs, so the rules can be exercised against SQLite or against a mock.
//!
//! * [`accounts_api`] looks up profiles and handles deposits, including the deposit cap.
//! * [`contract_api`] answers contract queries on behalf of a profile.
//! * [`job_api`] lists unpaid jobs and runs the job payment flow.
//! * [`report_api`] produces the admin reports.
//!
//! # API usage
//!
//! ```rust,ignore
//! use marketplace_engine::{ContractApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/marketplace.db", 5).await?;
//! let api = ContractApi::new(db);
//! let contracts = api.active_contracts_for_profile(4).await?;
//! ```
pub mod accounts_api;
pub mod contract_api;
pub mod errors;
pub mod job_api;
pub mod report_api;
pub mod report_objects;
