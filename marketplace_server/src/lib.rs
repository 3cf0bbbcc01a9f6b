//! # Marketplace server
//! This crate hosts the HTTP server for the contractor marketplace. It is a thin layer over the marketplace engine:
//! it identifies the caller, hands the request to the relevant engine API, and maps the outcome to a status code.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `GET /contracts/{id}`, `GET /contracts`: the caller's contracts.
//! * `GET /jobs/unpaid`, `POST /jobs/{job_id}/pay`: the caller's unpaid jobs, and paying for them.
//! * `POST /balances/deposit/{userId}`: deposits into a client's balance.
//! * `GET /admin/best-profession`, `GET /admin/best-clients`: reports over paid jobs.
//!
//! Routes that act on behalf of a user identify the caller by the `profile_id` header.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;
