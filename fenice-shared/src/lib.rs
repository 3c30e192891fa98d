//! # Fenice Shared Library
//!
//! This crate contains the domain core of the Fenice community dashboard:
//! families, capacity-bounded resources (cleaning slots and tasks), the
//! assignment ledger, volunteer-hour contributions and the aggregates the
//! dashboard displays. The API server is a thin HTTP layer on top of it.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their queries
//! - `db`: Connection pool, migrations and authorization context propagation
//! - `auth`: Session tokens, request authentication and authorization checks
//! - `identity`: Family name resolution at login
//! - `capacity`: Pure sign-up eligibility and occupancy rules
//! - `resources`: Resource pool (create, list, delete, calendar)
//! - `ledger`: Atomic sign-up and roster listing
//! - `contributions`: Volunteer-hour recording
//! - `reporting`: Aggregates over loaded contributions
//! - `error`: Domain error type

pub mod auth;
pub mod capacity;
pub mod contributions;
pub mod db;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod reporting;
pub mod resources;

/// Current version of the Fenice shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
