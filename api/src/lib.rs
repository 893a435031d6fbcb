//! # API crate — domain layer for the Donasee backend
//!
//! Everything below the HTTP surface lives here: the database models with
//! their query methods, password hashing, bearer-token issuance and
//! verification, request validation, and the structured API error type.
//! The `server` crate wires these into axum handlers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2 password hashing and HS256 bearer tokens |
//! | [`db`] | PostgreSQL connection pool and schema bootstrap |
//! | [`error`] | [`ApiError`] — every failure an endpoint can report, with its HTTP mapping |
//! | [`models`] | Database rows (`User`, `Campaign`, `Donation`) and their client-safe projections |
//! | [`validate`] | Explicit request validation returning the first failed check |

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod validate;

pub use error::ApiError;
