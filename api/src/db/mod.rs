//! # Database module — PostgreSQL connection pool and schema bootstrap
//!
//! [`connect`] opens the shared [`sqlx::PgPool`] (up to 5 connections) and
//! creates the tables if they don't exist, so a fresh database is usable
//! without a separate migration step. The schema lives in [`pool`] next to
//! the connection code.

mod pool;

pub use pool::connect;
