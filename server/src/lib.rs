//! # Donasee server
//!
//! The axum application for the donation-campaign backend: users register
//! and log in, create fundraising campaigns, and receive donations. All
//! domain logic lives in the `api` crate; this crate owns the settings,
//! the router, and the process lifecycle.
//!
//! ## Endpoints
//!
//! | Route | Method | Auth |
//! |-------|--------|------|
//! | `/register` | POST | — |
//! | `/login` | POST | — |
//! | `/login/jwt` | POST | `Authorization: JWT <token>` |
//! | `/campaigns` | GET, POST | POST requires a token |
//! | `/campaigns/:id` | GET, PUT, DELETE | PUT/DELETE owner only |
//! | `/campaigns/:id/donations` | GET, POST | GET owner only |

pub mod application;
pub mod extract;
pub mod routes;
pub mod settings;
pub mod state;

pub use application::launch;
