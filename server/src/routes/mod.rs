//! HTTP handlers, one module per resource.

mod auth;
mod campaigns;
mod donations;

pub use auth::{login, login_jwt, register};
pub use campaigns::{create_campaign, delete_campaign, get_campaign, list_campaigns, update_campaign};
pub use donations::{create_donation, list_donations};
