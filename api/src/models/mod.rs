//! Database models and their client-safe projections.

mod campaign;
mod donation;
mod user;

pub use campaign::{Campaign, CampaignInfo, NewCampaign};
pub use donation::{Donation, DonationInfo, NewDonation};
pub use user::{IdentityInfo, NewProfile, NewUser, User, UserInfo, UserProfile, UserProfileInfo};
