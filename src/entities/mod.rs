pub mod document;
pub mod investment;
pub mod newsletter;
pub mod startup;
pub mod user;
pub mod user_profile;
pub mod watchlist;

pub use investment::Stage;

