pub mod bids;
pub mod donations;
pub mod donors;
pub mod events;
pub mod feed;
pub mod prizes;

pub use bids::bid_config;
pub use donations::donation_config;
pub use donors::donor_config;
pub use events::event_config;
pub use feed::feed_config;
pub use prizes::prize_config;
