pub mod bid_suggestions;
pub mod bids;
pub mod donation_bids;
pub mod donations;
pub mod donors;
pub mod events;
pub mod prize_categories;
pub mod prize_tickets;
pub mod prize_winners;
pub mod prizes;
pub mod speedrun_runners;
pub mod speedruns;

pub use bid_suggestions as bid_suggestion_entity;
pub use bids as bid_entity;
pub use donation_bids as donation_bid_entity;
pub use donations as donation_entity;
pub use donors as donor_entity;
pub use events as event_entity;
pub use prize_categories as prize_category_entity;
pub use prize_tickets as prize_ticket_entity;
pub use prize_winners as prize_winner_entity;
pub use prizes as prize_entity;
pub use speedrun_runners as speedrun_runner_entity;
pub use speedruns as speedrun_entity;

pub use bids::BidState;
pub use donations::{
    BidProcessingState, CommentState, DonationDomain, ReadState, RequestedVisibility,
    TransactionState,
};
pub use donors::DonorVisibility;
