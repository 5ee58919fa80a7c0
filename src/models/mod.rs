pub mod bid;
pub mod common;
pub mod donation;
pub mod donor;
pub mod event;
pub mod feed;
pub mod prize;

pub use bid::*;
pub use common::*;
pub use donation::*;
pub use donor::*;
pub use event::*;
pub use feed::*;
pub use prize::*;

pub use crate::utils::pagination::{PaginatedResponse, PaginationInfo, PaginationParams};
