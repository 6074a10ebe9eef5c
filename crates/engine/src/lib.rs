mod aggregator;
mod reaction;
pub mod traits;

#[cfg(test)]
mod testing;

pub use aggregator::{AnnouncementAggregator, FeedView, PageRequest, Pagination};
pub use reaction::{ReactionOutcome, ReactionToggle};
