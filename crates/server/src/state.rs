use engine::{AnnouncementAggregator, ReactionToggle};
use storage::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub toggle: ReactionToggle,
    pub aggregator: AnnouncementAggregator,
}
