pub mod counters;
pub mod finalize;
pub mod merge;
pub mod ranks;
pub mod run;

pub use counters::{CounterBook, PlayerCounters, ScopeCounters};
pub use finalize::{build_leaderboards, finalize_player, Leaderboard, PlayerStanding};
pub use merge::{GlobalMerger, MergeSummary};
pub use ranks::assign_ranks;
pub use run::{RunAggregation, RunAggregator};
