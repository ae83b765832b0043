mod convergence;
pub mod glicko;
pub mod types;

pub use glicko::RatingEngine;
pub use types::{ModeId, Observation, Opponent, Outcome, PlayerName, RatingBook, RatingState};
