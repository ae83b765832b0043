use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ModeId = u8;
pub type PlayerName = String;

/// Glicko-2 state of one player in one mode, on the public (1500-centred) scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

/// Anything the rating engine can be scored against in a rating period
pub trait Opponent {
    fn rating(&self) -> f64;
    fn deviation(&self) -> f64;
    fn volatility(&self) -> f64;
    /// Score of the subject against this opponent: 1.0 win, 0.5 draw, 0.0 loss
    fn outcome(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    /// Outcome for the side scoring `own` against `other`
    pub fn from_frags(own: i64, other: i64) -> Self {
        if own > other {
            Outcome::Win
        } else if other > own {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
            Outcome::Win => 1.0,
        }
    }
}

/// One rating input: the opponent as they stood at the start of the run, and the result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub opponent: RatingState,
    pub outcome: Outcome,
}

impl Opponent for Observation {
    fn rating(&self) -> f64 {
        self.opponent.rating
    }

    fn deviation(&self) -> f64 {
        self.opponent.deviation
    }

    fn volatility(&self) -> f64 {
        self.opponent.volatility
    }

    fn outcome(&self) -> f64 {
        self.outcome.score()
    }
}

/// Rating states keyed by mode, then player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingBook {
    modes: BTreeMap<ModeId, BTreeMap<PlayerName, RatingState>>,
}

impl RatingBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: ModeId, player: &str) -> Option<&RatingState> {
        self.modes.get(&mode).and_then(|players| players.get(player))
    }

    /// Current state of a player, or `prior` if they have never been rated in this mode
    pub fn current_or(&self, mode: ModeId, player: &str, prior: RatingState) -> RatingState {
        self.get(mode, player).copied().unwrap_or(prior)
    }

    /// Make sure a state exists for the player, creating it from `prior` if needed
    pub fn ensure(&mut self, mode: ModeId, player: &str, prior: RatingState) -> &mut RatingState {
        self.modes
            .entry(mode)
            .or_default()
            .entry(player.to_string())
            .or_insert(prior)
    }

    pub fn set(&mut self, mode: ModeId, player: &str, state: RatingState) {
        self.modes
            .entry(mode)
            .or_default()
            .insert(player.to_string(), state);
    }

    pub fn players(&self, mode: ModeId) -> impl Iterator<Item = &PlayerName> {
        self.modes.get(&mode).into_iter().flat_map(|players| players.keys())
    }

    pub fn len(&self) -> usize {
        self.modes.values().map(|players| players.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
