use serde::Serialize;

use super::counters::{CounterBook, PlayerCounters};
use super::ranks::assign_ranks;
use crate::domain::WEAPON_COUNT;
use crate::rating::{ModeId, RatingBook, RatingState};

/// Report-ready view of one player in one (stage, mode)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStanding {
    pub rank: u32,
    pub rating: i64,
    pub counters: PlayerCounters,
    pub win_rate: f64,
    pub accuracy: f64,
    pub weapon_accuracy: [f64; WEAPON_COUNT],
    pub kpd: f64,
}

impl PlayerStanding {
    pub fn name(&self) -> &str {
        &self.counters.name
    }
}

/// Ranked standings of one (stage, mode) scope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub stage: String,
    pub mode: ModeId,
    pub standings: Vec<PlayerStanding>,
}

/// Derives ratios and the displayed rating. Rank is left at 0.
pub fn finalize_player(counters: &PlayerCounters, rating: &RatingState) -> PlayerStanding {
    let mut weapon_accuracy = [0.0; WEAPON_COUNT];
    for (weapon, accuracy) in weapon_accuracy.iter_mut().enumerate() {
        *accuracy = ratio(
            counters.weapon_damage_dealt[weapon],
            counters.weapon_damage_received[weapon],
        );
    }

    PlayerStanding {
        rank: 0,
        rating: rating.rating.round() as i64,
        counters: counters.clone(),
        win_rate: ratio(counters.wins.into(), counters.games.into()),
        accuracy: ratio(counters.damage_dealt, counters.damage_received),
        weapon_accuracy,
        kpd: ratio(counters.frags, counters.deaths),
    }
}

/// Builds a ranked leaderboard for every scope in `book`
pub fn build_leaderboards(
    book: &CounterBook,
    ratings: &RatingBook,
    prior: RatingState,
) -> Vec<Leaderboard> {
    book.scopes()
        .filter(|(_, _, players)| !players.is_empty())
        .map(|(stage, mode, players)| {
            let mut standings: Vec<PlayerStanding> = players
                .values()
                .map(|counters| {
                    let rating = ratings.current_or(mode, &counters.name, prior);
                    finalize_player(counters, &rating)
                })
                .collect();
            assign_ranks(&mut standings);

            Leaderboard {
                stage: stage.to_string(),
                mode,
                standings,
            }
        })
        .collect()
}

fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
