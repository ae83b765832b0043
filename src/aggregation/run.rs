use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::counters::CounterBook;
use crate::config::AggregationSettings;
use crate::domain::Match;
use crate::rating::{ModeId, Observation, Outcome, PlayerName, RatingBook, RatingState};

pub type ObservationMap = BTreeMap<(ModeId, PlayerName), Vec<Observation>>;

/// Everything one processing run contributes before it is merged
#[derive(Debug, Default, Clone)]
pub struct RunAggregation {
    pub counters: CounterBook,
    pub observations: ObservationMap,
    /// Every (mode, player) that took part in the run
    pub participants: BTreeSet<(ModeId, PlayerName)>,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
    pub matches: usize,
    pub forfeits: usize,
}

impl RunAggregation {
    pub fn modes(&self) -> BTreeSet<ModeId> {
        self.participants.iter().map(|(mode, _)| *mode).collect()
    }
}

/// Accumulates the counters and rating observations of one run.
///
/// Opponent ratings are read from `ratings` as it stood when the run started;
/// nothing here writes to the global state.
pub struct RunAggregator<'a> {
    settings: &'a AggregationSettings,
    ratings: &'a RatingBook,
    prior: RatingState,
}

impl<'a> RunAggregator<'a> {
    pub fn new(
        settings: &'a AggregationSettings,
        ratings: &'a RatingBook,
        prior: RatingState,
    ) -> Self {
        Self {
            settings,
            ratings,
            prior,
        }
    }

    pub fn aggregate(&self, matches: &[Match]) -> RunAggregation {
        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by_key(|m| m.timestamp());

        let mut run = RunAggregation::default();
        for m in ordered {
            self.add_match(&mut run, m);
        }
        run
    }

    fn add_match(&self, run: &mut RunAggregation, m: &Match) {
        run.matches += 1;
        track_timestamps(run, m.timestamp());

        for participant in &m.participants {
            run.participants.insert((m.mode, participant.name.clone()));
            run.counters
                .entry(&m.stage, m.mode, &participant.name)
                .add_damage(participant);
        }

        if self.is_forfeit(m) {
            run.forfeits += 1;
            debug!("Forfeit at {}: games and frags not tallied", m.timestamp());
        } else {
            add_result(run, m);
        }

        if m.counted {
            self.add_observations(run, m);
        }
    }

    fn is_forfeit(&self, m: &Match) -> bool {
        m.participants
            .iter()
            .any(|p| self.settings.is_forfeit(p.frags))
    }

    fn add_observations(&self, run: &mut RunAggregation, m: &Match) {
        for (own, other) in [(0, 1), (1, 0)] {
            let player = &m.participants[own];
            let opponent = &m.participants[other];

            let observation = Observation {
                opponent: self.ratings.current_or(m.mode, &opponent.name, self.prior),
                outcome: Outcome::from_frags(player.frags, opponent.frags),
            };

            run.observations
                .entry((m.mode, player.name.clone()))
                .or_default()
                .push(observation);
        }
    }
}

fn add_result(run: &mut RunAggregation, m: &Match) {
    let [a, b] = &m.participants;

    run.counters.entry(&m.stage, m.mode, &a.name).add_game(a.frags);
    run.counters.entry(&m.stage, m.mode, &b.name).add_game(b.frags);

    let (winner, loser) = match m.winner() {
        Some(name) if name == a.name => (&a.name, &b.name),
        Some(_) => (&b.name, &a.name),
        None => return,
    };

    run.counters.entry(&m.stage, m.mode, winner).add_win();
    run.counters.entry(&m.stage, m.mode, loser).add_loss();
}

fn track_timestamps(run: &mut RunAggregation, timestamp: i64) {
    run.first_timestamp = Some(run.first_timestamp.map_or(timestamp, |t| t.min(timestamp)));
    run.last_timestamp = Some(run.last_timestamp.map_or(timestamp, |t| t.max(timestamp)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::duel;

    fn prior() -> RatingState {
        RatingState {
            rating: 1500.0,
            deviation: 300.0,
            volatility: 0.06,
        }
    }

    fn aggregate(matches: &[Match], ratings: &RatingBook) -> RunAggregation {
        let settings = AggregationSettings::default();
        RunAggregator::new(&settings, ratings, prior()).aggregate(matches)
    }

    #[test]
    fn test_normal_match_tallies() {
        let run = aggregate(&[duel(10, ("a", 20), ("b", 10))], &RatingBook::new());

        let a = run.counters.get("qualifiers", 3, "a").unwrap();
        let b = run.counters.get("qualifiers", 3, "b").unwrap();
        assert_eq!((a.games, a.wins, a.losses, a.frags, a.deaths), (1, 1, 0, 20, 10));
        assert_eq!((b.games, b.wins, b.losses, b.frags, b.deaths), (1, 0, 1, 10, 20));
        assert_eq!(run.first_timestamp, Some(10));
        assert_eq!(run.last_timestamp, Some(10));
    }

    #[test]
    fn test_draw_counts_game_without_result() {
        let run = aggregate(&[duel(1, ("a", 5), ("b", 5))], &RatingBook::new());

        let a = run.counters.get("qualifiers", 3, "a").unwrap();
        assert_eq!((a.games, a.wins, a.losses), (1, 0, 0));
        assert_eq!(run.observations[&(3, "a".to_string())][0].outcome, Outcome::Draw);
    }

    #[test]
    fn test_forfeit_excluded_from_tallies_but_rated() {
        let run = aggregate(&[duel(1, ("a", 99999), ("b", 0))], &RatingBook::new());

        for name in ["a", "b"] {
            let c = run.counters.get("qualifiers", 3, name).unwrap();
            assert_eq!((c.games, c.wins, c.losses, c.frags), (0, 0, 0, 0));
        }
        assert_eq!(run.counters.get("qualifiers", 3, "a").unwrap().deaths, 0);
        assert_eq!(run.counters.get("qualifiers", 3, "b").unwrap().deaths, 99999);
        assert_eq!(run.forfeits, 1);

        let a_obs = &run.observations[&(3, "a".to_string())];
        let b_obs = &run.observations[&(3, "b".to_string())];
        assert_eq!(a_obs[0].outcome, Outcome::Win);
        assert_eq!(b_obs[0].outcome, Outcome::Loss);
    }

    #[test]
    fn test_uncounted_match_has_no_observations() {
        let mut m = duel(1, ("a", 3), ("b", 1));
        m.counted = false;

        let run = aggregate(&[m], &RatingBook::new());

        assert!(run.observations.is_empty());
        assert_eq!(run.counters.get("qualifiers", 3, "a").unwrap().wins, 1);
        assert_eq!(run.participants.len(), 2);
    }

    #[test]
    fn test_observations_use_start_of_run_ratings() {
        let mut ratings = RatingBook::new();
        let strong = RatingState {
            rating: 1800.0,
            ..prior()
        };
        ratings.set(3, "b", strong);

        let run = aggregate(
            &[duel(1, ("a", 3), ("b", 1)), duel(2, ("c", 3), ("d", 1))],
            &ratings,
        );

        let a_obs = &run.observations[&(3, "a".to_string())];
        let b_obs = &run.observations[&(3, "b".to_string())];
        assert_eq!(a_obs[0].opponent.rating, 1800.0);
        assert_eq!(b_obs[0].opponent, prior());
        assert_eq!(run.matches, 2);
        assert_eq!(run.modes().len(), 1);
    }

    #[test]
    fn test_huge_death_counts_clamp() {
        let mut first = duel(1, ("a", 3), ("b", 1));
        first.participants[0].deaths = i64::MAX;
        let second = duel(2, ("a", 3), ("b", 1));

        let run = aggregate(&[first, second], &RatingBook::new());

        let a = run.counters.get("qualifiers", 3, "a").unwrap();
        assert_eq!(a.deaths, i64::MAX);
        assert_eq!((a.games, a.wins), (2, 2));
    }
}
