use std::collections::BTreeSet;

use log::{info, warn};

use super::run::RunAggregation;
use crate::rating::{ModeId, PlayerName, RatingEngine};
use crate::state::{display_timestamp, GlobalState};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub rated: usize,
    pub decayed: usize,
    /// The run reached back to or before the previous high-water mark
    pub overlaps_previous: bool,
}

/// Folds processing runs into the cumulative state
pub struct GlobalMerger<'a> {
    engine: &'a RatingEngine,
    decay_inactive: bool,
}

impl<'a> GlobalMerger<'a> {
    pub fn new(engine: &'a RatingEngine, decay_inactive: bool) -> Self {
        Self {
            engine,
            decay_inactive,
        }
    }

    /// Merges a run into `state`.
    ///
    /// This is not idempotent: merging the same run twice counts it twice.
    /// The high-water timestamp only produces a warning.
    pub fn merge(&self, state: &mut GlobalState, run: &RunAggregation) -> MergeSummary {
        let mut summary = MergeSummary {
            overlaps_previous: overlaps_previous(state, run),
            ..Default::default()
        };

        if summary.overlaps_previous {
            warn!(
                "Run starts at {} which is not after the last processed timestamp {}; \
                 its matches may already be counted",
                display_timestamp(run.first_timestamp.unwrap_or_default()),
                display_timestamp(state.last_timestamp)
            );
        }

        state.stats.merge(&run.counters);
        self.update_ratings(state, run, &mut summary);

        if let Some(last) = run.last_timestamp {
            state.advance_high_water(last);
        }

        info!(
            "  → Merged {} matches: {} ratings updated, {} decayed",
            run.matches, summary.rated, summary.decayed
        );
        summary
    }

    /// Exactly one update or decay per (mode, player) in every mode the run touched
    fn update_ratings(
        &self,
        state: &mut GlobalState,
        run: &RunAggregation,
        summary: &mut MergeSummary,
    ) {
        let prior = self.engine.default_rating();

        for mode in run.modes() {
            for player in self.players_to_rate(state, run, mode) {
                let current = *state.ratings.ensure(mode, &player, prior);

                let updated = match run.observations.get(&(mode, player.clone())) {
                    Some(observations) if !observations.is_empty() => {
                        summary.rated += 1;
                        self.engine.update_with_observations(current, observations)
                    }
                    _ => {
                        summary.decayed += 1;
                        self.engine.decay(current)
                    }
                };

                state.ratings.set(mode, &player, updated);
            }
        }
    }

    fn players_to_rate(
        &self,
        state: &GlobalState,
        run: &RunAggregation,
        mode: ModeId,
    ) -> BTreeSet<PlayerName> {
        let mut players: BTreeSet<PlayerName> = run
            .participants
            .iter()
            .filter(|(m, _)| *m == mode)
            .map(|(_, name)| name.clone())
            .collect();

        if self.decay_inactive {
            players.extend(state.ratings.players(mode).cloned());
        }
        players
    }
}

fn overlaps_previous(state: &GlobalState, run: &RunAggregation) -> bool {
    match run.first_timestamp {
        Some(first) => state.last_timestamp > 0 && first <= state.last_timestamp,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::run::RunAggregator;
    use crate::config::AggregationSettings;
    use crate::domain::models::fixtures::duel;
    use crate::domain::Match;
    use crate::rating::{Observation, Outcome};

    fn run_of(matches: &[Match], state: &GlobalState, engine: &RatingEngine) -> RunAggregation {
        let settings = AggregationSettings::default();
        RunAggregator::new(&settings, &state.ratings, engine.default_rating()).aggregate(matches)
    }

    #[test]
    fn test_new_players_get_ratings() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let run = run_of(&[duel(5, ("a", 10), ("b", 3))], &state, &engine);

        let summary = GlobalMerger::new(&engine, true).merge(&mut state, &run);

        assert_eq!(summary.rated, 2);
        assert!(state.ratings.get(3, "a").unwrap().rating > 1500.0);
        assert!(state.ratings.get(3, "b").unwrap().rating < 1500.0);
        assert_eq!(state.last_timestamp, 5);
    }

    #[test]
    fn test_one_update_per_mode_across_stages() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let qualifier = duel(5, ("a", 10), ("b", 3));
        let mut final_match = duel(6, ("a", 8), ("c", 2));
        final_match.stage = "finals".to_string();
        let run = run_of(&[qualifier, final_match], &state, &engine);

        let summary = GlobalMerger::new(&engine, true).merge(&mut state, &run);

        let prior = engine.default_rating();
        let win = Observation {
            opponent: prior,
            outcome: Outcome::Win,
        };
        let expected = engine.update_with_observations(prior, &[win, win]);
        assert_eq!(summary.rated, 3);
        assert_eq!(summary.decayed, 0);
        assert_eq!(*state.ratings.get(3, "a").unwrap(), expected);
        assert_eq!(state.ratings.len(), 3);
        assert!(state.stats.get("qualifiers", 3, "a").is_some());
        assert!(state.stats.get("finals", 3, "a").is_some());
    }

    #[test]
    fn test_present_player_without_observations_decays() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let mut m = duel(5, ("a", 10), ("b", 3));
        m.counted = false;
        let run = run_of(&[m], &state, &engine);

        let summary = GlobalMerger::new(&engine, true).merge(&mut state, &run);

        let a = state.ratings.get(3, "a").unwrap();
        assert_eq!(summary.decayed, 2);
        assert_eq!(a.rating, 1500.0);
        assert!(a.deviation > 300.0);
    }

    #[test]
    fn test_inactive_players_decay_once_per_run() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let first = run_of(&[duel(5, ("a", 10), ("b", 3))], &state, &engine);
        GlobalMerger::new(&engine, true).merge(&mut state, &first);
        let a_before = *state.ratings.get(3, "a").unwrap();

        let second = run_of(&[duel(9, ("c", 10), ("d", 3))], &state, &engine);
        let summary = GlobalMerger::new(&engine, true).merge(&mut state, &second);

        let a_after = *state.ratings.get(3, "a").unwrap();
        assert_eq!(summary.rated, 2);
        assert_eq!(summary.decayed, 2);
        assert_eq!(a_after.rating, a_before.rating);
        assert!(a_after.deviation > a_before.deviation);
    }

    #[test]
    fn test_inactive_players_untouched_without_decay() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let first = run_of(&[duel(5, ("a", 10), ("b", 3))], &state, &engine);
        GlobalMerger::new(&engine, false).merge(&mut state, &first);
        let a_before = *state.ratings.get(3, "a").unwrap();

        let second = run_of(&[duel(9, ("c", 10), ("d", 3))], &state, &engine);
        GlobalMerger::new(&engine, false).merge(&mut state, &second);

        assert_eq!(*state.ratings.get(3, "a").unwrap(), a_before);
    }

    #[test]
    fn test_merging_twice_doubles_counters() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        let run = run_of(
            &[duel(5, ("a", 10), ("b", 3)), duel(6, ("c", 4), ("a", 8))],
            &state,
            &engine,
        );
        let merger = GlobalMerger::new(&engine, true);

        merger.merge(&mut state, &run);
        let once = state.stats.clone();
        let summary = merger.merge(&mut state, &run);

        assert!(summary.overlaps_previous);
        for (stage, mode, counters) in once.iter() {
            let mut doubled = counters.clone();
            doubled.merge(counters);
            assert_eq!(state.stats.get(stage, mode, &counters.name), Some(&doubled));
        }
    }

    #[test]
    fn test_high_water_never_regresses() {
        let engine = RatingEngine::default();
        let mut state = GlobalState::new();
        state.last_timestamp = 100;
        let run = run_of(&[duel(50, ("a", 10), ("b", 3))], &state, &engine);

        let summary = GlobalMerger::new(&engine, true).merge(&mut state, &run);

        assert!(summary.overlaps_previous);
        assert_eq!(state.last_timestamp, 100);
    }
}
