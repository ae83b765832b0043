use std::collections::BTreeMap;

use log::debug;

use super::models::Match;
use crate::rating::PlayerName;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateSummary {
    /// Player pairs that met more than once in the run
    pub groups: usize,
    /// Matches excluded from rating
    pub uncounted: usize,
}

/// Keeps at most one rated match per player pair.
///
/// Within a group of duels between the same two players, the player who won
/// the majority of them keeps their earliest win as the counted match. An even
/// split leaves the whole group unrated. `matches` is expected in time order.
pub fn resolve_duplicates(matches: &mut [Match]) -> DuplicateSummary {
    let mut summary = DuplicateSummary::default();

    for indices in group_by_pair(matches).into_values() {
        if indices.len() < 2 {
            continue;
        }

        summary.groups += 1;
        let majority = majority_winner(matches, &indices);

        let mut canonical = None;
        for &idx in &indices {
            let is_canonical = canonical.is_none()
                && majority.is_some()
                && matches[idx].winner() == majority.as_deref();

            matches[idx].counted = is_canonical;
            if is_canonical {
                canonical = Some(idx);
            } else {
                summary.uncounted += 1;
            }
        }

        debug!(
            "{} duels between the same pair, majority {:?}, counted {:?}",
            indices.len(),
            majority,
            canonical.map(|idx| matches[idx].timestamp())
        );
    }

    summary
}

fn group_by_pair(matches: &[Match]) -> BTreeMap<(PlayerName, PlayerName), Vec<usize>> {
    let mut groups: BTreeMap<_, Vec<usize>> = BTreeMap::new();
    for (idx, m) in matches.iter().enumerate() {
        groups.entry(m.pair_key()).or_default().push(idx);
    }
    groups
}

/// The player with strictly more wins across the group, if any
fn majority_winner(matches: &[Match], indices: &[usize]) -> Option<PlayerName> {
    let (first, second) = matches[indices[0]].pair_key();
    let mut first_wins = 0;
    let mut second_wins = 0;

    for &idx in indices {
        match matches[idx].winner() {
            Some(name) if name == first => first_wins += 1,
            Some(_) => second_wins += 1,
            None => {}
        }
    }

    if first_wins > second_wins {
        Some(first)
    } else if second_wins > first_wins {
        Some(second)
    } else {
        None
    }
}
