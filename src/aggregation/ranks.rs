use super::finalize::PlayerStanding;

/// Orders standings by rating, highest first, and assigns competition ranks.
///
/// Equal ratings share a rank and keep their original relative order; the
/// next lower rating takes its 1-based position (1, 1, 3).
pub fn assign_ranks(standings: &mut [PlayerStanding]) {
    standings.sort_by(|a, b| b.rating.cmp(&a.rating));

    let mut previous: Option<(i64, u32)> = None;
    for (position, standing) in standings.iter_mut().enumerate() {
        let rank = match previous {
            Some((rating, rank)) if rating == standing.rating => rank,
            _ => position as u32 + 1,
        };
        standing.rank = rank;
        previous = Some((standing.rating, rank));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::counters::PlayerCounters;
    use crate::aggregation::finalize::finalize_player;
    use crate::rating::RatingState;

    fn standing(name: &str, rating: f64) -> PlayerStanding {
        let state = RatingState {
            rating,
            deviation: 50.0,
            volatility: 0.06,
        };
        finalize_player(&PlayerCounters::new(name), &state)
    }

    fn ranks(standings: &[PlayerStanding]) -> Vec<(String, u32)> {
        standings
            .iter()
            .map(|s| (s.name().to_string(), s.rank))
            .collect()
    }

    #[test]
    fn test_ties_share_rank() {
        let mut standings = vec![
            standing("a", 1700.0),
            standing("b", 1700.0),
            standing("c", 1600.0),
        ];

        assign_ranks(&mut standings);

        let ranks: Vec<u32> = standings.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let mut standings = vec![
            standing("low", 1400.0),
            standing("tie_first", 1550.0),
            standing("top", 1800.0),
            standing("tie_second", 1550.0),
        ];

        assign_ranks(&mut standings);

        assert_eq!(
            ranks(&standings),
            vec![
                ("top".to_string(), 1),
                ("tie_first".to_string(), 2),
                ("tie_second".to_string(), 2),
                ("low".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<PlayerStanding> = Vec::new();
        assign_ranks(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![standing("solo", 1500.0)];
        assign_ranks(&mut single);
        assert_eq!(single[0].rank, 1);
    }
}
