use std::path::PathBuf;

use crate::rating::RatingState;

/// Environment variable that overrides the default state file location
pub const STATE_PATH_ENV: &str = "DUEL_RANKING_STATE";

const DEFAULT_STATE_FILE: &str = "state.json";

pub struct RatingSettings {
    pub default_rating: f64,
    pub default_deviation: f64,
    pub default_volatility: f64,
    /// Glicko-2 system constant, constrains volatility change per period
    pub tau: f64,
    pub convergence_tolerance: f64,
    pub max_iterations: usize,
    /// Decay players known in a mode who sat out a run that played that mode
    pub decay_inactive: bool,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            default_deviation: 300.0,
            default_volatility: 0.06,
            tau: 0.5,
            convergence_tolerance: 1e-6,
            max_iterations: 100,
            decay_inactive: true,
        }
    }
}

impl RatingSettings {
    pub fn prior(&self) -> RatingState {
        RatingState {
            rating: self.default_rating,
            deviation: self.default_deviation,
            volatility: self.default_volatility,
        }
    }
}

pub struct AggregationSettings {
    /// Frag value that marks the declared winner of a forfeited duel
    pub forfeit_frags: i64,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            forfeit_frags: 99999,
        }
    }
}

impl AggregationSettings {
    pub fn is_forfeit(&self, frags: i64) -> bool {
        frags >= self.forfeit_frags
    }
}

pub struct OutputSettings {
    pub state_path: PathBuf,
    pub report_dir: PathBuf,
    pub write_html: bool,
    pub write_csv: bool,
    pub dry_run: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        let state_path = std::env::var(STATE_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_STATE_FILE.to_string());

        Self {
            state_path: PathBuf::from(state_path),
            report_dir: PathBuf::from("."),
            write_html: true,
            write_csv: false,
            dry_run: false,
        }
    }
}

#[derive(Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub aggregation: AggregationSettings,
    pub output: OutputSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_matches_defaults() {
        let prior = RatingSettings::default().prior();

        assert_eq!(prior.rating, 1500.0);
        assert_eq!(prior.deviation, 300.0);
        assert_eq!(prior.volatility, 0.06);
    }

    #[test]
    fn test_forfeit_threshold() {
        let settings = AggregationSettings::default();

        assert!(settings.is_forfeit(99999));
        assert!(!settings.is_forfeit(99998));
    }
}
