pub mod modes;
pub mod settings;

pub use modes::{get_modes, mode_config, ModeConfig, MODE_COUNT, WEAPON_NAMES};
pub use settings::{AggregationSettings, AppConfig, OutputSettings, RatingSettings};
