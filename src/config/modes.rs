/// Display information for a game mode id
///
/// Mode ids come straight from the record files; names are only needed
/// when rendering reports.
#[derive(Debug, Clone)]
pub struct ModeConfig {
    pub id: u8,
    pub slug: &'static str,
    pub title: &'static str,
}

impl ModeConfig {
    pub fn new(id: u8, slug: &'static str, title: &'static str) -> Self {
        Self { id, slug, title }
    }
}

/// Number of mode ids a record may carry (0..MODE_COUNT)
pub const MODE_COUNT: u8 = 6;

/// Weapon names indexed by weapon id, in record column order
pub const WEAPON_NAMES: [&str; 7] = [
    "Chainsaw",
    "Shotgun",
    "CG",
    "RL",
    "Rifle",
    "GL",
    "Pistol",
];

pub fn get_modes() -> Vec<ModeConfig> {
    vec![
        ModeConfig::new(0, "ffa", "FFA"),
        ModeConfig::new(1, "coop", "Co-Op"),
        ModeConfig::new(2, "teamplay", "Teamplay"),
        ModeConfig::new(3, "insta", "Insta"),
        ModeConfig::new(4, "instateam", "Instateam"),
        ModeConfig::new(5, "effic", "Effic"),
    ]
}

/// Look up a mode, falling back to a generated name for unknown ids
pub fn mode_config(id: u8) -> ModeConfig {
    get_modes()
        .into_iter()
        .find(|m| m.id == id)
        .unwrap_or_else(|| ModeConfig::new(id, "unknown", "Unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_id_has_a_name() {
        for id in 0..MODE_COUNT {
            assert_ne!(mode_config(id).slug, "unknown");
        }
        assert_eq!(mode_config(5).slug, "effic");
    }
}
