use std::path::PathBuf;

use crate::rating::{ModeId, PlayerName};

pub const WEAPON_COUNT: usize = 7;

/// Damage per weapon, indexed by weapon id
pub type WeaponDamage = [i64; WEAPON_COUNT];

/// Raw stats of one player in one duel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub name: PlayerName,
    pub frags: i64,
    pub deaths: i64,
    pub suicides: i64,
    pub damage_received: i64,
    pub damage_dealt: i64,
    pub weapon_damage_received: WeaponDamage,
    pub weapon_damage_dealt: WeaponDamage,
}

/// One decoded record line: a participant plus the match fields repeated on every line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    pub timestamp: i64,
    pub mode: ModeId,
    pub map: String,
    pub participant: ParticipantRecord,
}

/// Lines from the same file with the same timestamp belong to the same duel
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub source: PathBuf,
    pub timestamp: i64,
}

/// A complete two-player duel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub key: MatchKey,
    pub stage: String,
    pub mode: ModeId,
    pub map: String,
    pub participants: [ParticipantRecord; 2],
    /// Whether this duel feeds the rating engine
    pub counted: bool,
}

impl Match {
    pub fn timestamp(&self) -> i64 {
        self.key.timestamp
    }

    /// Unordered player pair, used to detect resubmitted duels
    pub fn pair_key(&self) -> (PlayerName, PlayerName) {
        let [a, b] = &self.participants;
        if a.name <= b.name {
            (a.name.clone(), b.name.clone())
        } else {
            (b.name.clone(), a.name.clone())
        }
    }

    /// Name of the player with strictly more frags, if any
    pub fn winner(&self) -> Option<&str> {
        let [a, b] = &self.participants;
        if a.frags > b.frags {
            Some(&a.name)
        } else if b.frags > a.frags {
            Some(&b.name)
        } else {
            None
        }
    }
}
