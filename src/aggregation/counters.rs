use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{ParticipantRecord, WeaponDamage};
use crate::rating::{ModeId, PlayerName};

/// Raw accumulated stats of one player in one (stage, mode)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounters {
    pub name: PlayerName,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub frags: i64,
    pub deaths: i64,
    pub suicides: i64,
    pub damage_received: i64,
    pub damage_dealt: i64,
    pub weapon_damage_received: WeaponDamage,
    pub weapon_damage_dealt: WeaponDamage,
}

impl PlayerCounters {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Damage, deaths and suicides count for every duel, forfeited or not
    pub fn add_damage(&mut self, record: &ParticipantRecord) {
        self.deaths = self.deaths.saturating_add(record.deaths);
        self.suicides = self.suicides.saturating_add(record.suicides);
        self.damage_received = self.damage_received.saturating_add(record.damage_received);
        self.damage_dealt = self.damage_dealt.saturating_add(record.damage_dealt);
        add_weapons(&mut self.weapon_damage_received, &record.weapon_damage_received);
        add_weapons(&mut self.weapon_damage_dealt, &record.weapon_damage_dealt);
    }

    pub fn add_game(&mut self, frags: i64) {
        self.games = self.games.saturating_add(1);
        self.frags = self.frags.saturating_add(frags);
    }

    pub fn add_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }

    pub fn add_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
    }

    /// Sums are clamped at the numeric bounds rather than wrapping
    pub fn merge(&mut self, other: &PlayerCounters) {
        self.games = self.games.saturating_add(other.games);
        self.wins = self.wins.saturating_add(other.wins);
        self.losses = self.losses.saturating_add(other.losses);
        self.frags = self.frags.saturating_add(other.frags);
        self.deaths = self.deaths.saturating_add(other.deaths);
        self.suicides = self.suicides.saturating_add(other.suicides);
        self.damage_received = self.damage_received.saturating_add(other.damage_received);
        self.damage_dealt = self.damage_dealt.saturating_add(other.damage_dealt);
        add_weapons(&mut self.weapon_damage_received, &other.weapon_damage_received);
        add_weapons(&mut self.weapon_damage_dealt, &other.weapon_damage_dealt);
    }
}

fn add_weapons(total: &mut WeaponDamage, extra: &WeaponDamage) {
    for (sum, value) in total.iter_mut().zip(extra) {
        *sum = sum.saturating_add(*value);
    }
}

pub type ScopeCounters = BTreeMap<PlayerName, PlayerCounters>;

/// Counters keyed by stage, then mode, then player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterBook {
    stages: BTreeMap<String, BTreeMap<ModeId, ScopeCounters>>,
}

impl CounterBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for a player, created empty on first sight
    pub fn entry(&mut self, stage: &str, mode: ModeId, player: &str) -> &mut PlayerCounters {
        self.stages
            .entry(stage.to_string())
            .or_default()
            .entry(mode)
            .or_default()
            .entry(player.to_string())
            .or_insert_with(|| PlayerCounters::new(player))
    }

    pub fn get(&self, stage: &str, mode: ModeId, player: &str) -> Option<&PlayerCounters> {
        self.stages.get(stage)?.get(&mode)?.get(player)
    }

    /// Every (stage, mode) scope with its players
    pub fn scopes(&self) -> impl Iterator<Item = (&str, ModeId, &ScopeCounters)> {
        self.stages.iter().flat_map(|(stage, modes)| {
            modes
                .iter()
                .map(move |(&mode, players)| (stage.as_str(), mode, players))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ModeId, &PlayerCounters)> {
        self.scopes()
            .flat_map(|(stage, mode, players)| players.values().map(move |c| (stage, mode, c)))
    }

    /// Adds every counter of `other` into this book
    pub fn merge(&mut self, other: &CounterBook) {
        for (stage, mode, counters) in other.iter() {
            self.entry(stage, mode, &counters.name).merge(counters);
        }
    }
}
