use std::str::FromStr;

use log::debug;

use super::models::{ParticipantRecord, RecordLine, WeaponDamage, WEAPON_COUNT};
use crate::config::MODE_COUNT;
use crate::rating::ModeId;

const WEAPON_OFFSET: usize = 9;

/// Fields per line: 9 scalar columns followed by a received/dealt pair per weapon
pub const FIELD_COUNT: usize = WEAPON_OFFSET + 2 * WEAPON_COUNT;

/// Decodes one whitespace-delimited record line.
///
/// Returns `None` for blank or short lines and for unknown mode ids.
/// Numeric fields that fail to parse decode as zero.
pub fn decode_line(line: &str) -> Option<RecordLine> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return None;
    }
    if fields.len() < FIELD_COUNT {
        debug!("Skipping line with {} fields: {}", fields.len(), line);
        return None;
    }

    let Some(mode) = decode_mode(fields[1]) else {
        debug!("Skipping line with unknown mode {}: {}", fields[1], line);
        return None;
    };

    Some(RecordLine {
        timestamp: parse_or_zero(fields[0]),
        mode,
        map: fields[2].to_string(),
        participant: decode_participant(&fields),
    })
}

/// Non-numeric text decodes as mode 0 like any other field; numbers outside
/// the known modes are rejected.
fn decode_mode(field: &str) -> Option<ModeId> {
    let mode: i64 = parse_or_zero(field);
    ModeId::try_from(mode).ok().filter(|id| *id < MODE_COUNT)
}

fn decode_participant(fields: &[&str]) -> ParticipantRecord {
    ParticipantRecord {
        name: fields[3].to_string(),
        frags: parse_or_zero(fields[4]),
        deaths: parse_or_zero(fields[5]),
        damage_received: parse_or_zero(fields[6]),
        damage_dealt: parse_or_zero(fields[7]),
        suicides: parse_or_zero(fields[8]),
        weapon_damage_received: decode_weapons(fields, 0),
        weapon_damage_dealt: decode_weapons(fields, 1),
    }
}

fn decode_weapons(fields: &[&str], column: usize) -> WeaponDamage {
    let mut damage = [0; WEAPON_COUNT];
    for (weapon, value) in damage.iter_mut().enumerate() {
        *value = parse_or_zero(fields[WEAPON_OFFSET + 2 * weapon + column]);
    }
    damage
}

fn parse_or_zero<T: FromStr + Default>(field: &str) -> T {
    field.parse().unwrap_or_else(|_| {
        debug!("Unparsable numeric field '{}', using 0", field);
        T::default()
    })
}
