use anyhow::{Context, Result};
use csv::Writer;
use std::io;
use std::path::Path;

use crate::aggregation::{Leaderboard, PlayerStanding};
use crate::config::WEAPON_NAMES;
use crate::errors::RankingError;

pub fn csv_header() -> Vec<String> {
    let mut header: Vec<String> = [
        "Rank", "Player", "Rating", "Games", "Wins", "Losses", "Frags", "Deaths", "Suicides",
        "Damage", "Damage Dealt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for weapon in WEAPON_NAMES {
        header.push(format!("{} Damage", weapon));
        header.push(format!("{} Damage Dealt", weapon));
    }
    header
}

pub fn write_csv(leaderboard: &Leaderboard, path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(path).map_err(|e| RankingError::ReportWrite {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    write_rows(&mut writer, leaderboard)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush().map_err(|source| RankingError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_rows<W: io::Write>(writer: &mut Writer<W>, leaderboard: &Leaderboard) -> csv::Result<()> {
    writer.write_record(csv_header())?;
    for standing in &leaderboard.standings {
        writer.write_record(standing_row(standing))?;
    }
    Ok(())
}

fn standing_row(standing: &PlayerStanding) -> Vec<String> {
    let c = &standing.counters;
    let mut row = vec![
        standing.rank.to_string(),
        c.name.clone(),
        standing.rating.to_string(),
        c.games.to_string(),
        c.wins.to_string(),
        c.losses.to_string(),
        c.frags.to_string(),
        c.deaths.to_string(),
        c.suicides.to_string(),
        c.damage_received.to_string(),
        c.damage_dealt.to_string(),
    ];

    for (received, dealt) in c.weapon_damage_received.iter().zip(&c.weapon_damage_dealt) {
        row.push(received.to_string());
        row.push(dealt.to_string());
    }
    row
}
