use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::aggregation::{Leaderboard, PlayerStanding};
use crate::config::{mode_config, WEAPON_NAMES};
use crate::errors::RankingError;

const FINALS_STAGE: &str = "finals";

pub fn write_html(leaderboard: &Leaderboard, path: &Path) -> Result<()> {
    fs::write(path, render_html(leaderboard)).map_err(|source| RankingError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Renders a leaderboard as a front-matter page with a summary and an accuracy table.
/// Players without a tallied game are left out.
pub fn render_html(leaderboard: &Leaderboard) -> String {
    let players: Vec<&PlayerStanding> = leaderboard
        .standings
        .iter()
        .filter(|s| s.counters.games > 0)
        .collect();

    let mut html = format!("---\ntitle:  {}\n---\n", page_title(leaderboard));
    html.push_str(&render_summary(&players));
    html.push_str("<br />\n");
    html.push_str(&render_accuracy(&players));
    html
}

fn page_title(leaderboard: &Leaderboard) -> String {
    let mode = mode_config(leaderboard.mode);
    if leaderboard.stage == FINALS_STAGE {
        format!("{} Finals", mode.title)
    } else {
        mode.title.to_string()
    }
}

fn render_summary(players: &[&PlayerStanding]) -> String {
    let columns = [
        "Rank", "Player", "Rating", "Games", "Wins", "Losses", "Win Ratio", "Frags", "Deaths",
        "K/D", "Suicides", "Accuracy",
    ];
    let rows: Vec<String> = players
        .iter()
        .map(|s| {
            let c = &s.counters;
            let cells = [
                s.rank.to_string(),
                escape(&c.name),
                s.rating.to_string(),
                c.games.to_string(),
                c.wins.to_string(),
                c.losses.to_string(),
                trim(s.win_rate),
                c.frags.to_string(),
                c.deaths.to_string(),
                trim(s.kpd),
                c.suicides.to_string(),
                percent(s.accuracy),
            ];
            table_row(&cells)
        })
        .collect();

    table(columns.iter().map(|c| c.to_string()), &rows)
}

fn render_accuracy(players: &[&PlayerStanding]) -> String {
    let columns = ["Rank".to_string(), "Player".to_string(), "Accuracy".to_string()]
        .into_iter()
        .chain(WEAPON_NAMES.iter().map(|w| format!("{} Accuracy", w)));
    let rows: Vec<String> = players
        .iter()
        .map(|s| {
            let mut cells = vec![s.rank.to_string(), escape(s.name()), percent(s.accuracy)];
            cells.extend(s.weapon_accuracy.iter().map(|a| percent(*a)));
            table_row(&cells)
        })
        .collect();

    table(columns, &rows)
}

/// One `<tr>`; the player column (second cell) is left aligned
fn table_row(cells: &[String]) -> String {
    let tds: String = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| match i {
            1 => format!("<td class=\"left-align\">{}</td>", cell),
            _ => format!("<td>{}</td>", cell),
        })
        .collect();
    format!("    <tr>\n      {}\n    </tr>\n", tds)
}

fn table(columns: impl Iterator<Item = String>, rows: &[String]) -> String {
    let headers: String = columns.map(|c| format!("<th>{}</th>", c)).collect();
    let mut html = String::from("<table>\n  <thead>\n");
    html.push_str(&format!("    <tr>\n      {}\n    </tr>\n", headers));
    html.push_str("  </thead>\n  <tbody>\n");
    html.push_str(&rows.concat());
    html.push_str("  </tbody>\n</table>\n");
    html
}

fn percent(value: f64) -> String {
    format!("{:02.0}%", value * 100.0)
}

fn trim(value: f64) -> String {
    format!("{:.3}", value)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
