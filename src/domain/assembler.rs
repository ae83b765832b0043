use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use super::decoder::decode_line;
use super::models::{Match, MatchKey, ParticipantRecord, RecordLine};
use crate::rating::ModeId;

/// Lines collected so far for one (file, timestamp) pair
#[derive(Debug)]
struct Candidate {
    stage: String,
    mode: ModeId,
    map: String,
    participants: Vec<ParticipantRecord>,
}

/// Groups decoded record lines into two-player matches
#[derive(Debug, Default)]
pub struct MatchAssembler {
    candidates: BTreeMap<MatchKey, Candidate>,
}

impl MatchAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes every line of a record file. Returns the number of lines accepted.
    pub fn add_file(&mut self, source: &Path, stage: &str, contents: &str) -> usize {
        let mut accepted = 0;
        for line in contents.lines().filter_map(decode_line) {
            self.add(source, stage, line);
            accepted += 1;
        }
        accepted
    }

    pub fn add(&mut self, source: &Path, stage: &str, line: RecordLine) {
        let key = MatchKey {
            source: source.to_path_buf(),
            timestamp: line.timestamp,
        };

        self.candidates
            .entry(key)
            .or_insert_with(|| Candidate {
                stage: stage.to_string(),
                mode: line.mode,
                map: line.map,
                participants: Vec::with_capacity(2),
            })
            .participants
            .push(line.participant);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Materializes complete duels in ascending timestamp order, dropping everything else
    pub fn into_matches(self) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .candidates
            .into_iter()
            .filter_map(|(key, candidate)| build_match(key, candidate))
            .collect();

        matches.sort_by(|a, b| {
            a.key
                .timestamp
                .cmp(&b.key.timestamp)
                .then_with(|| a.key.cmp(&b.key))
        });
        matches
    }
}

fn build_match(key: MatchKey, candidate: Candidate) -> Option<Match> {
    let participants: [ParticipantRecord; 2] = match candidate.participants.try_into() {
        Ok(pair) => pair,
        Err(participants) => {
            debug!(
                "Dropping {}@{}: {} participants",
                key.source.display(),
                key.timestamp,
                participants.len()
            );
            return None;
        }
    };

    if participants[0].name == participants[1].name {
        debug!(
            "Dropping {}@{}: {} played against themselves",
            key.source.display(),
            key.timestamp,
            participants[0].name
        );
        return None;
    }

    Some(Match {
        key,
        stage: candidate.stage,
        mode: candidate.mode,
        map: candidate.map,
        participants,
        counted: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::participant;

    fn line(timestamp: i64, name: &str, frags: i64) -> RecordLine {
        RecordLine {
            timestamp,
            mode: 0,
            map: "turbine".to_string(),
            participant: participant(name, frags, 0),
        }
    }

    #[test]
    fn test_pairs_become_matches() {
        let source = Path::new("logs/finals/a.log");
        let mut assembler = MatchAssembler::new();
        assembler.add(source, "finals", line(20, "a", 1));
        assembler.add(source, "finals", line(20, "b", 2));
        assembler.add(source, "finals", line(10, "c", 3));
        assembler.add(source, "finals", line(10, "d", 4));

        let matches = assembler.into_matches();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].timestamp(), 10);
        assert_eq!(matches[1].timestamp(), 20);
        assert_eq!(matches[1].stage, "finals");
        assert!(matches.iter().all(|m| m.counted));
    }

    #[test]
    fn test_incomplete_matches_are_dropped() {
        let source = Path::new("logs/finals/a.log");
        let mut assembler = MatchAssembler::new();
        assembler.add(source, "finals", line(1, "solo", 1));
        assembler.add(source, "finals", line(2, "a", 1));
        assembler.add(source, "finals", line(2, "b", 1));
        assembler.add(source, "finals", line(2, "c", 1));

        assert_eq!(assembler.len(), 2);
        assert!(assembler.into_matches().is_empty());
    }

    #[test]
    fn test_same_timestamp_in_different_files_is_separate() {
        let mut assembler = MatchAssembler::new();
        assembler.add(Path::new("x.log"), "s", line(5, "a", 1));
        assembler.add(Path::new("y.log"), "s", line(5, "b", 1));

        assert!(assembler.into_matches().is_empty());
    }

    #[test]
    fn test_self_duel_is_dropped() {
        let source = Path::new("x.log");
        let mut assembler = MatchAssembler::new();
        assembler.add(source, "s", line(5, "a", 1));
        assembler.add(source, "s", line(5, "a", 2));

        assert!(assembler.into_matches().is_empty());
    }

    #[test]
    fn test_add_file_skips_bad_lines() {
        let contents = "\
1 0 ot alice 5 2 100 120 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
garbage
1 0 ot bob 2 5 120 100 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
";
        let mut assembler = MatchAssembler::new();
        let accepted = assembler.add_file(Path::new("x.log"), "s", contents);

        assert_eq!(accepted, 2);
        let matches = assembler.into_matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].winner(), Some("alice"));
    }
}
