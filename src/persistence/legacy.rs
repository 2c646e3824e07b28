//! Legacy plain-text high score files
//!
//! Each entry is two lines:
//!
//! ```text
//! Some Name 120
//! 1:0 2:5 3:12
//! ```
//!
//! The first line is the player name followed by the score, the second the
//! `time:score` history. Malformed entries are skipped with a warning; a
//! missing history line gives the entry an empty history.

use super::PersistError;
use crate::highscores::HighScoreEntry;
use crate::sim::ScorePoint;

/// Parse `name score` (the name may contain spaces)
pub fn parse_score_line(line: &str, line_no: usize) -> Result<(String, u64), PersistError> {
    let malformed = |reason: &str| PersistError::Malformed {
        line: line_no,
        reason: reason.to_string(),
    };
    let mut parts: Vec<&str> = line.split_whitespace().collect();
    let score = parts
        .pop()
        .ok_or_else(|| malformed("empty line"))?
        .parse::<u64>()
        .map_err(|_| malformed("could not parse score"))?;
    if parts.is_empty() {
        return Err(malformed("missing name"));
    }
    Ok((parts.join(" "), score))
}

/// Parse `time:score time:score ...`
pub fn parse_history_line(line: &str, line_no: usize) -> Result<Vec<ScorePoint>, PersistError> {
    line.split_whitespace()
        .map(|token| {
            let (time, score) = token.split_once(':').ok_or_else(|| PersistError::Malformed {
                line: line_no,
                reason: format!("expected time:score, got {token:?}"),
            })?;
            match (time.parse::<f32>(), score.parse::<u64>()) {
                (Ok(time), Ok(score)) => Ok(ScorePoint { time, score }),
                _ => Err(PersistError::Malformed {
                    line: line_no,
                    reason: format!("bad history sample {token:?}"),
                }),
            }
        })
        .collect()
}

fn looks_like_history(line: &str) -> bool {
    line.split_whitespace().all(|token| token.contains(':'))
}

/// Parse a whole legacy file, keeping every entry that can be recovered
pub fn parse_high_scores(content: &str) -> Vec<HighScoreEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines().enumerate().peekable();

    while let Some((index, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }
        let (name, score) = match parse_score_line(line, index + 1) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Skipping high score entry: {e}");
                continue;
            }
        };

        let history = match lines.next_if(|(_, next)| looks_like_history(next)) {
            Some((history_index, history_line)) => {
                match parse_history_line(history_line, history_index + 1) {
                    Ok(history) => history,
                    Err(e) => {
                        log::warn!("High score {name:?}: {e}, using empty history");
                        Vec::new()
                    }
                }
            }
            None => {
                log::warn!("High score {name:?} has no history line, using empty history");
                Vec::new()
            }
        };

        entries.push(HighScoreEntry {
            name,
            score,
            history,
        });
    }
    entries
}
