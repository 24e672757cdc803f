//! Spoiler-free share text for a finished session.
//!
//! Shape: one line per guess holding three marks (name, graduation, flag),
//! then a single outcome line. The guess that won is drawn entirely with the
//! winning mark; every other guess uses hit/miss marks.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_GUESSES;
use crate::session::{GameSession, GameStatus, GuessResult};

/// Symbols and wording used in the share text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareMarks {
    /// Attribute matched on a non-winning guess.
    pub hit: String,
    /// Attribute did not match.
    pub miss: String,
    /// Every attribute of the winning guess.
    pub winning: String,
    /// Outcome line on a win; `{guesses}` and `{max}` are substituted.
    pub won_template: String,
    /// Outcome line on a loss; `{max}` is substituted.
    pub lost_template: String,
}

impl Default for ShareMarks {
    fn default() -> Self {
        Self {
            hit: "🟨".to_string(),
            miss: "⬛".to_string(),
            winning: "🟩".to_string(),
            won_template: "Dirdle solved in {guesses}/{max}".to_string(),
            lost_template: "Dirdle X/{max}".to_string(),
        }
    }
}

impl ShareMarks {
    /// Load marks from JSON; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn mark(&self, matched: bool) -> &str {
        if matched { &self.hit } else { &self.miss }
    }

    /// Mark triple for one guess.
    #[must_use]
    pub fn guess_line(&self, result: &GuessResult<'_>) -> String {
        if result.is_winning() {
            return self.winning.repeat(3);
        }
        result
            .matches()
            .iter()
            .map(|&matched| self.mark(matched))
            .collect()
    }

    /// Closing line for a finished game; `None` while still in progress.
    #[must_use]
    pub fn outcome_line(&self, status: GameStatus, guesses: usize) -> Option<String> {
        let template = match status {
            GameStatus::InProgress => return None,
            GameStatus::Won => &self.won_template,
            GameStatus::Lost => &self.lost_template,
        };
        Some(interpolate_template(template, guesses))
    }
}

fn interpolate_template(template: &str, guesses: usize) -> String {
    template
        .replace("{guesses}", &guesses.to_string())
        .replace("{max}", &MAX_GUESSES.to_string())
}

/// Share lines for `session`: guess lines followed by the outcome line.
#[must_use]
pub fn share_lines(session: &GameSession<'_>, marks: &ShareMarks) -> Option<Vec<String>> {
    let outcome = marks.outcome_line(session.status(), session.guesses_used())?;
    let mut lines: Vec<String> = session
        .history()
        .iter()
        .map(|result| marks.guess_line(result))
        .collect();
    lines.push(outcome);
    Some(lines)
}

/// [`share_lines`] joined with newlines.
#[must_use]
pub fn share_text(session: &GameSession<'_>, marks: &ShareMarks) -> Option<String> {
    share_lines(session, marks).map(|lines| lines.join("\n"))
}
