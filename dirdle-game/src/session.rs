//! Guess evaluation and the per-day game state machine.
//!
//! A [`GameSession`] starts `InProgress` and moves exactly once, to `Won` or
//! `Lost`. [`GameSession::submit_guess`] is the only mutating entry point and
//! leaves the session untouched whenever it returns an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Director};
use crate::constants::{
    LOG_GUESS_ACCEPTED, LOG_GUESS_REJECTED, LOG_SESSION_LOST, LOG_SESSION_WON, MAX_GUESSES,
};
use crate::daily::{SelectError, select_target};
use crate::share::{ShareMarks, share_text};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Guesses are still accepted
    #[default]
    InProgress,
    /// A guess matched the target on every attribute
    Won,
    /// All guesses were used without a full match
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Outcome of comparing one guessed director with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessResult<'c> {
    /// The guessed catalog entry.
    pub director: &'c Director,
    /// 1-based position among the session's guesses.
    pub sequence: usize,
    pub name_match: bool,
    pub grad_date_match: bool,
    pub flag_match: bool,
}

impl<'c> GuessResult<'c> {
    /// Compare `guess` with `target` field by field (exact equality).
    #[must_use]
    pub fn evaluate(guess: &'c Director, target: &Director, sequence: usize) -> Self {
        Self {
            director: guess,
            sequence,
            name_match: guess.name == target.name,
            grad_date_match: guess.grad_date == target.grad_date,
            flag_match: guess.flag == target.flag,
        }
    }

    #[must_use]
    pub const fn is_winning(&self) -> bool {
        self.name_match && self.grad_date_match && self.flag_match
    }

    /// Match flags in display order: name, graduation, flag.
    #[must_use]
    pub const fn matches(&self) -> [bool; 3] {
        [self.name_match, self.grad_date_match, self.flag_match]
    }
}

/// True when every attribute of `result` matched.
#[must_use]
pub const fn is_winning_result(result: &GuessResult<'_>) -> bool {
    result.is_winning()
}

/// Reasons a guess is refused. A refused guess never changes the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("the game is already over")]
    GameAlreadyOver,
    #[error("all {MAX_GUESSES} guesses have been used")]
    GuessLimitReached,
    #[error("enter a director's name")]
    EmptyInput,
    #[error("\"{name}\" is not in the director list")]
    UnknownEntity { name: String },
}

impl GuessError {
    /// Input mistakes the player can fix, as opposed to rejected mutations.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::UnknownEntity { .. })
    }
}

/// Owned, serializable row of a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRow {
    pub sequence: usize,
    pub name: String,
    pub grad_date: String,
    pub flag: String,
    pub name_match: bool,
    pub grad_date_match: bool,
    pub flag_match: bool,
}

impl From<&GuessResult<'_>> for GuessRow {
    fn from(result: &GuessResult<'_>) -> Self {
        Self {
            sequence: result.sequence,
            name: result.director.name.clone(),
            grad_date: result.director.grad_date.clone(),
            flag: result.director.flag.clone(),
            name_match: result.name_match,
            grad_date_match: result.grad_date_match,
            flag_match: result.flag_match,
        }
    }
}

/// What a front-end may render. The target is only present once the game is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub guesses_used: usize,
    pub remaining_guesses: usize,
    pub history: Vec<GuessRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One player's game against a fixed target.
#[derive(Debug, Clone)]
pub struct GameSession<'c> {
    catalog: &'c Catalog,
    target: &'c Director,
    history: Vec<GuessResult<'c>>,
    status: GameStatus,
}

impl<'c> GameSession<'c> {
    /// Start a session against `target`, which should be an entry of `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog, target: &'c Director) -> Self {
        Self {
            catalog,
            target,
            history: Vec::with_capacity(MAX_GUESSES),
            status: GameStatus::InProgress,
        }
    }

    /// Start the session for a puzzle day.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
    pub fn for_day(catalog: &'c Catalog, day: NaiveDate) -> Result<Self, SelectError> {
        let target = select_target(day, catalog)?;
        Ok(Self::new(catalog, target))
    }

    /// Evaluate a guess and record it.
    ///
    /// # Errors
    ///
    /// Checked in order: [`GuessError::GameAlreadyOver`],
    /// [`GuessError::GuessLimitReached`], [`GuessError::EmptyInput`],
    /// [`GuessError::UnknownEntity`].
    pub fn submit_guess(&mut self, raw_name: &str) -> Result<GuessResult<'c>, GuessError> {
        let director = self.resolve_guess(raw_name).inspect_err(|err| {
            log::debug!("{LOG_GUESS_REJECTED}: {err}");
        })?;

        let result = GuessResult::evaluate(director, self.target, self.history.len() + 1);
        self.history.push(result);
        log::debug!(
            "{LOG_GUESS_ACCEPTED}: #{} {:?}",
            result.sequence,
            result.matches()
        );

        if result.is_winning() {
            self.status = GameStatus::Won;
            log::info!("{LOG_SESSION_WON}: solved in {}", result.sequence);
        } else if self.history.len() >= MAX_GUESSES {
            self.status = GameStatus::Lost;
            log::info!("{LOG_SESSION_LOST}: target was {}", self.target.name);
        }
        Ok(result)
    }

    fn resolve_guess(&self, raw_name: &str) -> Result<&'c Director, GuessError> {
        if self.status.is_over() {
            return Err(GuessError::GameAlreadyOver);
        }
        if self.history.len() >= MAX_GUESSES {
            return Err(GuessError::GuessLimitReached);
        }
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(GuessError::EmptyInput);
        }
        let catalog = self.catalog;
        catalog
            .find(name)
            .ok_or_else(|| GuessError::UnknownEntity {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[must_use]
    pub fn history(&self) -> &[GuessResult<'c>] {
        &self.history
    }

    #[must_use]
    pub fn guesses_used(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.history.len())
    }

    /// The target, once there is nothing left to give away.
    #[must_use]
    pub fn revealed_target(&self) -> Option<&'c Director> {
        self.status.is_over().then_some(self.target)
    }

    /// Autocomplete candidates for partially typed input.
    pub fn suggestions_for(&self, prefix: &str) -> impl Iterator<Item = &'c Director> + use<'c> {
        self.catalog.suggestions(prefix)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            guesses_used: self.guesses_used(),
            remaining_guesses: self.remaining_guesses(),
            history: self.history.iter().map(GuessRow::from).collect(),
            target: self.revealed_target().map(|d| d.name.clone()),
        }
    }

    /// Spoiler-free summary for sharing; `None` while the game is in progress.
    #[must_use]
    pub fn share_text(&self, marks: &ShareMarks) -> Option<String> {
        share_text(self, marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_directors(vec![
            Director::new("Alice", "2001", "USA"),
            Director::new("Bob", "1999", "China"),
            Director::new("Carol", "2001", "Spain"),
            Director::new("Dan", "1999", "USA"),
        ])
    }

    #[test]
    fn evaluate_compares_each_field_exactly() {
        let catalog = catalog();
        let target = catalog.get(0).unwrap();
        let carol = GuessResult::evaluate(catalog.get(2).unwrap(), target, 1);
        assert_eq!(carol.matches(), [false, true, false]);
        let dan = GuessResult::evaluate(catalog.get(3).unwrap(), target, 2);
        assert_eq!(dan.matches(), [false, false, true]);
        assert!(!is_winning_result(&dan));
        assert!(GuessResult::evaluate(target, target, 3).is_winning());
    }

    #[test]
    fn guess_is_trimmed_and_case_insensitive() {
        let catalog = catalog();
        let mut session = GameSession::new(&catalog, catalog.get(0).unwrap());
        let result = session.submit_guess("  cArOl \n").unwrap();
        assert_eq!(result.director.name, "Carol");
        assert_eq!(result.sequence, 1);
        assert_eq!(session.remaining_guesses(), 4);
    }

    #[test]
    fn rejected_guesses_leave_state_untouched() {
        let catalog = catalog();
        let mut session = GameSession::new(&catalog, catalog.get(0).unwrap());
        session.submit_guess("bob").unwrap();
        assert_eq!(session.submit_guess("   "), Err(GuessError::EmptyInput));
        assert_eq!(
            session.submit_guess(" Eve "),
            Err(GuessError::UnknownEntity {
                name: "Eve".to_string()
            })
        );
        assert_eq!(session.guesses_used(), 1);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn game_over_takes_precedence_over_input_errors() {
        let catalog = catalog();
        let mut session = GameSession::new(&catalog, catalog.get(0).unwrap());
        session.submit_guess("alice").unwrap();
        assert_eq!(session.submit_guess(""), Err(GuessError::GameAlreadyOver));
        assert_eq!(session.submit_guess("nobody"), Err(GuessError::GameAlreadyOver));
    }

    #[test]
    fn guess_limit_is_checked_independently_of_status() {
        let catalog = catalog();
        let target = catalog.get(0).unwrap();
        let wrong = catalog.get(1).unwrap();
        let mut session = GameSession::new(&catalog, target);
        session.history = (1..=MAX_GUESSES)
            .map(|seq| GuessResult::evaluate(wrong, target, seq))
            .collect();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.submit_guess("alice"), Err(GuessError::GuessLimitReached));
        assert_eq!(session.remaining_guesses(), 0);
    }

    #[test]
    fn target_stays_hidden_until_the_end() {
        let catalog = catalog();
        let mut session = GameSession::new(&catalog, catalog.get(1).unwrap());
        session.submit_guess("alice").unwrap();
        assert!(session.revealed_target().is_none());
        let snapshot = session.snapshot();
        assert!(snapshot.target.is_none());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("Bob"));

        session.submit_guess("bob").unwrap();
        assert_eq!(session.revealed_target().unwrap().name, "Bob");
        assert_eq!(session.snapshot().target.as_deref(), Some("Bob"));
    }

    #[test]
    fn snapshot_rows_mirror_history() {
        let catalog = catalog();
        let mut session = GameSession::new(&catalog, catalog.get(0).unwrap());
        session.submit_guess("dan").unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.guesses_used, 1);
        assert_eq!(snapshot.remaining_guesses, 4);
        assert_eq!(
            snapshot.history,
            vec![GuessRow {
                sequence: 1,
                name: "Dan".to_string(),
                grad_date: "1999".to_string(),
                flag: "USA".to_string(),
                name_match: false,
                grad_date_match: false,
                flag_match: true,
            }]
        );
    }

    #[test]
    fn user_facing_errors_are_classified() {
        assert!(GuessError::EmptyInput.is_user_facing());
        assert!(
            GuessError::UnknownEntity {
                name: "x".to_string()
            }
            .is_user_facing()
        );
        assert!(!GuessError::GameAlreadyOver.is_user_facing());
        assert!(!GuessError::GuessLimitReached.is_user_facing());
    }

    #[test]
    fn suggestions_come_from_the_catalog() {
        let catalog = catalog();
        let session = GameSession::new(&catalog, catalog.get(0).unwrap());
        let names: Vec<&str> = session
            .suggestions_for("a")
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Carol", "Dan"]);
    }
}
