//! Dirdle Game Engine
//!
//! Platform-agnostic core for the Dirdle daily director-guessing game.
//! This crate picks the day's target and runs the guess state machine
//! without any UI or platform-specific dependencies.

pub mod catalog;
pub mod constants;
pub mod daily;
pub mod flags;
pub mod session;
pub mod share;

use chrono::{DateTime, NaiveDate, Utc};

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, Director};
pub use constants::{MAX_GUESSES, REFERENCE_TZ, SUGGESTION_DISPLAY_LIMIT};
pub use daily::{
    DailyPick, SelectError, day_hash, day_key, parse_day, reference_day, schedule, select_target,
    target_index, today,
};
pub use flags::flag_emoji;
pub use session::{
    GameSession, GameStatus, GuessError, GuessResult, GuessRow, SessionSnapshot,
    is_winning_result,
};
pub use share::{ShareMarks, share_lines, share_text};

/// Trait for abstracting where the catalog comes from
/// Platform-specific implementations should provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the ordered director catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Loader for the catalog compiled into this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl CatalogLoader for StaticCatalog {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::load_from_static()
    }
}

/// Owns the catalog for the lifetime of the process and opens daily sessions
#[derive(Debug, Clone)]
pub struct GameEngine {
    catalog: Catalog,
}

impl GameEngine {
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Load and validate the catalog through `loader`
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the catalog is empty or has
    /// duplicate names.
    pub fn from_loader<L>(loader: &L) -> Result<Self, anyhow::Error>
    where
        L: CatalogLoader,
        L::Error: Into<anyhow::Error>,
    {
        let catalog = loader.load_catalog().map_err(Into::into)?;
        catalog.validate()?;
        Ok(Self::new(catalog))
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The target for `day`
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
    pub fn target_for(&self, day: NaiveDate) -> Result<&Director, SelectError> {
        select_target(day, &self.catalog)
    }

    /// Open a fresh session for `day`
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
    pub fn session_for(&self, day: NaiveDate) -> Result<GameSession<'_>, SelectError> {
        GameSession::for_day(&self.catalog, day)
    }

    /// Open the session for the reference day containing `now`
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
    pub fn session_at(&self, now: DateTime<Utc>) -> Result<GameSession<'_>, SelectError> {
        self.session_for(reference_day(now))
    }

    /// Upcoming targets, for operators
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
    pub fn schedule(&self, start: NaiveDate, days: u32) -> Result<Vec<DailyPick<'_>>, SelectError> {
        schedule(start, days, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::from_directors(vec![
                Director::new("Alice", "2001", "USA"),
                Director::new("Bob", "1999", "China"),
            ]))
        }
    }

    #[derive(Clone, Copy, Default)]
    struct EmptyLoader;

    impl CatalogLoader for EmptyLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::empty())
        }
    }

    #[test]
    fn engine_opens_sessions_for_a_day() {
        let engine = GameEngine::from_loader(&FixtureLoader).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        // 2024-03-15 hashes to an odd magnitude.
        assert_eq!(engine.target_for(day).unwrap().name, "Bob");

        let mut session = engine.session_for(day).unwrap();
        let result = session.submit_guess("bob").unwrap();
        assert!(result.is_winning());
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn session_at_resolves_the_chicago_day() {
        let engine = GameEngine::from_loader(&FixtureLoader).unwrap();
        // 03:00 UTC on the 15th is still the 14th in Chicago.
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 3, 0, 0).unwrap();
        let mut session = engine.session_at(now).unwrap();
        // 2024-03-14 -> index 0.
        assert!(session.submit_guess("alice").unwrap().is_winning());
    }

    #[test]
    fn empty_catalog_is_refused_at_load() {
        let err = GameEngine::from_loader(&EmptyLoader).unwrap_err();
        assert!(err.to_string().contains("no directors"));

        let engine = GameEngine::new(Catalog::empty());
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(engine.target_for(day), Err(SelectError::EmptyCatalog));
        assert!(matches!(
            engine.session_for(day),
            Err(SelectError::EmptyCatalog)
        ));
    }

    #[test]
    fn static_loader_feeds_the_engine() {
        let engine = GameEngine::from_loader(&StaticCatalog).unwrap();
        assert_eq!(engine.catalog().len(), 12);
        let start = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(engine.schedule(start, 7).unwrap().len(), 7);
    }
}
