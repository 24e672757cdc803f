//! Centralized rules and tuning constants for Dirdle game logic.
//!
//! These values define the deterministic daily puzzle. Every client that
//! shares them sees the same target on the same day.

use chrono_tz::Tz;

/// Number of guesses a player gets per day.
pub const MAX_GUESSES: usize = 5;

/// How many suggestions the reference front-end shows at once.
///
/// The core never truncates; callers apply this (or their own) limit.
pub const SUGGESTION_DISPLAY_LIMIT: usize = 10;

/// Zone in which the puzzle day rolls over for every player.
pub const REFERENCE_TZ: Tz = chrono_tz::America::Chicago;

/// Canonical rendering of a puzzle day, fed to the day hash.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Multiplier of the polynomial day hash.
pub(crate) const DAY_HASH_MULTIPLIER: i32 = 31;

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_TARGET_SELECTED: &str = "daily.target.selected";
pub(crate) const LOG_GUESS_ACCEPTED: &str = "session.guess.accepted";
pub(crate) const LOG_GUESS_REJECTED: &str = "session.guess.rejected";
pub(crate) const LOG_SESSION_WON: &str = "session.won";
pub(crate) const LOG_SESSION_LOST: &str = "session.lost";
pub(crate) const LOG_CATALOG_LOADED: &str = "catalog.loaded";
