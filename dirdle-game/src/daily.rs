//! Deterministic daily target selection.
//!
//! A puzzle day is rendered as `YYYY-MM-DD`, folded through a 32-bit
//! polynomial hash with two's-complement wraparound, and reduced modulo the
//! catalog length. The arithmetic is fixed-width so that every client,
//! whatever its language, lands on the same index for the same day.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Catalog, Director};
use crate::constants::{DAY_HASH_MULTIPLIER, DAY_KEY_FORMAT, LOG_TARGET_SELECTED, REFERENCE_TZ};

/// Errors raised while resolving the daily target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("cannot select a target from an empty catalog")]
    EmptyCatalog,
    #[error("invalid puzzle day \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDay(String),
}

/// One row of an operator schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPick<'c> {
    pub day: NaiveDate,
    pub index: usize,
    pub director: &'c Director,
}

/// Canonical key hashed for a puzzle day.
#[must_use]
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// Polynomial string hash over UTF-16 code units, wrapping at 32 bits.
#[must_use]
pub fn day_hash(key: &str) -> i32 {
    key.encode_utf16().fold(0_i32, |acc, unit| {
        acc.wrapping_mul(DAY_HASH_MULTIPLIER)
            .wrapping_add(i32::from(unit))
    })
}

/// Reduce a hash to an index; `|i32::MIN|` is taken as `2^31`.
fn fold_index(hash: i32, len: usize) -> usize {
    hash.unsigned_abs() as usize % len
}

/// Catalog index of the target for `day`.
///
/// # Errors
///
/// Returns [`SelectError::EmptyCatalog`] when `len` is zero.
pub fn target_index(day: NaiveDate, len: usize) -> Result<usize, SelectError> {
    if len == 0 {
        return Err(SelectError::EmptyCatalog);
    }
    Ok(fold_index(day_hash(&day_key(day)), len))
}

/// The director everyone guesses on `day`.
///
/// # Errors
///
/// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
pub fn select_target(day: NaiveDate, catalog: &Catalog) -> Result<&Director, SelectError> {
    let index = target_index(day, catalog.len())?;
    log::debug!("{LOG_TARGET_SELECTED}: day {day} -> index {index}");
    catalog.get(index).ok_or(SelectError::EmptyCatalog)
}

/// Calendar day in the reference zone at instant `now`.
#[must_use]
pub fn reference_day(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&REFERENCE_TZ).date_naive()
}

/// Today's puzzle day, from the system clock.
#[must_use]
pub fn today() -> NaiveDate {
    reference_day(Utc::now())
}

/// Parse a `YYYY-MM-DD` puzzle day.
///
/// # Errors
///
/// Returns [`SelectError::InvalidDay`] if `text` is not a valid date.
pub fn parse_day(text: &str) -> Result<NaiveDate, SelectError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
        .map_err(|_| SelectError::InvalidDay(trimmed.to_string()))
}

/// Targets for `days` consecutive days starting at `start`.
///
/// # Errors
///
/// Returns [`SelectError::EmptyCatalog`] when the catalog has no entries.
pub fn schedule(
    start: NaiveDate,
    days: u32,
    catalog: &Catalog,
) -> Result<Vec<DailyPick<'_>>, SelectError> {
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }
    // Picks end at the last representable date.
    let remaining = NaiveDate::MAX.signed_duration_since(start).num_days();
    let count = u64::try_from(remaining).map_or(0, |r| r.saturating_add(1));
    let mut picks = Vec::new();
    for offset in 0..u64::from(days).min(count) {
        let Some(day) = start.checked_add_days(Days::new(offset)) else {
            break;
        };
        let index = target_index(day, catalog.len())?;
        let director = catalog.get(index).ok_or(SelectError::EmptyCatalog)?;
        picks.push(DailyPick {
            day,
            index,
            director,
        });
    }
    Ok(picks)
}
