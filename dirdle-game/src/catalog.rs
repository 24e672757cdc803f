use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::LOG_CATALOG_LOADED;

const STATIC_CATALOG_JSON: &str = include_str!("../data/directors.json");

/// A guessable director record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Director {
    pub name: String,
    /// Graduation label; opaque, compared for equality only.
    pub grad_date: String,
    /// Country/region key; opaque, compared for equality only.
    #[serde(alias = "flag_code")]
    pub flag: String,
}

impl Director {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        grad_date: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            grad_date: grad_date.into(),
            flag: flag.into(),
        }
    }

    /// Case-insensitive equality against a player-typed name.
    #[must_use]
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains no directors")]
    Empty,
    #[error("catalog lists \"{name}\" more than once")]
    DuplicateName { name: String },
}

/// Ordered, read-only list of directors. Order defines the daily index space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    directors: Vec<Director>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            directors: Vec::new(),
        }
    }

    /// Wrap pre-built directors without validation.
    #[must_use]
    pub fn from_directors(directors: Vec<Director>) -> Self {
        Self { directors }
    }

    /// Parse and validate a catalog from its JSON form (`{"directors": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the catalog fails
    /// [`Catalog::validate`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        log::debug!(
            "{LOG_CATALOG_LOADED}: {} directors",
            catalog.directors.len()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the crate, parsed on first use and shared after.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is malformed.
    pub fn bundled() -> Result<&'static Self, CatalogError> {
        static BUNDLED: OnceLock<Catalog> = OnceLock::new();
        if let Some(catalog) = BUNDLED.get() {
            return Ok(catalog);
        }
        let catalog = Self::from_json(STATIC_CATALOG_JSON)?;
        Ok(BUNDLED.get_or_init(|| catalog))
    }

    /// Owned copy of the bundled catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is malformed.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::bundled().cloned()
    }

    /// Check the data-integrity preconditions the engine relies on: at least
    /// one director and no two names equal ignoring case.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.directors.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.directors.len());
        for director in &self.directors {
            if !seen.insert(director.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName {
                    name: director.name.clone(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.directors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directors.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Director> {
        self.directors.get(index)
    }

    /// First director whose name equals `name` ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Director> {
        self.directors.iter().find(|d| d.name_matches(name))
    }

    /// Directors whose name contains `prefix` ignoring case, in catalog order.
    ///
    /// The iterator is lazy and unbounded; display truncation is up to the caller.
    pub fn suggestions<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = &'a Director> + use<'a> {
        let needle = prefix.to_lowercase();
        self.directors
            .iter()
            .filter(move |d| d.name.to_lowercase().contains(&needle))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Director;
    type IntoIter = std::slice::Iter<'a, Director>;

    fn into_iter(self) -> Self::IntoIter {
        self.directors.iter()
    }
}
