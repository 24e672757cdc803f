use anyhow::{Context, Result};
use dirdle_game::{Catalog, CatalogError, CatalogLoader, GameEngine, ShareMarks, StaticCatalog};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileCatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },
}

/// Catalog read from an operator-supplied JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for JsonFileCatalog {
    type Error = FileCatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        let json = fs::read_to_string(&self.path).map_err(|source| FileCatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        Catalog::from_json(&json).map_err(|source| FileCatalogError::Catalog {
            path: self.path.clone(),
            source,
        })
    }
}

/// Engine over `--catalog` if given, otherwise the bundled catalog.
pub fn load_engine(catalog_path: Option<&Path>) -> Result<GameEngine> {
    let engine = match catalog_path {
        Some(path) => GameEngine::from_loader(&JsonFileCatalog::new(path))?,
        None => GameEngine::from_loader(&StaticCatalog).context("bundled catalog is invalid")?,
    };
    log::debug!("catalog ready: {} directors", engine.catalog().len());
    Ok(engine)
}

pub fn load_share_marks(path: Option<&Path>) -> Result<ShareMarks> {
    let Some(path) = path else {
        return Ok(ShareMarks::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read share config {}", path.display()))?;
    ShareMarks::from_json(&json)
        .with_context(|| format!("invalid share config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dirdle-loader-{label}-{}.json",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn bundled_engine_loads_without_a_path() {
        let engine = load_engine(None).unwrap();
        assert_eq!(engine.catalog().len(), 12);
    }

    #[test]
    fn file_catalog_is_parsed_and_validated() {
        let path = temp_file(
            "ok",
            r#"{"directors":[{"name":"Alice","grad_date":"2001","flag":"USA"}]}"#,
        );
        let engine = load_engine(Some(&path)).unwrap();
        assert_eq!(engine.catalog().get(0).unwrap().name, "Alice");

        let dup = temp_file(
            "dup",
            r#"{"directors":[
                {"name":"Alice","grad_date":"2001","flag":"USA"},
                {"name":"alice","grad_date":"2001","flag":"USA"}
            ]}"#,
        );
        let err = load_engine(Some(&dup)).unwrap_err();
        assert!(format!("{err:#}").contains("more than once"));
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let path = std::env::temp_dir().join("dirdle-loader-does-not-exist.json");
        let err = load_engine(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("dirdle-loader-does-not-exist.json"));
    }

    #[test]
    fn share_marks_default_without_path() {
        assert_eq!(load_share_marks(None).unwrap(), ShareMarks::default());
        let path = temp_file("marks", r#"{"miss":"-"}"#);
        assert_eq!(load_share_marks(Some(&path)).unwrap().miss, "-");
    }
}
