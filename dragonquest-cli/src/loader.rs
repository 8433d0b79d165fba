//! File-backed game data for the `--catalog` and `--config` flags.
use std::fs;
use std::path::{Path, PathBuf};

use dragonquest_game::{Catalog, CatalogError, ConfigError, DataLoader, GameConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reads game data from disk, falling back to the embedded defaults for
/// anything not given.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl DataLoader for FileLoader {
    type Error = LoadError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        match &self.catalog {
            Some(path) => {
                log::debug!("loading catalog from {}", path.display());
                Ok(Catalog::from_json(&read(path)?)?)
            }
            None => Ok(Catalog::load_from_static()),
        }
    }

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        match &self.config {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Ok(GameConfig::from_json(&read(path)?)?)
            }
            None => Ok(GameConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dragonquest-loader-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_without_paths() {
        let loader = FileLoader::default();
        assert_eq!(loader.load_catalog().unwrap().items.len(), 5);
        assert_eq!(loader.load_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn reads_config_from_disk() {
        let path = temp_file("config", r#"{ "starting_gold": 40 }"#);
        let loader = FileLoader {
            config: Some(path.clone()),
            ..FileLoader::default()
        };
        assert_eq!(loader.load_config().unwrap().starting_gold, 40);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let loader = FileLoader {
            catalog: Some(PathBuf::from("/definitely/not/here.json")),
            ..FileLoader::default()
        };
        let err = loader.load_catalog().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let path = temp_file("catalog", r#"{ "items": [] }"#);
        let loader = FileLoader {
            catalog: Some(path.clone()),
            ..FileLoader::default()
        };
        assert!(matches!(
            loader.load_catalog(),
            Err(LoadError::Catalog(CatalogError::MissingTopTierWeapon))
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn catalog_without_a_market_potion_is_rejected() {
        let json = r#"{ "items": [{
            "id": "steel_sword", "name": "Steel Sword", "category": "weapon",
            "cost": 20, "effect": 20, "shop": "blacksmith"
        }] }"#;
        let path = temp_file("no-potion", json);
        let loader = FileLoader {
            catalog: Some(path.clone()),
            ..FileLoader::default()
        };
        assert!(matches!(
            loader.load_catalog(),
            Err(LoadError::Catalog(CatalogError::MissingMarketPotion))
        ));
        let _ = fs::remove_file(path);
    }
}
