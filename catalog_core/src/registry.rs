use crate::config::{CatalogFileConfig, FileFormat};
use crate::ConfigError;
use gear_core::{Armor, SetBonus, Slot, Weapon};
use optimizer_core::ItemLookup;
use std::collections::HashMap;
use std::path::Path;

/// Catalog of all items and set bonuses, loaded from TOML or JSON files
#[derive(Debug, Default)]
pub struct ItemCatalog {
    armor: HashMap<String, Armor>,
    weapons: HashMap<String, Weapon>,
    set_bonuses: Vec<SetBonus>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every catalog file in a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        catalog.load_dir(dir)?;
        log::info!(
            "loaded {} armor, {} weapons, {} set bonuses from {}",
            catalog.armor.len(),
            catalog.weapons.len(),
            catalog.set_bonuses.len(),
            dir.display()
        );
        Ok(catalog)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        // Sorted so duplicate-name errors always name the same file
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if let Some(format) = FileFormat::from_path(&path) {
                self.load_file(&path, format)?;
            }
        }

        Ok(())
    }

    /// Load a single catalog file
    pub fn load_file(&mut self, path: &Path, format: FileFormat) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: CatalogFileConfig = match format {
            FileFormat::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                error: e,
                path: path.to_path_buf(),
            })?,
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Json {
                error: e,
                path: path.to_path_buf(),
            })?,
        };

        config.validate().map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;

        self.merge(config).map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;
        log::debug!("loaded catalog file {}", path.display());
        Ok(())
    }

    /// Add a validated file's entries, rejecting names already loaded
    fn merge(&mut self, config: CatalogFileConfig) -> Result<(), String> {
        for armor in config.armor {
            if self.armor.contains_key(&armor.name) {
                return Err(format!("armor '{}' already defined", armor.name));
            }
            self.armor.insert(armor.name.clone(), armor);
        }
        for weapon in config.weapons {
            if self.weapons.contains_key(&weapon.name) {
                return Err(format!("weapon '{}' already defined", weapon.name));
            }
            self.weapons.insert(weapon.name.clone(), weapon);
        }
        self.set_bonuses.extend(config.set_bonuses);
        Ok(())
    }

    /// Check if an armor item or weapon exists
    pub fn contains(&self, name: &str) -> bool {
        self.armor.contains_key(name) || self.weapons.contains_key(name)
    }

    /// Armor names in a slot, sorted
    pub fn armor_names(&self, slot: Slot) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .armor
            .values()
            .filter(|a| a.slot == slot)
            .map(|a| a.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// All weapon names, sorted
    pub fn weapon_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.weapons.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl ItemLookup for ItemCatalog {
    fn find_armor(&self, slot: Slot, name: &str) -> Option<Armor> {
        self.armor.get(name).filter(|a| a.slot == slot).cloned()
    }

    fn find_weapon(&self, name: &str) -> Option<Weapon> {
        self.weapons.get(name).cloned()
    }

    fn set_bonuses(&self) -> &[SetBonus] {
        &self.set_bonuses
    }
}
