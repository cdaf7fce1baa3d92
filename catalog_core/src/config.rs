use gear_core::{Armor, SetBonus, Weapon};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Serialization format of a catalog file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(FileFormat::Toml),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }
}

/// Contents of one catalog file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFileConfig {
    #[serde(default)]
    pub armor: Vec<Armor>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub set_bonuses: Vec<SetBonus>,
}

impl CatalogFileConfig {
    /// Check the entries of a single file
    pub fn validate(&self) -> Result<(), String> {
        let mut armor_names = HashSet::new();
        for armor in &self.armor {
            if armor.name.is_empty() {
                return Err(format!("armor in slot {} has an empty name", armor.slot));
            }
            if !armor_names.insert(armor.name.as_str()) {
                return Err(format!("duplicate armor '{}'", armor.name));
            }
        }

        let mut weapon_names = HashSet::new();
        for weapon in &self.weapons {
            if weapon.name.is_empty() {
                return Err("weapon has an empty name".to_string());
            }
            if !weapon_names.insert(weapon.name.as_str()) {
                return Err(format!("duplicate weapon '{}'", weapon.name));
            }
            if weapon.swing_speed.is_nan() || weapon.swing_speed <= 0.0 {
                return Err(format!(
                    "weapon '{}' has non-positive swing speed {}",
                    weapon.name, weapon.swing_speed
                ));
            }
            if weapon.min_damage > weapon.max_damage {
                return Err(format!(
                    "weapon '{}' has min damage {} above max damage {}",
                    weapon.name, weapon.min_damage, weapon.max_damage
                ));
            }
        }

        for bonus in &self.set_bonuses {
            if bonus.pieces == 0 {
                return Err(format!("set bonus for '{}' requires zero pieces", bonus.set));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a/b.toml")), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_path(Path::new("b.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("README.md")), None);
        assert_eq!(FileFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: CatalogFileConfig = toml::from_str(
            r#"
[[armor]]
name = "lionheart_helm"
slot = "head"
stats = { hit = 2.0, critical_strike = 2.0 }
attributes = { strength = 18.0 }
"#,
        )
        .unwrap();
        assert_eq!(config.armor.len(), 1);
        assert!(config.weapons.is_empty());
        assert!((config.armor[0].attributes.strength - 18.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_damage() {
        let config: CatalogFileConfig = toml::from_str(
            r#"
[[weapons]]
name = "backwards_blade"
weapon_type = "sword"
hand = "one_hand"
min_damage = 90.0
max_damage = 50.0
swing_speed = 2.6
"#,
        )
        .unwrap();
        let message = config.validate().unwrap_err();
        assert!(message.contains("backwards_blade"));
    }

    #[test]
    fn test_rejects_duplicate_armor() {
        let config: CatalogFileConfig = toml::from_str(
            r#"
[[armor]]
name = "twin"
slot = "neck"

[[armor]]
name = "twin"
slot = "back"
"#,
        )
        .unwrap();
        assert!(config.validate().unwrap_err().contains("duplicate"));
    }
}
