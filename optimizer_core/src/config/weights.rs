//! Attack-power equivalence weights

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Linear weights converting stats into attack-power equivalents.
///
/// The plain fields drive the optimistic (high) estimate, the `_low` fields
/// the pessimistic (low) one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorWeights {
    /// AP per percent of hit, below the hit cap
    #[serde(default = "default_ap_per_hit")]
    pub ap_per_hit: f64,
    /// AP per percent of hit, past the cap
    #[serde(default = "default_ap_per_hit_low")]
    pub ap_per_hit_low: f64,
    #[serde(default = "default_ap_per_crit")]
    pub ap_per_crit: f64,
    #[serde(default = "default_ap_per_crit_low")]
    pub ap_per_crit_low: f64,
    /// AP per weapon-skill point below the soft cap
    #[serde(default = "default_ap_per_skill")]
    pub ap_per_skill: f64,
    /// AP per weapon-skill point above the soft cap
    #[serde(default = "default_ap_per_skill_soft")]
    pub ap_per_skill_soft: f64,
    #[serde(default = "default_ap_per_skill_low")]
    pub ap_per_skill_low: f64,
    /// Skill points that count at the full rate
    #[serde(default = "default_skill_soft_cap")]
    pub skill_soft_cap: f64,
    /// Skill assumed from other gear when comparing different weapon families.
    ///
    /// Only used by direct `estimate_weapon_high` callers: the dominance
    /// filter compares weapons of the same type and never applies it.
    #[serde(default = "default_cross_type_skill_bonus")]
    pub cross_type_skill_bonus: f64,
    /// AP per point of average proc damage per hit
    #[serde(default = "default_ap_per_proc_damage")]
    pub ap_per_proc_damage: f64,
    /// AP per unit of extra-swing probability
    #[serde(default = "default_ap_per_extra_swing")]
    pub ap_per_extra_swing: f64,
    /// Flat AP assumed for temporary stat-boost procs in the total estimate
    #[serde(default = "default_ap_per_stat_boost_proc")]
    pub ap_per_stat_boost_proc: f64,
    /// AP per point of weapon damage per second
    #[serde(default = "default_ap_per_dps")]
    pub ap_per_dps: f64,
    /// AP per second of swing-speed deviation from `reference_speed`
    #[serde(default = "default_ap_per_speed_second")]
    pub ap_per_speed_second: f64,
    #[serde(default = "default_reference_speed")]
    pub reference_speed: f64,
    /// Relative weight of the off hand in the total estimate
    #[serde(default = "default_off_hand_factor")]
    pub off_hand_factor: f64,
}

impl Default for EstimatorWeights {
    fn default() -> Self {
        EstimatorWeights {
            ap_per_hit: default_ap_per_hit(),
            ap_per_hit_low: default_ap_per_hit_low(),
            ap_per_crit: default_ap_per_crit(),
            ap_per_crit_low: default_ap_per_crit_low(),
            ap_per_skill: default_ap_per_skill(),
            ap_per_skill_soft: default_ap_per_skill_soft(),
            ap_per_skill_low: default_ap_per_skill_low(),
            skill_soft_cap: default_skill_soft_cap(),
            cross_type_skill_bonus: default_cross_type_skill_bonus(),
            ap_per_proc_damage: default_ap_per_proc_damage(),
            ap_per_extra_swing: default_ap_per_extra_swing(),
            ap_per_stat_boost_proc: default_ap_per_stat_boost_proc(),
            ap_per_dps: default_ap_per_dps(),
            ap_per_speed_second: default_ap_per_speed_second(),
            reference_speed: default_reference_speed(),
            off_hand_factor: default_off_hand_factor(),
        }
    }
}

impl EstimatorWeights {
    /// Load weights from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let weights: EstimatorWeights = super::load_toml(path)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Parse weights from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let weights: EstimatorWeights = super::parse_toml(content)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("ap_per_hit", self.ap_per_hit),
            ("ap_per_hit_low", self.ap_per_hit_low),
            ("ap_per_crit", self.ap_per_crit),
            ("ap_per_crit_low", self.ap_per_crit_low),
            ("ap_per_skill", self.ap_per_skill),
            ("ap_per_skill_soft", self.ap_per_skill_soft),
            ("ap_per_skill_low", self.ap_per_skill_low),
            ("skill_soft_cap", self.skill_soft_cap),
            ("cross_type_skill_bonus", self.cross_type_skill_bonus),
            ("ap_per_proc_damage", self.ap_per_proc_damage),
            ("ap_per_extra_swing", self.ap_per_extra_swing),
            ("ap_per_stat_boost_proc", self.ap_per_stat_boost_proc),
            ("ap_per_dps", self.ap_per_dps),
            ("ap_per_speed_second", self.ap_per_speed_second),
            ("off_hand_factor", self.off_hand_factor),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "weight '{}' must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !(self.reference_speed > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "reference_speed must be positive, got {}",
                self.reference_speed
            )));
        }
        Ok(())
    }
}

fn default_ap_per_hit() -> f64 {
    25.0
}
fn default_ap_per_hit_low() -> f64 {
    10.0
}
fn default_ap_per_crit() -> f64 {
    25.0
}
fn default_ap_per_crit_low() -> f64 {
    20.0
}
fn default_ap_per_skill() -> f64 {
    20.0
}
fn default_ap_per_skill_soft() -> f64 {
    5.0
}
fn default_ap_per_skill_low() -> f64 {
    4.0
}
fn default_skill_soft_cap() -> f64 {
    5.0
}
fn default_cross_type_skill_bonus() -> f64 {
    5.0
}
fn default_ap_per_proc_damage() -> f64 {
    6.0
}
fn default_ap_per_extra_swing() -> f64 {
    2500.0
}
fn default_ap_per_stat_boost_proc() -> f64 {
    140.0
}
fn default_ap_per_dps() -> f64 {
    14.0
}
fn default_ap_per_speed_second() -> f64 {
    100.0
}
fn default_reference_speed() -> f64 {
    2.3
}
fn default_off_hand_factor() -> f64 {
    0.625
}
