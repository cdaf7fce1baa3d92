//! Special-stat bundles and attribute conversion

use crate::types::WeaponType;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Additive vector of combat stat contributions.
///
/// Hit and critical strike are in percent, skills in skill points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialStats {
    pub hit: f64,
    pub critical_strike: f64,
    pub attack_power: f64,
    pub sword_skill: f64,
    pub axe_skill: f64,
    pub mace_skill: f64,
    pub dagger_skill: f64,
}

impl SpecialStats {
    /// Number of compared components
    pub const LEN: usize = 7;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attack_power(attack_power: f64) -> Self {
        SpecialStats {
            attack_power,
            ..Default::default()
        }
    }

    /// Components in a fixed order, used for componentwise comparison
    pub fn components(&self) -> [f64; Self::LEN] {
        [
            self.hit,
            self.critical_strike,
            self.attack_power,
            self.sword_skill,
            self.axe_skill,
            self.mace_skill,
            self.dagger_skill,
        ]
    }

    /// Skill bonus that applies to a given weapon family
    pub fn skill_of_type(&self, weapon_type: WeaponType) -> f64 {
        match weapon_type {
            WeaponType::Sword => self.sword_skill,
            WeaponType::Axe => self.axe_skill,
            WeaponType::Mace => self.mace_skill,
            WeaponType::Dagger => self.dagger_skill,
            WeaponType::Fist | WeaponType::Unarmed => 0.0,
        }
    }

    /// Best skill bonus over all weapon families (never negative)
    pub fn max_skill(&self) -> f64 {
        [
            self.sword_skill,
            self.axe_skill,
            self.mace_skill,
            self.dagger_skill,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    /// Every component multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> SpecialStats {
        SpecialStats {
            hit: self.hit * factor,
            critical_strike: self.critical_strike * factor,
            attack_power: self.attack_power * factor,
            sword_skill: self.sword_skill * factor,
            axe_skill: self.axe_skill * factor,
            mace_skill: self.mace_skill * factor,
            dagger_skill: self.dagger_skill * factor,
        }
    }

    /// Every component of `self` is at least the matching component of `other`
    pub fn all_at_least(&self, other: &SpecialStats) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| a >= b)
    }

    /// At least one component of `self` exceeds the matching component of `other`
    pub fn any_greater(&self, other: &SpecialStats) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .any(|(a, b)| a > b)
    }
}

impl Add for SpecialStats {
    type Output = SpecialStats;

    fn add(mut self, rhs: SpecialStats) -> SpecialStats {
        self += rhs;
        self
    }
}

impl AddAssign for SpecialStats {
    fn add_assign(&mut self, rhs: SpecialStats) {
        self.hit += rhs.hit;
        self.critical_strike += rhs.critical_strike;
        self.attack_power += rhs.attack_power;
        self.sword_skill += rhs.sword_skill;
        self.axe_skill += rhs.axe_skill;
        self.mace_skill += rhs.mace_skill;
        self.dagger_skill += rhs.dagger_skill;
    }
}

impl std::iter::Sum for SpecialStats {
    fn sum<I: Iterator<Item = SpecialStats>>(iter: I) -> Self {
        iter.fold(SpecialStats::default(), |acc, s| acc + s)
    }
}

/// Primary attributes carried by gear
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: f64,
    pub agility: f64,
}

impl Attributes {
    pub fn is_zero(&self) -> bool {
        self.strength == 0.0 && self.agility == 0.0
    }

    /// Resolve attributes into special stats for a character context
    pub fn convert_to_special_stats(&self, context: &StatContext) -> SpecialStats {
        let strength = self.strength * context.stat_multiplier;
        let agility = self.agility * context.stat_multiplier;
        let critical_strike = if context.agility_per_crit > 0.0 {
            agility / context.agility_per_crit
        } else {
            0.0
        };
        SpecialStats {
            attack_power: strength * context.ap_per_strength + agility * context.ap_per_agility,
            critical_strike,
            ..Default::default()
        }
    }
}

impl Add for Attributes {
    type Output = Attributes;

    fn add(self, rhs: Attributes) -> Attributes {
        Attributes {
            strength: self.strength + rhs.strength,
            agility: self.agility + rhs.agility,
        }
    }
}

/// Baseline character context for attribute conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatContext {
    /// Attack power per point of strength
    #[serde(default = "default_ap_per_strength")]
    pub ap_per_strength: f64,
    /// Attack power per point of agility
    #[serde(default)]
    pub ap_per_agility: f64,
    /// Agility needed for one percent of critical strike at the character's level
    #[serde(default = "default_agility_per_crit")]
    pub agility_per_crit: f64,
    /// Multiplier on all attributes (e.g. from a raid buff)
    #[serde(default = "default_stat_multiplier")]
    pub stat_multiplier: f64,
}

impl Default for StatContext {
    fn default() -> Self {
        StatContext {
            ap_per_strength: default_ap_per_strength(),
            ap_per_agility: 0.0,
            agility_per_crit: default_agility_per_crit(),
            stat_multiplier: default_stat_multiplier(),
        }
    }
}

fn default_ap_per_strength() -> f64 {
    2.0
}
fn default_agility_per_crit() -> f64 {
    20.0
}
fn default_stat_multiplier() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_componentwise() {
        let a = SpecialStats {
            hit: 1.0,
            attack_power: 20.0,
            sword_skill: 5.0,
            ..Default::default()
        };
        let b = SpecialStats {
            hit: 2.0,
            critical_strike: 1.0,
            axe_skill: 3.0,
            ..Default::default()
        };
        let sum = a + b;
        assert!((sum.hit - 3.0).abs() < f64::EPSILON);
        assert!((sum.critical_strike - 1.0).abs() < f64::EPSILON);
        assert!((sum.attack_power - 20.0).abs() < f64::EPSILON);
        assert!((sum.sword_skill - 5.0).abs() < f64::EPSILON);
        assert!((sum.axe_skill - 3.0).abs() < f64::EPSILON);
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn test_componentwise_comparison() {
        let weak = SpecialStats::with_attack_power(10.0);
        let strong = SpecialStats {
            attack_power: 10.0,
            hit: 1.0,
            ..Default::default()
        };
        assert!(strong.all_at_least(&weak));
        assert!(strong.any_greater(&weak));
        assert!(!weak.all_at_least(&strong));
        assert!(weak.all_at_least(&weak));
        assert!(!weak.any_greater(&weak));
    }

    #[test]
    fn test_scaled() {
        let stats = SpecialStats {
            attack_power: 200.0,
            hit: 2.0,
            ..Default::default()
        };
        let half = stats.scaled(0.5);
        assert!((half.attack_power - 100.0).abs() < f64::EPSILON);
        assert!((half.hit - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.scaled(0.0), SpecialStats::default());
    }

    #[test]
    fn test_max_skill_ignores_negative() {
        let stats = SpecialStats {
            sword_skill: -3.0,
            ..Default::default()
        };
        assert!((stats.max_skill() - 0.0).abs() < f64::EPSILON);

        let stats = SpecialStats {
            mace_skill: 4.0,
            dagger_skill: 7.0,
            ..Default::default()
        };
        assert!((stats.max_skill() - 7.0).abs() < f64::EPSILON);
        assert!((stats.skill_of_type(WeaponType::Mace) - 4.0).abs() < f64::EPSILON);
        assert!((stats.skill_of_type(WeaponType::Fist) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attribute_conversion() {
        let context = StatContext {
            stat_multiplier: 1.1,
            ..Default::default()
        };
        let attrs = Attributes {
            strength: 10.0,
            agility: 20.0,
        };
        let stats = attrs.convert_to_special_stats(&context);
        // 10 * 1.1 * 2 = 22 AP, 20 * 1.1 / 20 = 1.1% crit
        assert!((stats.attack_power - 22.0).abs() < 1e-9);
        assert!((stats.critical_strike - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_parse_stat_context_defaults() {
        let context: StatContext = toml::from_str("ap_per_agility = 1.0").unwrap();
        assert!((context.ap_per_agility - 1.0).abs() < f64::EPSILON);
        assert!((context.ap_per_strength - 2.0).abs() < f64::EPSILON);
        assert!((context.agility_per_crit - 20.0).abs() < f64::EPSILON);
    }
}
