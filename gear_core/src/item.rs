use crate::stats::{Attributes, SpecialStats, StatContext};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name prefix of the placeholder items inserted into empty slots
pub const EMPTY_ITEM_PREFIX: &str = "empty_";

/// An activated ability on an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseEffect {
    pub name: String,
    #[serde(default)]
    pub sharing: EffectSharing,
    /// Active duration in seconds
    pub duration: f64,
    /// Seconds between uses; carried through for the external simulator
    #[serde(default)]
    pub cooldown: f64,
    #[serde(default)]
    pub stats: SpecialStats,
    #[serde(default)]
    pub attributes: Attributes,
}

impl UseEffect {
    /// Special stats granted while the effect is active
    pub fn special_stat_equivalent(&self, context: &StatContext) -> SpecialStats {
        self.stats + self.attributes.convert_to_special_stats(context)
    }

    /// Fraction of the fight the effect is active, capped at one
    pub fn uptime(&self, sim_time: f64) -> f64 {
        if sim_time <= 0.0 {
            return 1.0;
        }
        (self.duration / sim_time).min(1.0)
    }
}

/// An on-hit proc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitEffect {
    pub name: String,
    pub kind: HitEffectKind,
    /// Chance per hit, 0..=1
    pub probability: f64,
    /// Damage per proc for damage kinds
    #[serde(default)]
    pub damage: f64,
    /// Buff or debuff length in seconds; carried through for the external simulator
    #[serde(default)]
    pub duration: f64,
    /// Stats granted by a stat-boost proc; carried through for the external
    /// simulator, since such procs are never scored here
    #[serde(default)]
    pub stats: SpecialStats,
}

/// A set bonus entry: stats granted once `pieces` items of `set` are worn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBonus {
    pub set: String,
    pub pieces: u32,
    #[serde(default)]
    pub stats: SpecialStats,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SetBonus {
    pub fn special_stat_equivalent(&self, context: &StatContext) -> SpecialStats {
        self.stats + self.attributes.convert_to_special_stats(context)
    }
}

/// A candidate armor piece, ring, trinket or ranged item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub slot: Slot,
    #[serde(default)]
    pub stats: SpecialStats,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub use_effects: Vec<UseEffect>,
    #[serde(default)]
    pub hit_effects: Vec<HitEffect>,
}

impl Armor {
    /// Zero-stat placeholder for a slot with no candidates
    pub fn empty(slot: Slot) -> Self {
        Armor {
            name: format!("{}{}", EMPTY_ITEM_PREFIX, slot),
            slot,
            stats: SpecialStats::default(),
            attributes: Attributes::default(),
            set_name: None,
            use_effects: Vec::new(),
            hit_effects: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.starts_with(EMPTY_ITEM_PREFIX)
    }

    /// Base stats with attributes resolved
    pub fn base_special_stats(&self, context: &StatContext) -> SpecialStats {
        self.stats + self.attributes.convert_to_special_stats(context)
    }
}

/// A candidate weapon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub weapon_type: WeaponType,
    pub hand: WeaponHand,
    pub min_damage: f64,
    pub max_damage: f64,
    /// Seconds between swings
    pub swing_speed: f64,
    #[serde(default)]
    pub stats: SpecialStats,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub hit_effects: Vec<HitEffect>,
}

impl Weapon {
    /// Placeholder for an empty hand
    pub fn empty(side: HandSide) -> Self {
        let (suffix, hand) = match side {
            HandSide::Main => ("main_hand", WeaponHand::MainHand),
            HandSide::Off => ("off_hand", WeaponHand::OffHand),
        };
        Weapon {
            name: format!("{}{}", EMPTY_ITEM_PREFIX, suffix),
            weapon_type: WeaponType::Unarmed,
            hand,
            min_damage: 0.0,
            max_damage: 0.0,
            swing_speed: 2.0,
            stats: SpecialStats::default(),
            attributes: Attributes::default(),
            set_name: None,
            hit_effects: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.starts_with(EMPTY_ITEM_PREFIX)
    }

    pub fn average_damage(&self) -> f64 {
        (self.min_damage + self.max_damage) / 2.0
    }

    /// Average damage per second of weapon time
    pub fn damage_rate(&self) -> f64 {
        if self.swing_speed <= 0.0 {
            return 0.0;
        }
        self.average_damage() / self.swing_speed
    }

    pub fn base_special_stats(&self, context: &StatContext) -> SpecialStats {
        self.stats + self.attributes.convert_to_special_stats(context)
    }
}

impl fmt::Display for SpecialStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.attack_power != 0.0 {
            parts.push(format!("{} AP", self.attack_power));
        }
        if self.hit != 0.0 {
            parts.push(format!("{}% hit", self.hit));
        }
        if self.critical_strike != 0.0 {
            parts.push(format!("{}% crit", self.critical_strike));
        }
        for (skill, label) in [
            (self.sword_skill, "sword"),
            (self.axe_skill, "axe"),
            (self.mace_skill, "mace"),
            (self.dagger_skill, "dagger"),
        ] {
            if skill != 0.0 {
                parts.push(format!("+{} {} skill", skill, label));
            }
        }
        if parts.is_empty() {
            write!(f, "no stats")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

impl fmt::Display for Armor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        writeln!(f, "Slot: {}", self.slot)?;
        write!(f, "Stats: {}", self.stats)?;
        if !self.attributes.is_zero() {
            write!(
                f,
                "\nAttributes: {} str, {} agi",
                self.attributes.strength, self.attributes.agility
            )?;
        }
        if let Some(ref set) = self.set_name {
            write!(f, "\nSet: {}", set)?;
        }
        for effect in &self.use_effects {
            write!(f, "\nUse: {} ({}s)", effect.name, effect.duration)?;
        }
        for effect in &self.hit_effects {
            write!(f, "\nChance on hit: {} ({:.1}%)", effect.name, effect.probability * 100.0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        writeln!(f, "{} ({:?})", self.weapon_type, self.hand)?;
        writeln!(
            f,
            "Damage: {}-{}  Speed: {:.2}",
            self.min_damage, self.max_damage, self.swing_speed
        )?;
        write!(f, "Stats: {}", self.stats)?;
        if let Some(ref set) = self.set_name {
            write!(f, "\nSet: {}", set)?;
        }
        for effect in &self.hit_effects {
            write!(f, "\nChance on hit: {} ({:.1}%)", effect.name, effect.probability * 100.0)?;
        }
        Ok(())
    }
}
