use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment locations that hold armor-like items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Belt,
    Legs,
    Boots,
    Ranged,
    Ring,
    Trinket,
}

impl Slot {
    /// All armor slots, in lookup order.
    ///
    /// Name resolution probes slots in this order and keeps the first hit.
    pub fn all() -> &'static [Slot] {
        &[
            Slot::Head,
            Slot::Neck,
            Slot::Shoulder,
            Slot::Back,
            Slot::Chest,
            Slot::Wrist,
            Slot::Hands,
            Slot::Belt,
            Slot::Legs,
            Slot::Boots,
            Slot::Ranged,
            Slot::Ring,
            Slot::Trinket,
        ]
    }

    /// Slots that hold exactly one item
    pub fn single() -> &'static [Slot] {
        &Slot::all()[..11]
    }

    /// Whether two items from this slot's catalog are equipped at the same time
    pub fn is_dual(&self) -> bool {
        matches!(self, Slot::Ring | Slot::Trinket)
    }

    /// Minimum number of candidates the slot list must keep
    pub fn min_candidates(&self) -> usize {
        if self.is_dual() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Shoulder => "shoulder",
            Slot::Back => "back",
            Slot::Chest => "chest",
            Slot::Wrist => "wrist",
            Slot::Hands => "hands",
            Slot::Belt => "belt",
            Slot::Legs => "legs",
            Slot::Boots => "boots",
            Slot::Ranged => "ranged",
            Slot::Ring => "ring",
            Slot::Trinket => "trinket",
        };
        write!(f, "{}", name)
    }
}

/// Weapon families; skill bonuses apply per family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Sword,
    Axe,
    Mace,
    Dagger,
    Fist,
    #[default]
    Unarmed,
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponType::Sword => write!(f, "Sword"),
            WeaponType::Axe => write!(f, "Axe"),
            WeaponType::Mace => write!(f, "Mace"),
            WeaponType::Dagger => write!(f, "Dagger"),
            WeaponType::Fist => write!(f, "Fist"),
            WeaponType::Unarmed => write!(f, "Unarmed"),
        }
    }
}

/// Which hand(s) a weapon may occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponHand {
    /// Usable in either hand
    OneHand,
    MainHand,
    OffHand,
    TwoHand,
}

impl WeaponHand {
    pub fn fits_main_hand(&self) -> bool {
        matches!(self, WeaponHand::OneHand | WeaponHand::MainHand)
    }

    pub fn fits_off_hand(&self) -> bool {
        matches!(self, WeaponHand::OneHand | WeaponHand::OffHand)
    }
}

/// The hand a weapon list is being filtered for.
///
/// Slower weapons are favored in the main hand, faster ones in the off hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandSide {
    Main,
    Off,
}

impl fmt::Display for HandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandSide::Main => write!(f, "main-hand"),
            HandSide::Off => write!(f, "off-hand"),
        }
    }
}

/// Whether a use effect shares its cooldown with other use effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EffectSharing {
    /// Independent cooldown, can always be active alongside others
    Unique,
    /// One global cooldown; only one such effect is active at a time
    #[default]
    Shared,
}

/// Kinds of on-hit procs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitEffectKind {
    DamageMagicGuaranteed,
    DamageMagic,
    DamagePhysical,
    ExtraHit,
    StatBoost,
    ReduceArmor,
}

impl HitEffectKind {
    /// Procs whose value is a flat amount of damage
    pub fn is_damage(&self) -> bool {
        matches!(
            self,
            HitEffectKind::DamageMagicGuaranteed
                | HitEffectKind::DamageMagic
                | HitEffectKind::DamagePhysical
        )
    }
}
