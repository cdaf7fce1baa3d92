//! gear_core - Item and stat data model for gear optimization
//!
//! Candidate armor and weapons, the additive special-stat bundle they are
//! compared by, and the attribute conversion context.

pub mod item;
pub mod stats;
pub mod types;

pub use item::{Armor, HitEffect, SetBonus, UseEffect, Weapon, EMPTY_ITEM_PREFIX};
pub use stats::{Attributes, SpecialStats, StatContext};
pub use types::{EffectSharing, HandSide, HitEffectKind, Slot, WeaponHand, WeaponType};
