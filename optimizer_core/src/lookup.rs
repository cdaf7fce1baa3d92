//! Collaborator contracts: item lookup and character construction

use gear_core::{Armor, SetBonus, Slot, SpecialStats, Weapon};

/// Read-only item database.
///
/// Unknown names resolve to `None` and are skipped by candidate extraction.
pub trait ItemLookup {
    fn find_armor(&self, slot: Slot, name: &str) -> Option<Armor>;

    fn find_weapon(&self, name: &str) -> Option<Weapon>;

    /// Every known set bonus entry
    fn set_bonuses(&self) -> &[SetBonus];
}

/// A character that gear can be equipped on
pub trait CharacterModel {
    fn equip_armor(&mut self, armor: &Armor);

    /// Equip a weapon set; `off_hand` is `None` for a two-handed weapon
    fn equip_weapons(&mut self, main_hand: &Weapon, off_hand: Option<&Weapon>);

    /// Aggregated special stats, valid after `CharacterBuilder::compute_total_stats`
    fn total_special_stats(&self) -> SpecialStats;
}

/// Creates characters and applies the non-gear parts of a loadout.
///
/// The assembler calls `add_enchants`, `add_buffs` and `compute_total_stats`
/// in that order, after every equip call.
pub trait CharacterBuilder {
    type Character: CharacterModel;

    fn new_character(&self) -> Self::Character;

    fn add_enchants(&self, character: &mut Self::Character, enchants: &[String]);

    fn add_buffs(&self, character: &mut Self::Character, buffs: &[String]);

    fn compute_total_stats(&self, character: &mut Self::Character);
}
