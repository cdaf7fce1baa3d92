//! Pair and weapon-set generation for slots holding two items

use gear_core::Weapon;
use serde::Serialize;
use std::collections::HashSet;

/// All unordered index pairs `(i, j)` with `i < j`
pub fn index_pairs(len: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(len * len.saturating_sub(1) / 2);
    for i in 0..len {
        for j in (i + 1)..len {
            pairs.push((i, j));
        }
    }
    pairs
}

/// One way of filling the weapon hands, by index into the filtered lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponSet {
    DualWield { main: usize, off: usize },
    TwoHand(usize),
}

/// Every distinct weapon set.
///
/// Dual-wield pairs never repeat an item name and never repeat a
/// (main, off) name pair; each two-hander adds one set of its own.
pub fn weapon_sets(
    main_hands: &[Weapon],
    off_hands: &[Weapon],
    two_hands: &[Weapon],
) -> Vec<WeaponSet> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut sets = Vec::new();
    for (main, main_weapon) in main_hands.iter().enumerate() {
        for (off, off_weapon) in off_hands.iter().enumerate() {
            if main_weapon.name == off_weapon.name {
                continue;
            }
            if seen.insert((main_weapon.name.as_str(), off_weapon.name.as_str())) {
                sets.push(WeaponSet::DualWield { main, off });
            }
        }
    }
    sets.extend((0..two_hands.len()).map(WeaponSet::TwoHand));
    sets
}
