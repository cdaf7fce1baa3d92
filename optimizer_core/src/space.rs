//! The pruned combination space and character assembly

use crate::codec::{CodecError, MixedRadix};
use crate::combination::{index_pairs, weapon_sets, WeaponSet};
use crate::lookup::{CharacterBuilder, CharacterModel};
use crate::pool::FilteredPool;
use gear_core::{Armor, Slot, UseEffect, Weapon};
use std::fmt;

/// One axis of the combination space, in codec order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Single(Slot),
    RingPair,
    TrinketPair,
    WeaponSet,
}

impl Dimension {
    /// Every dimension: single-item slots, then ring pair, trinket pair, weapons
    pub fn all() -> Vec<Dimension> {
        let mut dimensions: Vec<Dimension> =
            Slot::single().iter().map(|&slot| Dimension::Single(slot)).collect();
        dimensions.extend([
            Dimension::RingPair,
            Dimension::TrinketPair,
            Dimension::WeaponSet,
        ]);
        dimensions
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Single(slot) => write!(f, "{}", slot),
            Dimension::RingPair => write!(f, "rings"),
            Dimension::TrinketPair => write!(f, "trinkets"),
            Dimension::WeaponSet => write!(f, "weapons"),
        }
    }
}

/// Concrete items selected by one decoded index
#[derive(Debug, Clone)]
pub struct Loadout<'a> {
    /// Single-slot items in slot order, then both rings, then both trinkets
    pub armor: Vec<&'a Armor>,
    pub main_hand: &'a Weapon,
    /// `None` when the main hand holds a two-hander
    pub off_hand: Option<&'a Weapon>,
}

impl<'a> Loadout<'a> {
    /// Every use effect on the equipped armor
    pub fn use_effects(&self) -> Vec<&'a UseEffect> {
        self.armor
            .iter()
            .flat_map(|armor| armor.use_effects.iter())
            .collect()
    }

    pub fn item_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = self.armor.iter().map(|a| a.name.as_str()).collect();
        names.push(self.main_hand.name.as_str());
        if let Some(off) = self.off_hand {
            names.push(off.name.as_str());
        }
        names
    }
}

/// Filtered candidates, their pair combinations and the index codec.
///
/// Immutable once built; decoding and assembly only read it.
#[derive(Debug, Clone)]
pub struct CombinationSpace {
    pool: FilteredPool,
    ring_pairs: Vec<(usize, usize)>,
    trinket_pairs: Vec<(usize, usize)>,
    weapon_sets: Vec<WeaponSet>,
    codec: MixedRadix,
}

impl CombinationSpace {
    pub fn build(pool: FilteredPool) -> Result<Self, CodecError> {
        let ring_pairs = index_pairs(pool.slot(Slot::Ring).len());
        let trinket_pairs = index_pairs(pool.slot(Slot::Trinket).len());
        let weapon_sets = weapon_sets(pool.main_hands(), pool.off_hands(), pool.two_hands());

        let radices = Dimension::all()
            .into_iter()
            .map(|dimension| match dimension {
                Dimension::Single(slot) => pool.slot(slot).len(),
                Dimension::RingPair => ring_pairs.len(),
                Dimension::TrinketPair => trinket_pairs.len(),
                Dimension::WeaponSet => weapon_sets.len(),
            })
            .collect();
        let codec = MixedRadix::new(radices)?;
        log::info!("combination space holds {} loadouts", codec.total());

        Ok(CombinationSpace {
            pool,
            ring_pairs,
            trinket_pairs,
            weapon_sets,
            codec,
        })
    }

    pub fn total(&self) -> u64 {
        self.codec.total()
    }

    /// Per-dimension choice counts, in `Dimension::all()` order
    pub fn cardinalities(&self) -> &[usize] {
        self.codec.radices()
    }

    pub fn pool(&self) -> &FilteredPool {
        &self.pool
    }

    pub fn weapon_sets(&self) -> &[WeaponSet] {
        &self.weapon_sets
    }

    pub fn decode(&self, index: u64) -> Result<Vec<usize>, CodecError> {
        self.codec.decode(index)
    }

    pub fn encode(&self, picks: &[usize]) -> Result<u64, CodecError> {
        self.codec.encode(picks)
    }

    /// Map decoded picks to the items they select
    pub fn resolve(&self, picks: &[usize]) -> Result<Loadout<'_>, CodecError> {
        // Validates arity and ranges
        self.codec.encode(picks)?;

        let mut armor = Vec::with_capacity(15);
        let mut main_hand = None;
        let mut off_hand = None;
        for (dimension, &pick) in Dimension::all().into_iter().zip(picks) {
            match dimension {
                Dimension::Single(slot) => armor.push(&self.pool.slot(slot)[pick]),
                Dimension::RingPair => {
                    let (a, b) = self.ring_pairs[pick];
                    let rings = self.pool.slot(Slot::Ring);
                    armor.extend([&rings[a], &rings[b]]);
                }
                Dimension::TrinketPair => {
                    let (a, b) = self.trinket_pairs[pick];
                    let trinkets = self.pool.slot(Slot::Trinket);
                    armor.extend([&trinkets[a], &trinkets[b]]);
                }
                Dimension::WeaponSet => match self.weapon_sets[pick] {
                    WeaponSet::DualWield { main, off } => {
                        main_hand = Some(&self.pool.main_hands()[main]);
                        off_hand = Some(&self.pool.off_hands()[off]);
                    }
                    WeaponSet::TwoHand(index) => {
                        main_hand = Some(&self.pool.two_hands()[index]);
                    }
                },
            }
        }

        let main_hand = main_hand.ok_or(CodecError::ArityMismatch {
            expected: self.codec.dimensions(),
            actual: picks.len(),
        })?;
        Ok(Loadout {
            armor,
            main_hand,
            off_hand,
        })
    }

    /// Build a character for a loadout.
    ///
    /// All gear is equipped before enchants, buffs and stat totals are
    /// applied, so stat-dependent conversions see the complete set.
    pub fn assemble<B: CharacterBuilder>(
        &self,
        builder: &B,
        loadout: &Loadout<'_>,
        enchants: &[String],
        buffs: &[String],
    ) -> B::Character {
        let mut character = builder.new_character();
        for armor in &loadout.armor {
            character.equip_armor(armor);
        }
        character.equip_weapons(loadout.main_hand, loadout.off_hand);
        builder.add_enchants(&mut character, enchants);
        builder.add_buffs(&mut character, buffs);
        builder.compute_total_stats(&mut character);
        character
    }

    /// Decode, resolve and assemble in one step
    pub fn construct<B: CharacterBuilder>(
        &self,
        builder: &B,
        index: u64,
        enchants: &[String],
        buffs: &[String],
    ) -> Result<B::Character, CodecError> {
        let picks = self.decode(index)?;
        let loadout = self.resolve(&picks)?;
        Ok(self.assemble(builder, &loadout, enchants, buffs))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::OptimizerSettings;
    use crate::pool::CandidatePool;
    use gear_core::{Attributes, SpecialStats, WeaponHand, WeaponType};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every builder call so tests can check ordering
    #[derive(Debug, Default)]
    pub(crate) struct RecordingCharacter {
        pub log: Vec<String>,
        pub stats: SpecialStats,
    }

    impl CharacterModel for RecordingCharacter {
        fn equip_armor(&mut self, armor: &Armor) {
            self.stats += armor.stats;
            self.log.push(format!("equip {}", armor.name));
        }

        fn equip_weapons(&mut self, main_hand: &Weapon, off_hand: Option<&Weapon>) {
            self.stats += main_hand.stats;
            let off = match off_hand {
                Some(weapon) => {
                    self.stats += weapon.stats;
                    weapon.name.as_str()
                }
                None => "-",
            };
            self.log.push(format!("weapons {} {}", main_hand.name, off));
        }

        fn total_special_stats(&self) -> SpecialStats {
            self.stats
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingBuilder {
        pub created: AtomicUsize,
    }

    impl CharacterBuilder for RecordingBuilder {
        type Character = RecordingCharacter;

        fn new_character(&self) -> RecordingCharacter {
            self.created.fetch_add(1, Ordering::SeqCst);
            RecordingCharacter::default()
        }

        fn add_enchants(&self, character: &mut RecordingCharacter, enchants: &[String]) {
            character.log.push(format!("enchants {}", enchants.join(",")));
        }

        fn add_buffs(&self, character: &mut RecordingCharacter, buffs: &[String]) {
            character.log.push(format!("buffs {}", buffs.join(",")));
        }

        fn compute_total_stats(&self, character: &mut RecordingCharacter) {
            character.log.push("totals".to_string());
        }
    }

    pub(crate) fn armor(name: &str, slot: Slot, ap: f64) -> Armor {
        Armor {
            name: name.to_string(),
            stats: SpecialStats::with_attack_power(ap),
            ..Armor::empty(slot)
        }
    }

    pub(crate) fn weapon(name: &str, hand: WeaponHand) -> Weapon {
        Weapon {
            name: name.to_string(),
            weapon_type: WeaponType::Mace,
            hand,
            min_damage: 70.0,
            max_damage: 130.0,
            swing_speed: 2.6,
            stats: SpecialStats::default(),
            attributes: Attributes::default(),
            set_name: None,
            hit_effects: Vec::new(),
        }
    }

    /// Three non-dominating rings, two one-handers and a two-hander
    pub(crate) fn sample_space() -> CombinationSpace {
        let mut pool = CandidatePool::new();
        pool.add_armor(armor("helm", Slot::Head, 30.0));
        pool.add_armor(Armor {
            stats: SpecialStats {
                hit: 1.0,
                ..Default::default()
            },
            ..armor("ring_hit", Slot::Ring, 0.0)
        });
        pool.add_armor(Armor {
            stats: SpecialStats {
                critical_strike: 1.0,
                ..Default::default()
            },
            ..armor("ring_crit", Slot::Ring, 0.0)
        });
        pool.add_armor(armor("ring_ap", Slot::Ring, 25.0));
        pool.add_weapon(weapon("mace_a", WeaponHand::OneHand));
        pool.add_weapon(weapon("mace_b", WeaponHand::OneHand));
        pool.add_weapon(weapon("great_mace", WeaponHand::TwoHand));
        pool.fill_empty();
        let report = pool.filter(&OptimizerSettings::default(), &[]);
        CombinationSpace::build(report.pool).unwrap()
    }

    #[test]
    fn test_dimension_order() {
        let dimensions = Dimension::all();
        assert_eq!(dimensions.len(), 14);
        assert_eq!(dimensions[0], Dimension::Single(Slot::Head));
        assert_eq!(dimensions[10], Dimension::Single(Slot::Ranged));
        assert_eq!(dimensions[11], Dimension::RingPair);
        assert_eq!(dimensions[13], Dimension::WeaponSet);
    }

    #[test]
    fn test_build_counts_combinations() {
        let space = sample_space();
        let cardinalities = space.cardinalities();
        assert_eq!(cardinalities[0], 1);
        // three rings give three pairs, two placeholder trinkets one
        assert_eq!(cardinalities[11], 3);
        assert_eq!(cardinalities[12], 1);
        // two dual-wield orderings plus the two-hander
        assert_eq!(cardinalities[13], 3);
        assert_eq!(space.total(), 9);
        assert_eq!(
            space.total(),
            cardinalities.iter().map(|&c| c as u64).product::<u64>()
        );
    }

    #[test]
    fn test_resolve_every_index() {
        let space = sample_space();
        let mut seen = std::collections::HashSet::new();
        for index in 0..space.total() {
            let picks = space.decode(index).unwrap();
            let loadout = space.resolve(&picks).unwrap();
            assert_eq!(loadout.armor.len(), 15);
            assert!(seen.insert(loadout.item_names()));
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_two_hander_has_no_off_hand() {
        let space = sample_space();
        let position = space
            .weapon_sets()
            .iter()
            .position(|set| matches!(set, WeaponSet::TwoHand(_)))
            .unwrap();
        let mut picks = vec![0; 14];
        picks[13] = position;
        let loadout = space.resolve(&picks).unwrap();
        assert_eq!(loadout.main_hand.name, "great_mace");
        assert!(loadout.off_hand.is_none());
    }

    #[test]
    fn test_resolve_rejects_bad_picks() {
        let space = sample_space();
        assert!(matches!(
            space.resolve(&[0; 3]),
            Err(CodecError::ArityMismatch { .. })
        ));
        let mut picks = vec![0; 14];
        picks[11] = 3;
        assert!(matches!(
            space.resolve(&picks),
            Err(CodecError::PickOutOfRange { dimension: 11, .. })
        ));
    }

    #[test]
    fn test_assemble_call_order() {
        let space = sample_space();
        let builder = RecordingBuilder::default();
        let character = space
            .construct(
                &builder,
                0,
                &["crusader".to_string()],
                &["battle_shout".to_string()],
            )
            .unwrap();
        let log = &character.log;
        assert_eq!(log.len(), 15 + 1 + 3);
        assert!(log[..15].iter().all(|entry| entry.starts_with("equip ")));
        assert!(log[15].starts_with("weapons "));
        assert_eq!(log[16], "enchants crusader");
        assert_eq!(log[17], "buffs battle_shout");
        assert_eq!(log[18], "totals");
        assert_eq!(builder.created.load(Ordering::SeqCst), 1);
    }
}
