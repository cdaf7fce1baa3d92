//! Candidate extraction, placeholder filling and per-slot filtering

use crate::combination::weapon_sets;
use crate::config::OptimizerSettings;
use crate::filter::{filter_armor, filter_weapons, FilterContext, FilterEvent, FilterScope};
use crate::lookup::ItemLookup;
use crate::shared_effect::{select_shared_effect, SharedEffectChoice};
use gear_core::{Armor, HandSide, SetBonus, Slot, Weapon, WeaponHand};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Per-slot candidate lists before filtering
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    armor: BTreeMap<Slot, Vec<Armor>>,
    main_hands: Vec<Weapon>,
    off_hands: Vec<Weapon>,
    two_hands: Vec<Weapon>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve names against the item database and sort them into slots.
    ///
    /// Armor names are probed slot by slot in `Slot::all()` order and land in
    /// the first slot that knows them. Unknown names are skipped.
    pub fn extract<L, S>(lookup: &L, armor_names: &[S], weapon_names: &[S]) -> Self
    where
        L: ItemLookup + ?Sized,
        S: AsRef<str>,
    {
        let mut pool = CandidatePool::new();
        for name in armor_names {
            let name = name.as_ref();
            let found = Slot::all()
                .iter()
                .find_map(|&slot| lookup.find_armor(slot, name).map(|armor| (slot, armor)));
            match found {
                Some((slot, armor)) => pool.push_armor(slot, armor),
                None => log::debug!("no armor named '{}', skipping", name),
            }
        }
        for name in weapon_names {
            let name = name.as_ref();
            match lookup.find_weapon(name) {
                Some(weapon) => pool.add_weapon(weapon),
                None => log::debug!("no weapon named '{}', skipping", name),
            }
        }
        pool
    }

    fn push_armor(&mut self, slot: Slot, armor: Armor) {
        self.armor.entry(slot).or_default().push(armor);
    }

    /// Add an armor candidate to the list of its own slot
    pub fn add_armor(&mut self, armor: Armor) {
        self.push_armor(armor.slot, armor);
    }

    /// Add a weapon to every hand list it fits
    pub fn add_weapon(&mut self, weapon: Weapon) {
        match weapon.hand {
            WeaponHand::OneHand => {
                self.main_hands.push(weapon.clone());
                self.off_hands.push(weapon);
            }
            WeaponHand::MainHand => self.main_hands.push(weapon),
            WeaponHand::OffHand => self.off_hands.push(weapon),
            WeaponHand::TwoHand => self.two_hands.push(weapon),
        }
    }

    /// Insert placeholders so no list is shorter than its slot holds.
    ///
    /// The main hand only gets a placeholder when no two-hander can fill it.
    pub fn fill_empty(&mut self) {
        for &slot in Slot::all() {
            let list = self.armor.entry(slot).or_default();
            while list.len() < slot.min_candidates() {
                list.push(Armor::empty(slot));
            }
        }
        if self.main_hands.is_empty() && self.two_hands.is_empty() {
            self.main_hands.push(Weapon::empty(HandSide::Main));
        }
        if self.off_hands.is_empty() {
            self.off_hands.push(Weapon::empty(HandSide::Off));
        }
    }

    pub fn slot(&self, slot: Slot) -> &[Armor] {
        self.armor.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn main_hands(&self) -> &[Weapon] {
        &self.main_hands
    }

    pub fn off_hands(&self) -> &[Weapon] {
        &self.off_hands
    }

    pub fn two_hands(&self) -> &[Weapon] {
        &self.two_hands
    }

    pub fn len(&self) -> usize {
        self.armor.values().map(Vec::len).sum::<usize>()
            + self.main_hands.len()
            + self.off_hands.len()
            + self.two_hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct candidate names per set, across every list
    pub fn set_piece_counts(&self) -> HashMap<String, u32> {
        let armor = self
            .armor
            .values()
            .flatten()
            .filter_map(|a| a.set_name.as_deref().map(|set| (set, a.name.as_str())));
        let weapons = self
            .main_hands
            .iter()
            .chain(&self.off_hands)
            .chain(&self.two_hands)
            .filter_map(|w| w.set_name.as_deref().map(|set| (set, w.name.as_str())));

        let distinct: HashSet<(&str, &str)> = armor.chain(weapons).collect();
        let mut counts = HashMap::new();
        for (set, _) in distinct {
            *counts.entry(set.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Select the shared use effect, then filter every list.
    ///
    /// Slots are filtered in parallel; each produces its own events and the
    /// report concatenates them in slot order, weapons last.
    pub fn filter(&self, settings: &OptimizerSettings, set_bonuses: &[SetBonus]) -> FilterReport {
        let (shared_effect, mut events) = select_shared_effect(
            self.armor.values().flatten(),
            &settings.context,
            settings.sim_time,
        );

        let set_piece_counts = self.set_piece_counts();
        let ctx = FilterContext {
            weights: &settings.weights,
            stat_context: &settings.context,
            sim_time: settings.sim_time,
            set_bonuses,
            set_piece_counts: &set_piece_counts,
            shared_effect: shared_effect.as_ref().map(|choice| choice.name.as_str()),
        };

        let weapon_jobs = [
            (HandSide::Main, FilterScope::Weapons(HandSide::Main), &self.main_hands),
            (HandSide::Off, FilterScope::Weapons(HandSide::Off), &self.off_hands),
            (HandSide::Main, FilterScope::TwoHandWeapons, &self.two_hands),
        ];
        let (armor_outcomes, weapon_outcomes) = rayon::join(
            || {
                Slot::all()
                    .par_iter()
                    .map(|&slot| (slot, filter_armor(slot, self.slot(slot), &ctx)))
                    .collect::<Vec<_>>()
            },
            || {
                weapon_jobs
                    .par_iter()
                    .map(|(side, scope, list)| filter_weapons(*side, *scope, list, &ctx))
                    .collect::<Vec<_>>()
            },
        );

        let mut armor = BTreeMap::new();
        for (slot, outcome) in armor_outcomes {
            events.extend(outcome.events);
            armor.insert(slot, outcome.kept);
        }
        let mut weapon_lists = Vec::with_capacity(3);
        for outcome in weapon_outcomes {
            events.extend(outcome.events);
            weapon_lists.push(outcome.kept);
        }
        let two_hands = weapon_lists.pop().unwrap_or_default();
        let mut off_hands = weapon_lists.pop().unwrap_or_default();
        let main_hands = weapon_lists.pop().unwrap_or_default();

        // A lone one-hander in both lists cannot pair with itself
        if two_hands.is_empty() && weapon_sets(&main_hands, &off_hands, &[]).is_empty() {
            off_hands.push(Weapon::empty(HandSide::Off));
        }

        let pool = FilteredPool {
            armor,
            main_hands,
            off_hands,
            two_hands,
        };
        let removed = events.iter().filter(|e| e.is_removal()).count();
        log::info!(
            "filtered {} candidates down to {} ({} removed)",
            self.len(),
            pool.len(),
            removed
        );

        FilterReport {
            pool,
            shared_effect,
            events,
        }
    }
}

/// Candidate lists after filtering; read-only from here on
#[derive(Debug, Clone)]
pub struct FilteredPool {
    armor: BTreeMap<Slot, Vec<Armor>>,
    main_hands: Vec<Weapon>,
    off_hands: Vec<Weapon>,
    two_hands: Vec<Weapon>,
}

impl FilteredPool {
    pub fn slot(&self, slot: Slot) -> &[Armor] {
        self.armor.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn main_hands(&self) -> &[Weapon] {
        &self.main_hands
    }

    pub fn off_hands(&self) -> &[Weapon] {
        &self.off_hands
    }

    pub fn two_hands(&self) -> &[Weapon] {
        &self.two_hands
    }

    pub fn len(&self) -> usize {
        self.armor.values().map(Vec::len).sum::<usize>()
            + self.main_hands.len()
            + self.off_hands.len()
            + self.two_hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of filtering a candidate pool
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub pool: FilteredPool,
    pub shared_effect: Option<SharedEffectChoice>,
    /// Every decision, shared effects first, then slots in order
    pub events: Vec<FilterEvent>,
}
