//! Candidates annotated with their resolved stat contributions
//!
//! Projections are built fresh for one filtering pass and dropped afterwards.

use super::FilterContext;
use crate::estimate::{estimate_high, project_hit_effects};
use gear_core::{Armor, EffectSharing, HandSide, SpecialStats, Weapon};

/// Best applicable set bonus for an item of `set_name`.
///
/// Only bonuses whose piece threshold is reachable with the supplied
/// candidates count, and only if their high estimate is positive.
pub fn resolve_set_bonus(set_name: Option<&str>, ctx: &FilterContext) -> SpecialStats {
    let Some(set_name) = set_name else {
        return SpecialStats::default();
    };
    let available = ctx.set_piece_counts.get(set_name).copied().unwrap_or(0);

    let mut best_ap = 0.0;
    let mut best = SpecialStats::default();
    for bonus in ctx.set_bonuses {
        if bonus.set != set_name || bonus.pieces > available {
            continue;
        }
        let stats = bonus.special_stat_equivalent(ctx.stat_context);
        let ap = estimate_high(&stats, 0.0, ctx.weights);
        if ap > best_ap {
            best_ap = ap;
            best = stats;
        }
    }
    best
}

#[derive(Debug, Clone)]
pub struct ArmorProjection<'a> {
    pub item: &'a Armor,
    pub base: SpecialStats,
    pub set_bonus: SpecialStats,
    pub use_bonus: SpecialStats,
    pub hit_bonus: SpecialStats,
    /// False if an effect on the item cannot be scored
    pub estimable: bool,
}

impl<'a> ArmorProjection<'a> {
    pub fn new(item: &'a Armor, ctx: &FilterContext) -> Self {
        let mut estimable = true;

        let mut use_bonus = SpecialStats::default();
        for effect in &item.use_effects {
            match effect.sharing {
                EffectSharing::Shared => {
                    if ctx.shared_effect == Some(effect.name.as_str()) {
                        use_bonus += effect
                            .special_stat_equivalent(ctx.stat_context)
                            .scaled(effect.uptime(ctx.sim_time));
                    }
                }
                EffectSharing::Unique => estimable = false,
            }
        }

        // An extra swing from a non-weapon item is worth half a main-hand one
        let hit_bonus = match project_hit_effects(&item.hit_effects, 0.5, ctx.weights) {
            Some(stats) => stats,
            None => {
                estimable = false;
                SpecialStats::default()
            }
        };

        ArmorProjection {
            item,
            base: item.base_special_stats(ctx.stat_context),
            set_bonus: resolve_set_bonus(item.set_name.as_deref(), ctx),
            use_bonus,
            hit_bonus,
            estimable,
        }
    }

    /// Everything the item could contribute, for the side being tested
    pub fn full(&self) -> SpecialStats {
        self.base + self.set_bonus + self.use_bonus + self.hit_bonus
    }

    /// Dominator side of the strict comparison
    pub fn strict_rival(&self) -> SpecialStats {
        self.base + self.hit_bonus
    }

    /// Dominator side of the heuristic comparison
    pub fn heuristic_rival(&self) -> SpecialStats {
        self.base + self.use_bonus + self.hit_bonus
    }
}

#[derive(Debug, Clone)]
pub struct WeaponProjection<'a> {
    pub item: &'a Weapon,
    pub base: SpecialStats,
    pub set_bonus: SpecialStats,
    pub hit_bonus: SpecialStats,
    pub estimable: bool,
}

impl<'a> WeaponProjection<'a> {
    pub fn new(item: &'a Weapon, side: HandSide, ctx: &FilterContext) -> Self {
        let extra_swing_factor = match side {
            HandSide::Main => 1.0,
            HandSide::Off => 0.5,
        };
        let (hit_bonus, estimable) =
            match project_hit_effects(&item.hit_effects, extra_swing_factor, ctx.weights) {
                Some(stats) => (stats, true),
                None => (SpecialStats::default(), false),
            };

        WeaponProjection {
            item,
            base: item.base_special_stats(ctx.stat_context),
            set_bonus: resolve_set_bonus(item.set_name.as_deref(), ctx),
            hit_bonus,
            estimable,
        }
    }

    pub fn full(&self) -> SpecialStats {
        self.base + self.set_bonus + self.hit_bonus
    }

    /// Dominator side of both comparisons
    pub fn rival(&self) -> SpecialStats {
        self.base
    }
}
