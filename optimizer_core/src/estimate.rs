//! Attack-power equivalence estimates
//!
//! Every stat bundle is collapsed into one scalar in attack-power units. The
//! high estimate is an optimistic upper bound (full hit/crit value, skill
//! soft cap respected, optional assumed cross-type skill), the low estimate a
//! pessimistic lower bound (capped weights, flat skill rate).

use crate::config::EstimatorWeights;
use gear_core::{
    EffectSharing, HandSide, HitEffect, HitEffectKind, SpecialStats, StatContext, UseEffect,
    Weapon,
};

/// AP value of a weapon-skill bonus under the optimistic weights
pub fn skill_ap_high(skill: f64, weights: &EstimatorWeights) -> f64 {
    if skill <= weights.skill_soft_cap {
        skill * weights.ap_per_skill
    } else {
        weights.skill_soft_cap * weights.ap_per_skill
            + (skill - weights.skill_soft_cap) * weights.ap_per_skill_soft
    }
}

/// Optimistic AP equivalent of a stat bundle.
///
/// `extra_skill` is added on top of the best skill bonus in the bundle.
pub fn estimate_high(stats: &SpecialStats, extra_skill: f64, weights: &EstimatorWeights) -> f64 {
    stats.attack_power
        + stats.hit * weights.ap_per_hit
        + stats.critical_strike * weights.ap_per_crit
        + skill_ap_high(stats.max_skill() + extra_skill, weights)
}

/// Pessimistic AP equivalent of a stat bundle
pub fn estimate_low(stats: &SpecialStats, weights: &EstimatorWeights) -> f64 {
    stats.attack_power
        + stats.hit * weights.ap_per_hit_low
        + stats.critical_strike * weights.ap_per_crit_low
        + stats.max_skill() * weights.ap_per_skill_low
}

/// AP equivalent of a weapon's raw damage rate
pub fn weapon_damage_ap(weapon: &Weapon, weights: &EstimatorWeights) -> f64 {
    weapon.damage_rate() * weights.ap_per_dps
}

/// Swing-speed bonus: slow main hands and fast off hands score higher
pub fn swing_speed_adjustment(swing_speed: f64, side: HandSide, weights: &EstimatorWeights) -> f64 {
    let deviation = weights.ap_per_speed_second * (swing_speed - weights.reference_speed);
    match side {
        HandSide::Main => deviation,
        HandSide::Off => -deviation,
    }
}

/// Optimistic weapon estimate from its fully projected stats
pub fn estimate_weapon_high(
    weapon: &Weapon,
    stats: &SpecialStats,
    cross_type: bool,
    side: HandSide,
    weights: &EstimatorWeights,
) -> f64 {
    let extra_skill = if cross_type {
        weights.cross_type_skill_bonus
    } else {
        0.0
    };
    estimate_high(stats, extra_skill, weights)
        + weapon_damage_ap(weapon, weights)
        + swing_speed_adjustment(weapon.swing_speed, side, weights)
}

/// Pessimistic weapon estimate from its base stats
pub fn estimate_weapon_low(
    weapon: &Weapon,
    stats: &SpecialStats,
    side: HandSide,
    weights: &EstimatorWeights,
) -> f64 {
    estimate_low(stats, weights)
        + weapon_damage_ap(weapon, weights)
        + swing_speed_adjustment(weapon.swing_speed, side, weights)
}

/// Expected AP contribution of on-hit procs, or `None` if any proc kind
/// cannot be expressed as a stat bundle.
///
/// `extra_swing_factor` is 1.0 for a main hand and 0.5 elsewhere, since an
/// extra swing only resets the main-hand timer.
pub fn project_hit_effects(
    effects: &[HitEffect],
    extra_swing_factor: f64,
    weights: &EstimatorWeights,
) -> Option<SpecialStats> {
    let mut projected = SpecialStats::default();
    for effect in effects {
        if effect.kind.is_damage() {
            projected.attack_power +=
                effect.probability * effect.damage * weights.ap_per_proc_damage;
        } else if effect.kind == HitEffectKind::ExtraHit {
            projected.attack_power +=
                effect.probability * extra_swing_factor * weights.ap_per_extra_swing;
        } else {
            return None;
        }
    }
    Some(projected)
}

/// AP equivalent of a weapon in a given hand for a finished character
fn weapon_ap_equivalent(weapon: &Weapon, stats: &SpecialStats, weights: &EstimatorWeights) -> f64 {
    weapon_damage_ap(weapon, weights)
        + skill_ap_high(stats.skill_of_type(weapon.weapon_type).max(0.0), weights)
}

/// AP value of one weapon's procs in the whole-character estimate
fn hit_effects_total_ap(weapon: &Weapon, factor: f64, weights: &EstimatorWeights) -> f64 {
    weapon
        .hit_effects
        .iter()
        .map(|effect| {
            let value = match effect.kind {
                HitEffectKind::DamageMagicGuaranteed
                | HitEffectKind::DamageMagic
                | HitEffectKind::DamagePhysical => {
                    effect.probability * effect.damage * weights.ap_per_proc_damage
                }
                HitEffectKind::ExtraHit => effect.probability * weights.ap_per_extra_swing,
                HitEffectKind::StatBoost => weights.ap_per_stat_boost_proc,
                HitEffectKind::ReduceArmor => 0.0,
            };
            value * factor
        })
        .sum()
}

/// Scalar AP equivalent of a fully assembled character.
///
/// Blends main and off hand by `off_hand_factor`; a two-hander (`off_hand`
/// is `None`) counts alone. Unique use effects always count, shared ones
/// only the best.
pub fn total_ap_equivalent(
    stats: &SpecialStats,
    main_hand: &Weapon,
    off_hand: Option<&Weapon>,
    use_effects: &[&UseEffect],
    context: &StatContext,
    weights: &EstimatorWeights,
    sim_time: f64,
) -> f64 {
    let character_ap = stats.attack_power
        + stats.hit * weights.ap_per_hit
        + stats.critical_strike * weights.ap_per_crit;

    let main_ap = weapon_ap_equivalent(main_hand, stats, weights);
    let weapon_ap = match off_hand {
        Some(off) => {
            let off_ap = weapon_ap_equivalent(off, stats, weights);
            (main_ap + weights.off_hand_factor * off_ap) / (1.0 + weights.off_hand_factor)
        }
        None => main_ap,
    };

    let mut unique_ap = 0.0;
    let mut best_shared_ap: f64 = 0.0;
    for effect in use_effects {
        let ap = effect.special_stat_equivalent(context).attack_power * effect.uptime(sim_time);
        match effect.sharing {
            EffectSharing::Unique => unique_ap += ap,
            EffectSharing::Shared => best_shared_ap = best_shared_ap.max(ap),
        }
    }

    let mut hit_ap = hit_effects_total_ap(main_hand, 1.0, weights);
    if let Some(off) = off_hand {
        hit_ap += hit_effects_total_ap(off, 0.5, weights);
    }

    character_ap + weapon_ap + unique_ap + best_shared_ap + hit_ap
}
