//! Dominance filtering of per-slot candidate lists
//!
//! A candidate is removed once enough other candidates in the same list
//! dominate it, either strictly (componentwise) or by estimate (its high
//! estimate is below the other's low estimate). Candidates carrying effects
//! that cannot be scored are never removed.

mod events;
mod projection;

pub use events::{Evidence, FilterEvent, FilterEventKind, FilterScope};
pub use projection::{resolve_set_bonus, ArmorProjection, WeaponProjection};

use crate::config::EstimatorWeights;
use crate::estimate::{estimate_high, estimate_low, estimate_weapon_high, estimate_weapon_low};
use gear_core::{Armor, HandSide, SetBonus, Slot, SpecialStats, StatContext, Weapon};
use std::collections::HashMap;

/// Everything a filtering pass reads besides the candidate list
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub weights: &'a EstimatorWeights,
    pub stat_context: &'a StatContext,
    pub sim_time: f64,
    pub set_bonuses: &'a [SetBonus],
    /// Distinct supplied candidates per set name
    pub set_piece_counts: &'a HashMap<String, u32>,
    /// Name of the shared-cooldown use effect assumed active
    pub shared_effect: Option<&'a str>,
}

/// Surviving candidates in input order, plus the decisions that led there
#[derive(Debug, Clone)]
pub struct FilterOutcome<T> {
    pub kept: Vec<T>,
    pub events: Vec<FilterEvent>,
}

/// Dominators needed before an armor candidate is removed.
///
/// Dual slots wait for a second witness; single slots act on the first.
pub fn armor_witnesses_required(slot: Slot) -> usize {
    if slot.is_dual() {
        2
    } else {
        1
    }
}

/// Dominators needed before a weapon candidate is removed
pub const WEAPON_WITNESSES_REQUIRED: usize = 2;

/// Strict dominance: `rival` is nowhere worse and somewhere better
fn strictly_weaker(candidate: &SpecialStats, rival: &SpecialStats) -> bool {
    rival.all_at_least(candidate) && rival.any_greater(candidate)
}

/// Record one dominator against a candidate; returns true once removal is final
fn record_witness(
    scope: FilterScope,
    candidate: &str,
    dominator: &str,
    evidence: Evidence,
    witnesses: &mut usize,
    required: usize,
    events: &mut Vec<FilterEvent>,
) -> bool {
    *witnesses += 1;
    let dominator = dominator.to_string();
    if *witnesses >= required {
        events.push(FilterEvent::new(
            scope,
            candidate,
            FilterEventKind::Removed {
                dominator,
                evidence,
            },
        ));
        true
    } else {
        events.push(FilterEvent::new(
            scope,
            candidate,
            FilterEventKind::Witness {
                dominator,
                evidence,
            },
        ));
        false
    }
}

/// Put back the best removed candidates (by `score`) until `floor` remain
fn reinstate_to_floor(
    scope: FilterScope,
    names: &[&str],
    scores: &[f64],
    removed: &mut [bool],
    floor: usize,
    events: &mut Vec<FilterEvent>,
) {
    loop {
        let kept = removed.iter().filter(|r| !**r).count();
        if kept >= floor {
            return;
        }
        let best = (0..removed.len())
            .filter(|&i| removed[i])
            .fold(None, |best: Option<usize>, i| match best {
                Some(b) if scores[b] >= scores[i] => Some(b),
                _ => Some(i),
            });
        let Some(index) = best else {
            return;
        };
        removed[index] = false;
        events.push(FilterEvent::new(
            scope,
            names[index],
            FilterEventKind::Reinstated {
                high_estimate: scores[index],
            },
        ));
    }
}

fn collect_kept<T: Clone>(
    scope: FilterScope,
    candidates: &[T],
    names: &[&str],
    removed: &[bool],
    events: &mut Vec<FilterEvent>,
) -> Vec<T> {
    candidates
        .iter()
        .zip(removed)
        .enumerate()
        .filter(|(_, (_, removed))| !**removed)
        .map(|(i, (candidate, _))| {
            events.push(FilterEvent::new(scope, names[i], FilterEventKind::Survivor));
            candidate.clone()
        })
        .collect()
}

/// Filter one armor slot's candidate list
pub fn filter_armor(slot: Slot, candidates: &[Armor], ctx: &FilterContext) -> FilterOutcome<Armor> {
    let scope = FilterScope::Armor(slot);
    let required = armor_witnesses_required(slot);
    let projections: Vec<ArmorProjection> = candidates
        .iter()
        .map(|armor| ArmorProjection::new(armor, ctx))
        .collect();
    let names: Vec<&str> = candidates.iter().map(|a| a.name.as_str()).collect();

    let mut events = Vec::new();
    let mut removed = vec![false; candidates.len()];

    for (i, candidate) in projections.iter().enumerate() {
        if !candidate.estimable {
            continue;
        }
        let full = candidate.full();
        let mut witnesses = 0;
        for (j, rival) in projections.iter().enumerate() {
            if i == j {
                continue;
            }
            let evidence = if strictly_weaker(&full, &rival.strict_rival()) {
                Evidence::Strict
            } else {
                let high = estimate_high(&full, 0.0, ctx.weights);
                let low = estimate_low(&rival.heuristic_rival(), ctx.weights);
                if high < low {
                    Evidence::Estimated { high, low }
                } else {
                    continue;
                }
            };
            if record_witness(
                scope,
                names[i],
                names[j],
                evidence,
                &mut witnesses,
                required,
                &mut events,
            ) {
                removed[i] = true;
                break;
            }
        }
    }

    let floor = slot.min_candidates().min(candidates.len());
    let scores: Vec<f64> = projections
        .iter()
        .map(|p| estimate_high(&p.full(), 0.0, ctx.weights))
        .collect();
    reinstate_to_floor(scope, &names, &scores, &mut removed, floor, &mut events);

    let kept = collect_kept(scope, candidates, &names, &removed, &mut events);
    FilterOutcome { kept, events }
}

/// Speed and damage-rate ordering a dominating weapon must satisfy.
///
/// Returns `(at_least, strictly_better)`.
fn weapon_handling_order(candidate: &Weapon, rival: &Weapon, side: HandSide) -> (bool, bool) {
    let (speed_ok, speed_better) = match side {
        HandSide::Main => (
            rival.swing_speed >= candidate.swing_speed,
            rival.swing_speed > candidate.swing_speed,
        ),
        HandSide::Off => (
            rival.swing_speed <= candidate.swing_speed,
            rival.swing_speed < candidate.swing_speed,
        ),
    };
    let rate_ok = rival.damage_rate() >= candidate.damage_rate();
    let rate_better = rival.damage_rate() > candidate.damage_rate();
    (speed_ok && rate_ok, speed_better || rate_better)
}

/// Filter one hand's weapon list; weapons compete only within their type
pub fn filter_weapons(
    side: HandSide,
    scope: FilterScope,
    candidates: &[Weapon],
    ctx: &FilterContext,
) -> FilterOutcome<Weapon> {
    let projections: Vec<WeaponProjection> = candidates
        .iter()
        .map(|weapon| WeaponProjection::new(weapon, side, ctx))
        .collect();
    let names: Vec<&str> = candidates.iter().map(|w| w.name.as_str()).collect();

    let mut events = Vec::new();
    let mut removed = vec![false; candidates.len()];

    for (i, candidate) in projections.iter().enumerate() {
        if !candidate.estimable {
            continue;
        }
        let full = candidate.full();
        let mut witnesses = 0;
        for (j, rival) in projections.iter().enumerate() {
            if i == j || candidate.item.weapon_type != rival.item.weapon_type {
                continue;
            }
            let rival_stats = rival.rival();
            let (handling_ok, handling_better) =
                weapon_handling_order(candidate.item, rival.item, side);
            let strict = handling_ok
                && rival_stats.all_at_least(&full)
                && (handling_better || rival_stats.any_greater(&full));

            let evidence = if strict {
                Evidence::Strict
            } else {
                // Rivals share the candidate's weapon type, so no cross-type skill applies
                let high = estimate_weapon_high(candidate.item, &full, false, side, ctx.weights);
                let low = estimate_weapon_low(rival.item, &rival_stats, side, ctx.weights);
                if high < low {
                    Evidence::Estimated { high, low }
                } else {
                    continue;
                }
            };
            if record_witness(
                scope,
                names[i],
                names[j],
                evidence,
                &mut witnesses,
                WEAPON_WITNESSES_REQUIRED,
                &mut events,
            ) {
                removed[i] = true;
                break;
            }
        }
    }

    let floor = 1.min(candidates.len());
    let scores: Vec<f64> = projections
        .iter()
        .map(|p| estimate_weapon_high(p.item, &p.full(), false, side, ctx.weights))
        .collect();
    reinstate_to_floor(scope, &names, &scores, &mut removed, floor, &mut events);

    let kept = collect_kept(scope, candidates, &names, &removed, &mut events);
    FilterOutcome { kept, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{Attributes, HitEffect, HitEffectKind, WeaponHand, WeaponType};

    struct Fixture {
        weights: EstimatorWeights,
        stat_context: StatContext,
        set_bonuses: Vec<SetBonus>,
        counts: HashMap<String, u32>,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                weights: EstimatorWeights::default(),
                stat_context: StatContext::default(),
                set_bonuses: Vec::new(),
                counts: HashMap::new(),
            }
        }

        fn ctx(&self) -> FilterContext<'_> {
            FilterContext {
                weights: &self.weights,
                stat_context: &self.stat_context,
                sim_time: 60.0,
                set_bonuses: &self.set_bonuses,
                set_piece_counts: &self.counts,
                shared_effect: None,
            }
        }
    }

    fn armor(name: &str, slot: Slot, stats: SpecialStats) -> Armor {
        Armor {
            name: name.to_string(),
            stats,
            ..Armor::empty(slot)
        }
    }

    fn ap(value: f64) -> SpecialStats {
        SpecialStats::with_attack_power(value)
    }

    fn hit(value: f64) -> SpecialStats {
        SpecialStats {
            hit: value,
            ..Default::default()
        }
    }

    fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| name(i).to_string()).collect()
    }

    fn sword(name: &str, min: f64, max: f64, speed: f64, stats: SpecialStats) -> Weapon {
        Weapon {
            name: name.to_string(),
            weapon_type: WeaponType::Sword,
            hand: WeaponHand::OneHand,
            min_damage: min,
            max_damage: max,
            swing_speed: speed,
            stats,
            attributes: Attributes::default(),
            set_name: None,
            hit_effects: Vec::new(),
        }
    }

    #[test]
    fn test_strictly_dominated_armor_removed() {
        let fixture = Fixture::new();
        let candidates = vec![
            armor("a", Slot::Head, ap(100.0)),
            armor("b", Slot::Head, ap(150.0)),
        ];
        let outcome = filter_armor(Slot::Head, &candidates, &fixture.ctx());
        assert_eq!(names(&outcome.kept, |a| a.name.as_str()), vec!["b"]);
        let removal = outcome.events.iter().find(|e| e.is_removal()).unwrap();
        assert_eq!(removal.item, "a");
        assert_eq!(
            removal.kind,
            FilterEventKind::Removed {
                dominator: "b".to_string(),
                evidence: Evidence::Strict,
            }
        );
    }

    #[test]
    fn test_non_estimable_candidate_exempt() {
        let fixture = Fixture::new();
        let mut c = armor("c", Slot::Neck, ap(90.0));
        c.hit_effects.push(HitEffect {
            name: "armor_shred".to_string(),
            kind: HitEffectKind::ReduceArmor,
            probability: 0.1,
            damage: 0.0,
            duration: 30.0,
            stats: SpecialStats::default(),
        });
        let candidates = vec![
            armor("a", Slot::Neck, ap(100.0)),
            armor("b", Slot::Neck, ap(150.0)),
            c,
        ];
        let outcome = filter_armor(Slot::Neck, &candidates, &fixture.ctx());
        assert_eq!(names(&outcome.kept, |a| a.name.as_str()), vec!["b", "c"]);
    }

    #[test]
    fn test_single_slot_removes_on_first_witness() {
        let fixture = Fixture::new();
        let candidates = vec![
            armor("weak", Slot::Hands, ap(10.0)),
            armor("strong", Slot::Hands, ap(40.0)),
            armor("other", Slot::Hands, hit(1.0)),
        ];
        let outcome = filter_armor(Slot::Hands, &candidates, &fixture.ctx());
        let removed: Vec<&str> = outcome
            .events
            .iter()
            .filter(|e| e.is_removal())
            .map(|e| e.item.as_str())
            .collect();
        // "weak" goes on the first witness; "other" (25 AP high) loses to the 40 AP item
        assert_eq!(removed, vec!["weak", "other"]);
        assert_eq!(names(&outcome.kept, |a| a.name.as_str()), vec!["strong"]);
    }

    #[test]
    fn test_dual_slot_needs_second_witness() {
        let fixture = Fixture::new();
        let candidates = vec![
            armor("a", Slot::Ring, ap(10.0)),
            armor("b", Slot::Ring, ap(20.0)),
            armor("c", Slot::Ring, ap(30.0)),
        ];
        let outcome = filter_armor(Slot::Ring, &candidates, &fixture.ctx());
        // a has two dominators, b only one
        assert_eq!(names(&outcome.kept, |a| a.name.as_str()), vec!["b", "c"]);
        let witness = outcome
            .events
            .iter()
            .find(|e| e.item == "b")
            .map(|e| e.kind.clone());
        assert_eq!(
            witness,
            Some(FilterEventKind::Witness {
                dominator: "c".to_string(),
                evidence: Evidence::Strict,
            })
        );
    }

    #[test]
    fn test_dual_slot_reinstates_best_removed() {
        // Skewed weights make the pessimistic hit value exceed the optimistic
        // one, so estimates eliminate more than strict dominance would
        let mut fixture = Fixture::new();
        fixture.weights.ap_per_hit = 5.0;
        fixture.weights.ap_per_hit_low = 20.0;
        let candidates = vec![
            armor("a", Slot::Ring, hit(1.0)),
            armor("b", Slot::Ring, hit(2.0)),
            armor("c", Slot::Ring, hit(4.0)),
        ];
        let outcome = filter_armor(Slot::Ring, &candidates, &fixture.ctx());
        assert_eq!(names(&outcome.kept, |a| a.name.as_str()), vec!["b", "c"]);
        let reinstated: Vec<&str> = outcome
            .events
            .iter()
            .filter(|e| matches!(e.kind, FilterEventKind::Reinstated { .. }))
            .map(|e| e.item.as_str())
            .collect();
        assert_eq!(reinstated, vec!["b"]);
    }

    #[test]
    fn test_floor_respects_short_lists() {
        let fixture = Fixture::new();
        let single = vec![armor("only", Slot::Trinket, ap(5.0))];
        let outcome = filter_armor(Slot::Trinket, &single, &fixture.ctx());
        assert_eq!(outcome.kept.len(), 1);

        let empty: Vec<Armor> = Vec::new();
        let outcome = filter_armor(Slot::Chest, &empty, &fixture.ctx());
        assert!(outcome.kept.is_empty());
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_equal_items_do_not_dominate_each_other() {
        let fixture = Fixture::new();
        let candidates = vec![
            armor("left", Slot::Back, ap(20.0)),
            armor("right", Slot::Back, ap(20.0)),
        ];
        let outcome = filter_armor(Slot::Back, &candidates, &fixture.ctx());
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_witness_order_is_traversal_order() {
        // The first dominator found is recorded as the witness, the second
        // one scanned performs the removal
        let fixture = Fixture::new();
        let candidates = vec![
            armor("strong", Slot::Trinket, ap(50.0)),
            armor("weak", Slot::Trinket, ap(10.0)),
            armor("medium", Slot::Trinket, ap(30.0)),
        ];
        let outcome = filter_armor(Slot::Trinket, &candidates, &fixture.ctx());
        let weak_events: Vec<&FilterEventKind> = outcome
            .events
            .iter()
            .filter(|e| e.item == "weak")
            .map(|e| &e.kind)
            .collect();
        assert_eq!(
            weak_events[0],
            &FilterEventKind::Witness {
                dominator: "strong".to_string(),
                evidence: Evidence::Strict,
            }
        );
        assert_eq!(
            weak_events[1],
            &FilterEventKind::Removed {
                dominator: "medium".to_string(),
                evidence: Evidence::Strict,
            }
        );
        assert_eq!(
            names(&outcome.kept, |a| a.name.as_str()),
            vec!["strong", "medium"]
        );
    }

    #[test]
    fn test_weapons_need_two_dominators_of_same_type() {
        let fixture = Fixture::new();
        let mut axe = sword("axe", 80.0, 150.0, 2.7, ap(20.0));
        axe.weapon_type = WeaponType::Axe;
        let candidates = vec![
            sword("slow_weak", 40.0, 80.0, 2.6, SpecialStats::default()),
            sword("slow_strong", 80.0, 150.0, 2.7, ap(20.0)),
            axe,
        ];
        let outcome = filter_weapons(
            HandSide::Main,
            FilterScope::Weapons(HandSide::Main),
            &candidates,
            &fixture.ctx(),
        );
        // only one sword dominates slow_weak; the axe does not count
        assert_eq!(outcome.kept.len(), 3);

        let candidates = vec![
            sword("slow_weak", 40.0, 80.0, 2.6, SpecialStats::default()),
            sword("slow_strong", 80.0, 150.0, 2.7, ap(20.0)),
            sword("slower_strong", 90.0, 170.0, 2.8, ap(10.0)),
        ];
        let outcome = filter_weapons(
            HandSide::Main,
            FilterScope::Weapons(HandSide::Main),
            &candidates,
            &fixture.ctx(),
        );
        assert_eq!(
            names(&outcome.kept, |w| w.name.as_str()),
            vec!["slow_strong", "slower_strong"]
        );
    }

    #[test]
    fn test_off_hand_prefers_fast_weapons() {
        let fixture = Fixture::new();
        let candidates = vec![
            sword("slow", 60.0, 100.0, 2.9, SpecialStats::default()),
            sword("fast_a", 50.0, 80.0, 1.8, ap(5.0)),
            sword("fast_b", 52.0, 82.0, 1.7, ap(5.0)),
        ];
        let ctx = fixture.ctx();
        let outcome = filter_weapons(
            HandSide::Off,
            FilterScope::Weapons(HandSide::Off),
            &candidates,
            &ctx,
        );
        assert_eq!(
            names(&outcome.kept, |w| w.name.as_str()),
            vec!["fast_a", "fast_b"]
        );

        let slow_removal = outcome
            .events
            .iter()
            .find(|e| e.is_removal())
            .unwrap();
        assert_eq!(slow_removal.item, "slow");
        assert_eq!(slow_removal.scope, FilterScope::Weapons(HandSide::Off));
    }

    #[test]
    fn test_weapon_with_unscorable_proc_is_kept() {
        let fixture = Fixture::new();
        let mut proc_sword = sword("proc", 30.0, 60.0, 2.6, SpecialStats::default());
        proc_sword.hit_effects.push(HitEffect {
            name: "haste".to_string(),
            kind: HitEffectKind::StatBoost,
            probability: 0.05,
            damage: 0.0,
            duration: 10.0,
            stats: SpecialStats::default(),
        });
        let candidates = vec![
            proc_sword,
            sword("good_a", 80.0, 150.0, 2.7, ap(20.0)),
            sword("good_b", 90.0, 170.0, 2.8, ap(20.0)),
        ];
        let outcome = filter_weapons(
            HandSide::Main,
            FilterScope::Weapons(HandSide::Main),
            &candidates,
            &fixture.ctx(),
        );
        assert_eq!(outcome.kept.len(), 3);
    }

    #[test]
    fn test_cross_type_bonus_does_not_change_weapon_filtering() {
        let candidates = vec![
            sword("slow_weak", 40.0, 80.0, 2.6, SpecialStats::default()),
            sword("slow_strong", 80.0, 150.0, 2.7, ap(20.0)),
            sword("slower_strong", 90.0, 170.0, 2.8, ap(10.0)),
        ];
        let baseline = Fixture::new();
        let mut boosted = Fixture::new();
        boosted.weights.cross_type_skill_bonus = 1000.0;

        let scope = FilterScope::Weapons(HandSide::Main);
        let plain = filter_weapons(HandSide::Main, scope, &candidates, &baseline.ctx());
        let bonus = filter_weapons(HandSide::Main, scope, &candidates, &boosted.ctx());
        assert_eq!(
            names(&plain.kept, |w| w.name.as_str()),
            names(&bonus.kept, |w| w.name.as_str())
        );
        assert_eq!(plain.events, bonus.events);
    }
}
