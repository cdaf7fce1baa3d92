//! Selection of the shared-cooldown use effect assumed active

use crate::filter::{FilterEvent, FilterEventKind, FilterScope};
use gear_core::{Armor, EffectSharing, StatContext, UseEffect};

/// The shared-cooldown effect that projections count
#[derive(Debug, Clone, PartialEq)]
pub struct SharedEffectChoice {
    pub name: String,
    /// Attack power times active seconds
    pub score: f64,
}

/// Score of a shared effect: its attack power times its active seconds
pub fn shared_effect_score(effect: &UseEffect, context: &StatContext, sim_time: f64) -> f64 {
    effect.special_stat_equivalent(context).attack_power * effect.duration.min(sim_time)
}

/// Pick the highest-scoring shared use effect among all candidates.
///
/// Only strictly positive scores qualify; the first of equal scores wins.
pub fn select_shared_effect<'a, I>(
    candidates: I,
    context: &StatContext,
    sim_time: f64,
) -> (Option<SharedEffectChoice>, Vec<FilterEvent>)
where
    I: IntoIterator<Item = &'a Armor>,
{
    let mut events = Vec::new();
    let mut best: Option<SharedEffectChoice> = None;

    for armor in candidates {
        for effect in &armor.use_effects {
            if effect.sharing != EffectSharing::Shared {
                continue;
            }
            let score = shared_effect_score(effect, context, sim_time);
            events.push(FilterEvent::new(
                FilterScope::SharedEffects,
                effect.name.as_str(),
                FilterEventKind::SharedEffectEstimate { ap: score },
            ));
            let best_score = best.as_ref().map_or(0.0, |choice| choice.score);
            if score > best_score {
                best = Some(SharedEffectChoice {
                    name: effect.name.clone(),
                    score,
                });
            }
        }
    }

    if let Some(ref choice) = best {
        events.push(FilterEvent::new(
            FilterScope::SharedEffects,
            choice.name.as_str(),
            FilterEventKind::SharedEffectSelected { ap: choice.score },
        ));
    }
    (best, events)
}
