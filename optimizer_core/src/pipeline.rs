//! End-to-end preparation: names in, frozen combination space out

use crate::codec::CodecError;
use crate::config::OptimizerSettings;
use crate::filter::FilterEvent;
use crate::lookup::ItemLookup;
use crate::pool::CandidatePool;
use crate::shared_effect::SharedEffectChoice;
use crate::space::CombinationSpace;

/// A combination space ready for enumeration, with its audit trail
#[derive(Debug, Clone)]
pub struct PreparedSpace {
    pub space: CombinationSpace,
    pub shared_effect: Option<SharedEffectChoice>,
    pub events: Vec<FilterEvent>,
}

/// Extract, fill, filter and encode the candidates named by the caller
pub fn prepare<L, S>(
    lookup: &L,
    armor_names: &[S],
    weapon_names: &[S],
    settings: &OptimizerSettings,
) -> Result<PreparedSpace, CodecError>
where
    L: ItemLookup + ?Sized,
    S: AsRef<str>,
{
    let mut pool = CandidatePool::extract(lookup, armor_names, weapon_names);
    pool.fill_empty();
    let report = pool.filter(settings, lookup.set_bonuses());
    let space = CombinationSpace::build(report.pool)?;
    Ok(PreparedSpace {
        space,
        shared_effect: report.shared_effect,
        events: report.events,
    })
}
