//! Structured audit trail of filtering decisions

use gear_core::{HandSide, Slot};
use serde::Serialize;
use std::fmt;

/// The candidate list a decision was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterScope {
    SharedEffects,
    Armor(Slot),
    Weapons(HandSide),
    TwoHandWeapons,
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterScope::SharedEffects => write!(f, "shared use effects"),
            FilterScope::Armor(slot) => write!(f, "{}", slot),
            FilterScope::Weapons(side) => write!(f, "{} weapons", side),
            FilterScope::TwoHandWeapons => write!(f, "two-hand weapons"),
        }
    }
}

/// Why a dominator counted against a candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// Componentwise at least as good, strictly better somewhere
    Strict,
    /// Candidate's high estimate below the dominator's low estimate
    Estimated { high: f64, low: f64 },
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evidence::Strict => write!(f, "strictly better"),
            Evidence::Estimated { high, low } => write!(
                f,
                "estimated better (high {:.1} AP < low {:.1} AP)",
                high, low
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterEventKind {
    /// A shared-cooldown use effect was scored
    SharedEffectEstimate { ap: f64 },
    /// The shared-cooldown use effect assumed active
    SharedEffectSelected { ap: f64 },
    /// A dominator that did not yet reach the removal threshold
    Witness { dominator: String, evidence: Evidence },
    Removed { dominator: String, evidence: Evidence },
    /// Put back to keep a dual slot at two candidates
    Reinstated { high_estimate: f64 },
    Survivor,
}

/// One filtering decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEvent {
    pub scope: FilterScope,
    pub item: String,
    pub kind: FilterEventKind,
}

impl FilterEvent {
    pub fn new(scope: FilterScope, item: impl Into<String>, kind: FilterEventKind) -> Self {
        let event = FilterEvent {
            scope,
            item: item.into(),
            kind,
        };
        log::debug!("{}", event);
        event
    }

    pub fn is_removal(&self) -> bool {
        matches!(self.kind, FilterEventKind::Removed { .. })
    }
}

impl fmt::Display for FilterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.scope)?;
        match &self.kind {
            FilterEventKind::SharedEffectEstimate { ap } => {
                write!(f, "{} estimated as {:.1} AP", self.item, ap)
            }
            FilterEventKind::SharedEffectSelected { ap } => {
                write!(f, "best shared use effect: {} ({:.1} AP)", self.item, ap)
            }
            FilterEventKind::Witness {
                dominator,
                evidence,
            } => write!(f, "1/2: {} since {} is {}", self.item, dominator, evidence),
            FilterEventKind::Removed {
                dominator,
                evidence,
            } => write!(f, "REMOVED: {} since {} is {}", self.item, dominator, evidence),
            FilterEventKind::Reinstated { high_estimate } => write!(
                f,
                "reinstated {} (high estimate {:.1} AP) to keep two candidates",
                self.item, high_estimate
            ),
            FilterEventKind::Survivor => write!(f, "kept {}", self.item),
        }
    }
}
