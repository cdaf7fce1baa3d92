//! Prelude module for convenient imports
//!
//! ```rust
//! use optimizer_core::prelude::*;
//! ```

// Pipeline
pub use crate::pipeline::{prepare, PreparedSpace};
pub use crate::space::{CombinationSpace, Loadout};

// Search
pub use crate::search::{evaluate_parallel, evaluate_sequential, DpsSample, SimResult, Simulator};

// Collaborators
pub use crate::lookup::{CharacterBuilder, CharacterModel, ItemLookup};

// Config
pub use crate::config::{EstimatorWeights, OptimizerSettings};

// Audit trail
pub use crate::filter::{FilterEvent, FilterEventKind};

// Re-exports from gear_core
pub use gear_core::{
    Armor, HandSide, Slot, SpecialStats, StatContext, Weapon, WeaponHand, WeaponType,
};
