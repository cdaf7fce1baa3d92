//! optimizer_core - Pre-simulation gear reducer and combination enumerator
//!
//! This library provides:
//! - Attack-power equivalence estimates (optimistic and pessimistic)
//! - Dominance filtering of per-slot candidate lists with an audit trail
//! - Ring, trinket and weapon-set combination generation
//! - A mixed-radix codec mapping every loadout to one integer index
//! - Character assembly through caller-supplied builder traits
//! - A parallel top-K search driver over an external simulator
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use optimizer_core::prelude::*;
//!
//! let settings = OptimizerSettings::load_from_path(Path::new("optimizer.toml"))?;
//! let prepared = prepare(&catalog, &armor_names, &weapon_names, &settings)?;
//! for event in &prepared.events {
//!     println!("{}", event);
//! }
//! let best = evaluate_parallel(&prepared.space, &builder, &simulator, &settings)?;
//! println!("best loadout: #{} at {:.1} DPS", best[0].index, best[0].mean_dps);
//! ```

pub mod codec;
pub mod combination;
pub mod config;
pub mod estimate;
pub mod filter;
pub mod lookup;
pub mod pipeline;
pub mod pool;
pub mod prelude;
pub mod search;
pub mod shared_effect;
pub mod space;

// Core API - what most users need
pub use pipeline::{prepare, PreparedSpace};
pub use space::{CombinationSpace, Dimension, Loadout};
pub use search::{evaluate_parallel, evaluate_sequential, DpsSample, SimResult, Simulator, TopK};

// Collaborator contracts
pub use lookup::{CharacterBuilder, CharacterModel, ItemLookup};

// Configuration
pub use config::{ConfigError, EstimatorWeights, OptimizerSettings};

// Building blocks
pub use codec::{CodecError, MixedRadix};
pub use combination::WeaponSet;
pub use filter::{Evidence, FilterEvent, FilterEventKind, FilterScope};
pub use pool::{CandidatePool, FilterReport, FilteredPool};
pub use shared_effect::SharedEffectChoice;

// Re-export commonly needed gear_core types
pub use gear_core::{Armor, Slot, SpecialStats, StatContext, Weapon};
