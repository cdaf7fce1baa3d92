//! Evaluating the combination space against an external simulator

use crate::codec::CodecError;
use crate::config::OptimizerSettings;
use crate::estimate::total_ap_equivalent;
use crate::lookup::{CharacterBuilder, CharacterModel};
use crate::space::CombinationSpace;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Damage-per-second distribution reported by a simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpsSample {
    pub mean: f64,
    pub variance: f64,
}

/// Runs a combat simulation for one assembled character.
///
/// `index` identifies the loadout and can seed per-loadout randomness.
pub trait Simulator<C> {
    fn simulate(&self, character: &C, index: u64) -> DpsSample;
}

/// Outcome for one index of the combination space.
///
/// Ordered by mean DPS; on equal means the lower index ranks higher.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SimResult {
    pub index: u64,
    pub mean_dps: f64,
    pub variance: f64,
    pub ap_equivalent: f64,
}

impl Ord for SimResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mean_dps
            .total_cmp(&other.mean_dps)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for SimResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SimResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimResult {}

/// Bounded collector keeping the best `capacity` results
#[derive(Debug, Clone)]
pub struct TopK {
    capacity: usize,
    // Min-heap: the weakest kept result sits on top
    heap: BinaryHeap<Reverse<SimResult>>,
}

impl TopK {
    /// Storage grows with pushes, so a huge `capacity` costs nothing up front
    pub fn new(capacity: usize) -> Self {
        TopK {
            capacity,
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, result: SimResult) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(result));
        } else if let Some(Reverse(weakest)) = self.heap.peek() {
            if result > *weakest {
                self.heap.pop();
                self.heap.push(Reverse(result));
            }
        }
    }

    pub fn merge(mut self, other: TopK) -> TopK {
        for Reverse(result) in other.heap {
            self.push(result);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best first
    pub fn into_sorted_vec(self) -> Vec<SimResult> {
        let mut results: Vec<SimResult> = self.heap.into_iter().map(|Reverse(r)| r).collect();
        results.sort_by(|a, b| b.cmp(a));
        results
    }
}

/// Results worth keeping: never more than the space holds
fn retained_count(space: &CombinationSpace, top_k: usize) -> usize {
    usize::try_from(space.total()).map_or(top_k, |total| top_k.min(total))
}

/// Assemble, simulate and score one index
pub fn evaluate_index<B, S>(
    space: &CombinationSpace,
    builder: &B,
    simulator: &S,
    settings: &OptimizerSettings,
    index: u64,
) -> Result<SimResult, CodecError>
where
    B: CharacterBuilder,
    S: Simulator<B::Character>,
{
    let picks = space.decode(index)?;
    let loadout = space.resolve(&picks)?;
    let character = space.assemble(builder, &loadout, &settings.enchants, &settings.buffs);
    let sample = simulator.simulate(&character, index);
    let ap_equivalent = total_ap_equivalent(
        &character.total_special_stats(),
        loadout.main_hand,
        loadout.off_hand,
        &loadout.use_effects(),
        &settings.context,
        &settings.weights,
        settings.sim_time,
    );
    Ok(SimResult {
        index,
        mean_dps: sample.mean,
        variance: sample.variance,
        ap_equivalent,
    })
}

/// Evaluate every index on the rayon pool and keep the best `settings.top_k`.
///
/// Workers share only read access to the space; results are merged through
/// per-worker collectors, so the output does not depend on scheduling.
pub fn evaluate_parallel<B, S>(
    space: &CombinationSpace,
    builder: &B,
    simulator: &S,
    settings: &OptimizerSettings,
) -> Result<Vec<SimResult>, CodecError>
where
    B: CharacterBuilder + Sync,
    S: Simulator<B::Character> + Sync,
{
    let top_k = retained_count(space, settings.top_k);
    log::info!(
        "evaluating {} loadouts in parallel, keeping {}",
        space.total(),
        top_k
    );
    let collected = (0..space.total())
        .into_par_iter()
        .map(|index| evaluate_index(space, builder, simulator, settings, index))
        .try_fold(
            || TopK::new(top_k),
            |mut collector, result| {
                collector.push(result?);
                Ok::<_, CodecError>(collector)
            },
        )
        .try_reduce(|| TopK::new(top_k), |a, b| Ok(a.merge(b)))?;
    Ok(collected.into_sorted_vec())
}

/// Single-threaded variant of [`evaluate_parallel`]
pub fn evaluate_sequential<B, S>(
    space: &CombinationSpace,
    builder: &B,
    simulator: &S,
    settings: &OptimizerSettings,
) -> Result<Vec<SimResult>, CodecError>
where
    B: CharacterBuilder,
    S: Simulator<B::Character>,
{
    let mut collector = TopK::new(retained_count(space, settings.top_k));
    for index in 0..space.total() {
        collector.push(evaluate_index(space, builder, simulator, settings, index)?);
    }
    Ok(collector.into_sorted_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::tests::{sample_space, RecordingBuilder, RecordingCharacter};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Noisy stand-in simulator seeded per index
    struct NoisySimulator;

    impl Simulator<RecordingCharacter> for NoisySimulator {
        fn simulate(&self, character: &RecordingCharacter, index: u64) -> DpsSample {
            let mut rng = ChaCha8Rng::seed_from_u64(index);
            let stats = character.total_special_stats();
            let base = 500.0
                + stats.attack_power / 14.0
                + stats.hit * 10.0
                + stats.critical_strike * 12.0;
            let samples: Vec<f64> = (0..32).map(|_| base + rng.gen_range(-5.0..5.0)).collect();
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            let variance =
                samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
            DpsSample { mean, variance }
        }
    }

    fn result(index: u64, mean_dps: f64) -> SimResult {
        SimResult {
            index,
            mean_dps,
            variance: 0.0,
            ap_equivalent: 0.0,
        }
    }

    #[test]
    fn test_sim_result_ordering() {
        assert!(result(0, 10.0) < result(1, 11.0));
        // equal means: lower index ranks higher
        assert!(result(2, 10.0) > result(5, 10.0));
        let mut results = vec![result(0, 3.0), result(1, 9.0), result(2, 1.0)];
        results.sort();
        let means: Vec<f64> = results.iter().map(|r| r.mean_dps).collect();
        assert_eq!(means, vec![1.0, 3.0, 9.0]);
    }

    #[test]
    fn test_top_k_keeps_best() {
        let mut collector = TopK::new(3);
        for (index, mean) in [5.0, 1.0, 8.0, 3.0, 9.0, 2.0].into_iter().enumerate() {
            collector.push(result(index as u64, mean));
        }
        let best: Vec<u64> = collector.into_sorted_vec().iter().map(|r| r.index).collect();
        assert_eq!(best, vec![4, 2, 0]);
    }

    #[test]
    fn test_top_k_merge_and_zero_capacity() {
        let mut left = TopK::new(2);
        left.push(result(0, 4.0));
        left.push(result(1, 6.0));
        let mut right = TopK::new(2);
        right.push(result(2, 5.0));
        right.push(result(3, 7.0));
        let merged = left.merge(right);
        let best: Vec<u64> = merged.into_sorted_vec().iter().map(|r| r.index).collect();
        assert_eq!(best, vec![3, 1]);

        let mut none = TopK::new(0);
        none.push(result(0, 1.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let space = sample_space();
        let builder = RecordingBuilder::default();
        let settings = OptimizerSettings {
            top_k: 4,
            ..Default::default()
        };
        let parallel = evaluate_parallel(&space, &builder, &NoisySimulator, &settings).unwrap();
        let sequential = evaluate_sequential(&space, &builder, &NoisySimulator, &settings).unwrap();

        assert_eq!(parallel.len(), 4);
        let parallel_indices: Vec<u64> = parallel.iter().map(|r| r.index).collect();
        let sequential_indices: Vec<u64> = sequential.iter().map(|r| r.index).collect();
        assert_eq!(parallel_indices, sequential_indices);
        assert!(parallel.windows(2).all(|w| w[0].mean_dps >= w[1].mean_dps));
        for result in &parallel {
            assert!(result.variance >= 0.0);
            assert!(result.ap_equivalent > 0.0);
        }
    }

    #[test]
    fn test_every_index_evaluated_once() {
        let space = sample_space();
        let builder = RecordingBuilder::default();
        let settings = OptimizerSettings {
            top_k: 100,
            ..Default::default()
        };
        let results = evaluate_parallel(&space, &builder, &NoisySimulator, &settings).unwrap();
        let mut indices: Vec<u64> = results.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..space.total()).collect::<Vec<_>>());
        assert_eq!(
            builder.created.load(std::sync::atomic::Ordering::SeqCst),
            space.total() as usize
        );
    }

    #[test]
    fn test_top_k_far_above_total() {
        let space = sample_space();
        let builder = RecordingBuilder::default();
        let settings = OptimizerSettings::parse("top_k = 9223372036854775807").unwrap();
        assert_eq!(retained_count(&space, settings.top_k), 9);

        let sequential = evaluate_sequential(&space, &builder, &NoisySimulator, &settings).unwrap();
        let parallel = evaluate_parallel(&space, &builder, &NoisySimulator, &settings).unwrap();
        assert_eq!(sequential.len(), 9);
        assert_eq!(parallel.len(), 9);

        let mut unbounded = TopK::new(usize::MAX);
        unbounded.push(result(0, 1.0));
        assert_eq!(unbounded.len(), 1);
    }
}
