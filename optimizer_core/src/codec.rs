//! Mixed-radix index codec
//!
//! Maps every tuple of per-dimension picks to one integer in `[0, total)`
//! and back. Dimension 0 is the fastest-moving digit.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("dimension {0} has no choices")]
    EmptyDimension(usize),
    #[error("combination count overflows u64 at dimension {0}")]
    Overflow(usize),
    #[error("index {index} out of range (total {total})")]
    IndexOutOfRange { index: u64, total: u64 },
    #[error("expected {expected} picks, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("pick {pick} out of range for dimension {dimension} (radix {radix})")]
    PickOutOfRange {
        dimension: usize,
        pick: usize,
        radix: usize,
    },
}

/// Cardinalities of each dimension and their cumulative products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRadix {
    radices: Vec<usize>,
    /// `cumulative[i]` is the product of `radices[0..=i]`
    cumulative: Vec<u64>,
}

impl MixedRadix {
    pub fn new(radices: Vec<usize>) -> Result<Self, CodecError> {
        let mut cumulative = Vec::with_capacity(radices.len());
        let mut product: u64 = 1;
        for (dimension, &radix) in radices.iter().enumerate() {
            if radix == 0 {
                return Err(CodecError::EmptyDimension(dimension));
            }
            product = product
                .checked_mul(radix as u64)
                .ok_or(CodecError::Overflow(dimension))?;
            cumulative.push(product);
        }
        Ok(MixedRadix {
            radices,
            cumulative,
        })
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    pub fn cumulative(&self) -> &[u64] {
        &self.cumulative
    }

    pub fn dimensions(&self) -> usize {
        self.radices.len()
    }

    /// Number of distinct tuples; 1 for zero dimensions
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(1)
    }

    /// Place value of a dimension: the product of all faster dimensions
    fn place_value(&self, dimension: usize) -> u64 {
        if dimension == 0 {
            1
        } else {
            self.cumulative[dimension - 1]
        }
    }

    pub fn decode(&self, index: u64) -> Result<Vec<usize>, CodecError> {
        let total = self.total();
        if index >= total {
            return Err(CodecError::IndexOutOfRange { index, total });
        }
        Ok(self
            .radices
            .iter()
            .enumerate()
            .map(|(dimension, &radix)| {
                ((index / self.place_value(dimension)) % radix as u64) as usize
            })
            .collect())
    }

    pub fn encode(&self, picks: &[usize]) -> Result<u64, CodecError> {
        if picks.len() != self.radices.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.radices.len(),
                actual: picks.len(),
            });
        }
        let mut index = 0u64;
        for (dimension, (&pick, &radix)) in picks.iter().zip(&self.radices).enumerate() {
            if pick >= radix {
                return Err(CodecError::PickOutOfRange {
                    dimension,
                    pick,
                    radix,
                });
            }
            // Bounded by total, which fit in u64 at construction
            index += pick as u64 * self.place_value(dimension);
        }
        Ok(index)
    }
}
