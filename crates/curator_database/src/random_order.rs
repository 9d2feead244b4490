//! Seeded pseudo-random ordering strategies.
//!
//! Engines differ in whether their random function accepts a seed. The
//! strategy is picked once from configuration and asked for an ordering
//! expression per query.

use std::sync::Arc;

use curator_interface::RandomSeed;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::RandomOrdering;
use crate::sql::{SqlFragment, SqlValue};

/// Characters in the hex rendering of a 16-byte id.
const HEX_ID_LENGTH: u32 = 32;

/// Characters taken per synthetic key segment.
const SEGMENT_LENGTH: u32 = 2;

/// Produces a per-row sort key that is fixed for a given seed.
pub trait RandomOrderStrategy: Send + Sync + std::fmt::Debug {
    /// Ordering expression over `id_column` for `seed`.
    fn order_expression(&self, seed: &RandomSeed, id_column: &str) -> SqlFragment;
}

/// Builds the key from substrings of the row's hex id at positions drawn
/// from a generator seeded with the seed.
///
/// Works on any engine with `hex`, `substr` and `||`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticRowKey {
    segments: usize,
}

impl SyntheticRowKey {
    /// Compose `segments` substrings, at least one.
    pub fn new(segments: usize) -> Self {
        Self {
            segments: segments.max(1),
        }
    }

    /// One-based substring positions chosen for `seed`.
    pub fn positions(&self, seed: &RandomSeed) -> Vec<u32> {
        let value = *seed.value();
        let folded = (value as u64) ^ ((value >> 64) as u64);
        let mut rng = ChaCha8Rng::seed_from_u64(folded);
        (0..self.segments)
            .map(|_| rng.random_range(1..=HEX_ID_LENGTH - SEGMENT_LENGTH + 1))
            .collect()
    }
}

impl Default for SyntheticRowKey {
    fn default() -> Self {
        Self::new(8)
    }
}

impl RandomOrderStrategy for SyntheticRowKey {
    fn order_expression(&self, seed: &RandomSeed, id_column: &str) -> SqlFragment {
        let segments: Vec<String> = self
            .positions(seed)
            .into_iter()
            .map(|start| format!("substr(hex({}), {}, {})", id_column, start, SEGMENT_LENGTH))
            .collect();
        SqlFragment::raw(format!("({})", segments.join(" || ")))
    }
}

/// Delegates to an engine function that takes the seed as its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSeededRandom {
    function: String,
}

impl NativeSeededRandom {
    /// Use `function(seed)`; the name must be a validated identifier.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }
}

impl RandomOrderStrategy for NativeSeededRandom {
    fn order_expression(&self, seed: &RandomSeed, _id_column: &str) -> SqlFragment {
        let truncated = (*seed.value() & u128::from(i64::MAX as u64)) as i64;
        let mut fragment = SqlFragment::raw(format!("{}(", self.function));
        fragment.push_bind(SqlValue::Int(truncated)).push_sql(")");
        fragment
    }
}

/// Strategy for a configured ordering.
pub fn strategy_for(
    ordering: &RandomOrdering,
    synthetic_segments: usize,
) -> Arc<dyn RandomOrderStrategy> {
    match ordering {
        RandomOrdering::Synthetic => Arc::new(SyntheticRowKey::new(synthetic_segments)),
        RandomOrdering::Native { function } => Arc::new(NativeSeededRandom::new(function.clone())),
    }
}
