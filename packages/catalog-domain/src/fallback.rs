//! Confidence policy for semantic fallback candidates.
//!
//! The threshold starts relative to the best remaining candidate and rises with each rank
//! position, never dropping below an absolute floor. Positions are taken in the order the vector
//! index returned them; candidates are never re-sorted here.

use std::collections::HashSet;

use catalog_config::SearchFallback;

use crate::item::{Item, ScoredCandidate};

pub const ABSOLUTE_MIN: f32 = catalog_config::DEFAULT_ABSOLUTE_MIN;
pub const SCORE_DROP_TOLERANCE: f32 = catalog_config::DEFAULT_SCORE_DROP_TOLERANCE;
pub const RANK_INCREMENT: f32 = catalog_config::DEFAULT_RANK_INCREMENT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
	pub absolute_min: f32,
	pub score_drop_tolerance: f32,
	pub rank_increment: f32,
}
impl FallbackPolicy {
	/// Minimum score a candidate at `rank` must reach when the best remaining score is `best`.
	pub fn threshold(&self, best: f32, rank: usize) -> f64 {
		let base = f64::from(self.absolute_min)
			.max(f64::from(best) - f64::from(self.score_drop_tolerance));

		(base + rank as f64 * f64::from(self.rank_increment)).min(1.0)
	}
}
impl Default for FallbackPolicy {
	fn default() -> Self {
		Self {
			absolute_min: ABSOLUTE_MIN,
			score_drop_tolerance: SCORE_DROP_TOLERANCE,
			rank_increment: RANK_INCREMENT,
		}
	}
}
impl From<&SearchFallback> for FallbackPolicy {
	fn from(cfg: &SearchFallback) -> Self {
		Self {
			absolute_min: cfg.absolute_min,
			score_drop_tolerance: cfg.score_drop_tolerance,
			rank_increment: cfg.rank_increment,
		}
	}
}

/// Drops candidates already present in `seen_ids` and those under their positional threshold,
/// then keeps at most `limit` items in their original order.
pub fn filter_candidates(
	candidates: Vec<ScoredCandidate>,
	seen_ids: &HashSet<&str>,
	limit: usize,
	policy: &FallbackPolicy,
) -> Vec<Item> {
	let remaining: Vec<ScoredCandidate> = candidates
		.into_iter()
		.filter(|candidate| !seen_ids.contains(candidate.item.id.as_str()))
		.collect();
	let Some(best) = remaining.first().map(|candidate| candidate.score) else {
		return Vec::new();
	};

	remaining
		.into_iter()
		.enumerate()
		.filter(|(rank, candidate)| f64::from(candidate.score) >= policy.threshold(best, *rank))
		.map(|(_, candidate)| candidate.item)
		.take(limit)
		.collect()
}
