// Copyright 2025-2026 Seat Projector contributors.
// This file is part of Seat Projector.

// Seat Projector is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Seat Projector is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Seat Projector.  If not, see <http://www.gnu.org/licenses/>.

//! Model 2: engagement shares tilted by comment sentiment.

use crate::{
	config::Tuning,
	models::engagement_share::allocate,
	prelude::{Projection, ShareMap},
	signals::scores_to_shares,
};

/// Multiplies each engagement share by `1 + sentiment * sentiment_weight`
/// and renormalizes. Sentiment is in [-1, +1] so the adjustment is bounded
/// by the configured weight on either side.
pub fn adjusted_shares(
	engagement_shares: &ShareMap,
	sentiment: &ShareMap,
	tuning: &Tuning,
) -> ShareMap {
	let adjusted: ShareMap = engagement_shares
		.iter()
		.map(|(&party, &share)| {
			let s = sentiment.get(&party).copied().unwrap_or(0.0);
			(party, (share * (1.0 + s * tuning.sentiment_weight)).max(0.0))
		})
		.collect();
	scores_to_shares(&adjusted)
}

/// Model 2: allocate from the sentiment-adjusted shares.
pub fn project(
	engagement_shares: &ShareMap,
	sentiment: &ShareMap,
	tuning: &Tuning,
	gamma: f64,
) -> (ShareMap, Projection) {
	let shares = adjusted_shares(engagement_shares, sentiment, tuning);
	let projection = allocate(&shares, tuning, gamma);
	(shares, projection)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Party;

	#[test]
	fn neutral_sentiment_changes_nothing() {
		let shares: ShareMap =
			[(Party::LiberalDemocratic, 0.6), (Party::Ishin, 0.4)].into_iter().collect();
		let sentiment: ShareMap =
			[(Party::LiberalDemocratic, 0.0), (Party::Ishin, 0.0)].into_iter().collect();
		let adjusted = adjusted_shares(&shares, &sentiment, &Tuning::default());
		assert!((adjusted[&Party::LiberalDemocratic] - 0.6).abs() < 1e-12);
	}

	#[test]
	fn positive_sentiment_tilts_toward_the_party() {
		let shares: ShareMap =
			[(Party::LiberalDemocratic, 0.5), (Party::Ishin, 0.5)].into_iter().collect();
		let sentiment: ShareMap =
			[(Party::LiberalDemocratic, 1.0), (Party::Ishin, -1.0)].into_iter().collect();
		let adjusted = adjusted_shares(&shares, &sentiment, &Tuning::default());
		// 0.5*1.3 vs 0.5*0.7 -> 0.65 vs 0.35.
		assert!((adjusted[&Party::LiberalDemocratic] - 0.65).abs() < 1e-12);
		assert!((adjusted[&Party::Ishin] - 0.35).abs() < 1e-12);
		assert!((adjusted.values().sum::<f64>() - 1.0).abs() < 1e-12);
	}
}
