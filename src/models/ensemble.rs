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

//! Models 4 and 6: weighted ensembles over the per-signal projections.

use crate::{
	apportion::{correct_totals, largest_remainder_fix},
	capacity::{CapMap, apply_capacity},
	config::Tuning,
	prelude::{Projection, SMD_SEATS, SeatMap, Seats, ShareMap, TOTAL_SEATS},
	types::{Party, PartyTable, SeatSplit},
};

/// Blends projections seat-wise with the given weights (summing to 1),
/// integerizes the totals by largest remainder and reconciles the result
/// to the chamber targets.
fn blend(parts: &[(&Projection, f64)]) -> Projection {
	let mut raw_total = ShareMap::new();
	let mut raw_smd = ShareMap::new();
	for &party in &Party::ALL {
		let mut total = 0.0;
		let mut smd = 0.0;
		for (projection, weight) in parts {
			let split = projection.get(&party).copied().unwrap_or_default();
			total += weight * split.total as f64;
			smd += weight * split.smd as f64;
		}
		raw_total.insert(party, total);
		raw_smd.insert(party, smd);
	}

	let mut totals: SeatMap =
		raw_total.iter().map(|(&p, &v)| (p, v.round() as Seats)).collect();
	largest_remainder_fix(&mut totals, &raw_total, TOTAL_SEATS);

	let mut projection: Projection = Party::ALL
		.iter()
		.map(|&party| {
			let total = totals[&party];
			let smd = (raw_smd[&party].round() as Seats).min(total);
			(party, SeatSplit { smd, pr: total - smd, total })
		})
		.collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	projection
}

/// Model 4: social ensemble over models 1-3, capacity-constrained when a
/// roster is available.
pub fn social_ensemble(
	model1: &Projection,
	model2: &Projection,
	model3: &Projection,
	table: &PartyTable,
	tuning: &Tuning,
	caps: Option<&CapMap>,
) -> Projection {
	let w = &tuning.ensemble;
	let mut projection =
		blend(&[(model1, w.model1), (model2, w.model2), (model3, w.model3)]);
	if let Some(caps) = caps {
		apply_capacity(&mut projection, caps, table);
	}
	projection
}

/// Model 6: models 4 and 5 blended, then anchored toward the static
/// polling baseline. The anchor damps swings that every upstream signal
/// shares, such as a campaign week with one viral party.
pub fn combined(
	model4: &Projection,
	model5: &Projection,
	baseline: &Projection,
	table: &PartyTable,
	tuning: &Tuning,
	caps: Option<&CapMap>,
) -> Projection {
	let w = &tuning.combined;
	let signal = 1.0 - w.anchor;
	let mut projection = blend(&[
		(model4, w.model4 * signal),
		(model5, w.model5 * signal),
		(baseline, w.anchor),
	]);
	if let Some(caps) = caps {
		apply_capacity(&mut projection, caps, table);
	}
	projection
}

/// The static polling-baseline projection the combined model anchors to.
pub fn baseline_projection(table: &PartyTable) -> Projection {
	let mut projection: Projection =
		Party::ALL.iter().map(|&p| (p, table.baseline_split(p))).collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	projection
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apportion::projection_total;

	fn flat(total_per_party: Seats) -> Projection {
		Party::ALL
			.iter()
			.map(|&p| (p, SeatSplit::from_ratio(total_per_party, 0.6)))
			.collect()
	}

	#[test]
	fn baseline_projection_is_exact() {
		let projection = baseline_projection(&PartyTable::default());
		assert_eq!(projection_total(&projection), TOTAL_SEATS);
		assert_eq!(projection.values().map(|s| s.smd).sum::<Seats>(), SMD_SEATS);
	}

	#[test]
	fn identical_inputs_blend_to_themselves() {
		let base = baseline_projection(&PartyTable::default());
		let table = PartyTable::default();
		let blended =
			social_ensemble(&base, &base, &base, &table, &Tuning::default(), None);
		assert_eq!(blended, base);
	}

	#[test]
	fn ensemble_weights_shift_the_outcome() {
		let table = PartyTable::default();
		let base = baseline_projection(&table);
		// A degenerate model giving everything to one party.
		let mut skew = flat(0);
		skew.insert(Party::LiberalDemocratic, SeatSplit::new(289, 176));
		let blended = social_ensemble(&base, &base, &skew, &table, &Tuning::default(), None);
		assert_eq!(projection_total(&blended), TOTAL_SEATS);
		assert!(
			blended[&Party::LiberalDemocratic].total > base[&Party::LiberalDemocratic].total
		);
	}

	#[test]
	fn anchor_pulls_toward_baseline() {
		let table = PartyTable::default();
		let base = baseline_projection(&table);
		let mut skew = flat(0);
		skew.insert(Party::LiberalDemocratic, SeatSplit::new(289, 176));
		let anchored = combined(&skew, &skew, &base, &table, &Tuning::default(), None);
		// With a 0.30 anchor the winner keeps at most 70% of the sweep plus
		// its baseline share.
		let ldp = anchored[&Party::LiberalDemocratic].total;
		assert!(ldp < TOTAL_SEATS);
		assert!(ldp > base[&Party::LiberalDemocratic].total);
		assert_eq!(projection_total(&anchored), TOTAL_SEATS);
	}
}
