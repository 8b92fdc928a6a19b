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

//! Stateless seat-allocation primitives: highest-averages (D'Hondt),
//! power-law ("cube law") district conversion and the largest-remainder
//! corrections that keep every projection summing to exact targets.
//!
//! All iteration is over the stable [`Party`] declaration order; the
//! tie-breaks below depend on it.

use crate::{
	prelude::{Projection, SeatMap, Seats, ShareMap},
	types::{Party, SeatSplit},
};

/// Highest-averages (D'Hondt) allocation of `seats` seats.
///
/// A party with zero or negative score participates in no quotient and
/// receives nothing; an empty score map yields an all-zero allocation.
/// Quotient ties go to the first party in declaration order.
pub fn highest_averages(scores: &ShareMap, seats: Seats) -> SeatMap {
	let mut out: SeatMap = scores.keys().map(|&p| (p, 0)).collect();
	for _ in 0..seats {
		let mut best: Option<(Party, f64)> = None;
		for (&party, &score) in scores {
			if score <= 0.0 {
				continue;
			}
			let assigned = out[&party] as f64;
			let quotient = score / (assigned + 1.0);
			let better = match best {
				Some((_, best_q)) => quotient > best_q,
				None => true,
			};
			if better {
				best = Some((party, quotient));
			}
		}
		match best {
			Some((winner, _)) => {
				*out.get_mut(&winner).expect("key inserted above; qed") += 1;
			},
			None => break,
		}
	}
	out
}

/// Power-law district allocation: raise each positive share to `gamma`,
/// renormalize, scale to `seats`, round, then reconcile to the exact total
/// with a largest-remainder adjustment.
pub fn power_law(shares: &ShareMap, seats: Seats, gamma: f64) -> SeatMap {
	let mut out: SeatMap = shares.keys().map(|&p| (p, 0)).collect();

	let mut weighted = ShareMap::new();
	for (&party, &share) in shares {
		if share > 0.0 {
			weighted.insert(party, share.powf(gamma));
		}
	}
	let total: f64 = weighted.values().sum();
	if total <= 0.0 {
		return out;
	}

	let mut raw = ShareMap::new();
	for (&party, &w) in &weighted {
		let value = w / total * seats as f64;
		raw.insert(party, value);
		out.insert(party, value.round() as Seats);
	}
	largest_remainder_fix(&mut out, &raw, seats);
	out
}

/// Adjusts `seats_map` so its sum equals `target`, awarding single seats to
/// the parties with the largest positive raw-minus-rounded remainder (or
/// removing from the most negative), never taking a party below zero.
pub fn largest_remainder_fix(seats_map: &mut SeatMap, raw: &ShareMap, target: Seats) {
	let current: Seats = seats_map.values().sum();
	let mut diff = target as i64 - current as i64;
	if diff == 0 {
		return;
	}

	let mut order: Vec<Party> = seats_map.keys().copied().collect();
	// Stable sort keeps declaration order among equal remainders.
	order.sort_by(|a, b| {
		let ra = raw.get(a).copied().unwrap_or(0.0) - seats_map[a] as f64;
		let rb = raw.get(b).copied().unwrap_or(0.0) - seats_map[b] as f64;
		if diff > 0 {
			rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
		} else {
			ra.partial_cmp(&rb).unwrap_or(std::cmp::Ordering::Equal)
		}
	});

	let mut idx = 0;
	let mut since_progress = 0;
	while diff != 0 {
		let party = order[idx % order.len()];
		idx += 1;
		let entry = seats_map.get_mut(&party).expect("order built from keys; qed");
		if diff > 0 {
			*entry += 1;
			diff -= 1;
			since_progress = 0;
		} else if *entry > 0 {
			*entry -= 1;
			diff += 1;
			since_progress = 0;
		} else {
			since_progress += 1;
			if since_progress >= order.len() {
				// Nothing left to remove anywhere.
				break;
			}
		}
	}
}

/// Total-and-split correction over (smd, pr, total) triples.
///
/// Pass (a) adjusts per-party totals to `target_total`, shifting whichever
/// sub-count is larger by the same amount. Pass (b) moves single seats
/// between smd and pr within parties until the smd sum equals
/// `target_smd`, always preferring the party whose split ratio most favors
/// the move and never taking a sub-count negative.
pub fn correct_totals(projection: &mut Projection, target_total: Seats, target_smd: Seats) {
	// Normalize any smd+pr drift (from independently rounded components)
	// into the proportional count first.
	for split in projection.values_mut() {
		if split.smd + split.pr != split.total {
			if split.total >= split.smd {
				split.pr = split.total - split.smd;
			} else {
				split.smd = split.total;
				split.pr = 0;
			}
		}
	}

	adjust_totals(projection, target_total);
	rebalance_smd(projection, target_smd);
}

fn adjust_totals(projection: &mut Projection, target_total: Seats) {
	let current: Seats = projection.values().map(|s| s.total).sum();
	let mut diff = target_total as i64 - current as i64;
	if diff == 0 {
		return;
	}

	let mut order: Vec<Party> = projection.keys().copied().collect();
	order.sort_by_key(|p| std::cmp::Reverse(projection[p].total));

	let mut idx = 0;
	let mut since_progress = 0;
	while diff != 0 && since_progress < order.len() {
		let party = order[idx % order.len()];
		idx += 1;
		let split = projection.get_mut(&party).expect("order built from keys; qed");
		if diff > 0 {
			split.total += 1;
			if split.smd >= split.pr {
				split.smd += 1;
			} else {
				split.pr += 1;
			}
			diff -= 1;
			since_progress = 0;
		} else if split.total > 0 {
			split.total -= 1;
			if split.smd >= split.pr && split.smd > 0 {
				split.smd -= 1;
			} else {
				split.pr -= 1;
			}
			diff += 1;
			since_progress = 0;
		} else {
			since_progress += 1;
		}
	}
}

fn rebalance_smd(projection: &mut Projection, target_smd: Seats) {
	loop {
		let smd_sum: Seats = projection.values().map(|s| s.smd).sum();
		if smd_sum == target_smd {
			return;
		}

		let donor = if smd_sum < target_smd {
			// Need more smd: take from the party with the largest
			// pr-to-total ratio that still has pr seats to give.
			best_party(projection, |s| {
				(s.pr > 0).then(|| s.pr as f64 / s.total.max(1) as f64)
			})
		} else {
			best_party(projection, |s| {
				(s.smd > 0).then(|| s.smd as f64 / s.total.max(1) as f64)
			})
		};

		let Some(party) = donor else { return };
		let split = projection.get_mut(&party).expect("selected from keys; qed");
		if smd_sum < target_smd {
			split.pr -= 1;
			split.smd += 1;
		} else {
			split.smd -= 1;
			split.pr += 1;
		}
	}
}

fn best_party(projection: &Projection, ratio: impl Fn(&SeatSplit) -> Option<f64>) -> Option<Party> {
	let mut best: Option<(Party, f64)> = None;
	for (&party, split) in projection {
		let Some(r) = ratio(split) else { continue };
		let better = match best {
			Some((_, best_r)) => r > best_r,
			None => true,
		};
		if better {
			best = Some((party, r));
		}
	}
	best.map(|(p, _)| p)
}

/// Sum of per-party totals.
pub fn projection_total(projection: &Projection) -> Seats {
	projection.values().map(|s| s.total).sum()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::prelude::{SMD_SEATS, TOTAL_SEATS};

	fn shares(pairs: &[(Party, f64)]) -> ShareMap {
		pairs.iter().copied().collect()
	}

	#[test]
	fn dhondt_single_party_takes_everything() {
		let scores = shares(&[(Party::LiberalDemocratic, 12.0)]);
		let seats = highest_averages(&scores, 7);
		assert_eq!(seats[&Party::LiberalDemocratic], 7);
	}

	#[test]
	fn dhondt_ignores_nonpositive_scores() {
		let scores = shares(&[
			(Party::LiberalDemocratic, 10.0),
			(Party::Ishin, 0.0),
			(Party::Communist, -1.0),
		]);
		let seats = highest_averages(&scores, 5);
		assert_eq!(seats[&Party::LiberalDemocratic], 5);
		assert_eq!(seats[&Party::Ishin], 0);
		assert_eq!(seats[&Party::Communist], 0);
	}

	#[test]
	fn dhondt_two_to_one() {
		let scores = shares(&[(Party::LiberalDemocratic, 2.0), (Party::Ishin, 1.0)]);
		let seats = highest_averages(&scores, 3);
		// Quotients: A 2, B 1, A 1 (tie with B broken by order).
		assert_eq!(seats[&Party::LiberalDemocratic], 2);
		assert_eq!(seats[&Party::Ishin], 1);
	}

	#[test]
	fn empty_scores_yield_zero_allocation() {
		let seats = highest_averages(&ShareMap::new(), 10);
		assert!(seats.is_empty());
		let seats = power_law(&ShareMap::new(), 10, 2.5);
		assert!(seats.is_empty());
	}

	#[test]
	fn power_law_sums_exactly() {
		let s = shares(&[
			(Party::LiberalDemocratic, 0.45),
			(Party::Ishin, 0.25),
			(Party::ConstitutionalDemocratic, 0.20),
			(Party::Communist, 0.10),
		]);
		for gamma in [1.0, 1.7, 2.5, 3.3] {
			let seats = power_law(&s, 289, gamma);
			assert_eq!(seats.values().sum::<Seats>(), 289, "gamma={gamma}");
		}
	}

	#[test]
	fn power_law_gamma_one_degenerates_to_proportional() {
		let s = shares(&[
			(Party::LiberalDemocratic, 0.6),
			(Party::Ishin, 0.3),
			(Party::Communist, 0.1),
		]);
		let seats = power_law(&s, 100, 1.0);
		assert_eq!(seats[&Party::LiberalDemocratic], 60);
		assert_eq!(seats[&Party::Ishin], 30);
		assert_eq!(seats[&Party::Communist], 10);
	}

	#[test]
	fn power_law_amplifies_leads() {
		// {0.7, 0.3} at gamma 2: raw weights {0.49, 0.09}, normalized
		// {~0.845, ~0.155}, so 10 seats split 8-9 vs 1-2.
		let s = shares(&[(Party::LiberalDemocratic, 0.7), (Party::Ishin, 0.3)]);
		let seats = power_law(&s, 10, 2.0);
		assert_eq!(seats.values().sum::<Seats>(), 10);
		assert!(seats[&Party::LiberalDemocratic] >= 8);
		assert!(seats[&Party::Ishin] >= 1);
	}

	#[test]
	fn power_law_zero_share_gets_zero_seats() {
		let s = shares(&[(Party::LiberalDemocratic, 1.0), (Party::Ishin, 0.0)]);
		let seats = power_law(&s, 10, 2.5);
		assert_eq!(seats[&Party::Ishin], 0);
		assert_eq!(seats[&Party::LiberalDemocratic], 10);
	}

	#[test]
	fn largest_remainder_never_goes_negative() {
		let mut seats: SeatMap =
			[(Party::LiberalDemocratic, 3), (Party::Ishin, 0)].into_iter().collect();
		let raw: ShareMap =
			[(Party::LiberalDemocratic, 1.4), (Party::Ishin, 0.1)].into_iter().collect();
		largest_remainder_fix(&mut seats, &raw, 1);
		assert_eq!(seats.values().sum::<Seats>(), 1);
		assert_eq!(seats[&Party::Ishin], 0);
	}

	#[test]
	fn correct_totals_hits_both_targets() {
		let mut projection: Projection = [
			(Party::LiberalDemocratic, SeatSplit::new(150, 60)),
			(Party::Ishin, SeatSplit::new(60, 40)),
			(Party::ConstitutionalDemocratic, SeatSplit::new(50, 30)),
			(Party::Komeito, SeatSplit::new(10, 14)),
			(Party::Other, SeatSplit::new(15, 20)),
		]
		.into_iter()
		.collect();
		correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);

		assert_eq!(projection_total(&projection), TOTAL_SEATS);
		assert_eq!(projection.values().map(|s| s.smd).sum::<Seats>(), SMD_SEATS);
		assert_eq!(
			projection.values().map(|s| s.pr).sum::<Seats>(),
			TOTAL_SEATS - SMD_SEATS
		);
		for split in projection.values() {
			assert_eq!(split.smd + split.pr, split.total);
		}
	}

	#[test]
	fn correct_totals_folds_component_drift_into_pr() {
		let mut projection: Projection = [(
			Party::LiberalDemocratic,
			SeatSplit { smd: 280, pr: 170, total: 465 },
		)]
		.into_iter()
		.collect();
		correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
		let split = projection[&Party::LiberalDemocratic];
		assert_eq!(split.smd + split.pr, split.total);
		assert_eq!(split.smd, SMD_SEATS);
		assert_eq!(split.total, TOTAL_SEATS);
	}
}
