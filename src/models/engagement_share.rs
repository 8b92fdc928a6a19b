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

//! Model 1: engagement-share seat projection.

use crate::{
	apportion::{correct_totals, highest_averages, power_law},
	config::Tuning,
	prelude::{PR_SEATS, Projection, SMD_SEATS, Seats, ShareMap, TOTAL_SEATS},
	types::{Party, SeatSplit},
};

/// Allocates the chamber from a share map over the socially visible
/// parties: list seats by highest averages, district seats by the power
/// law, both over the seats left after the exogenous fixed allocations.
///
/// Used by models 1 and 2; the share maps differ, the machinery does not.
pub(crate) fn allocate(shares: &ShareMap, tuning: &Tuning, gamma: f64) -> Projection {
	let mut fixed: Projection = Projection::new();
	for exo in &tuning.exogenous {
		fixed.insert(exo.party, SeatSplit::from_ratio(exo.seats, exo.smd_ratio));
	}
	let fixed_smd: Seats = fixed.values().map(|s| s.smd).sum();
	let fixed_pr: Seats = fixed.values().map(|s| s.pr).sum();
	let smd_available = SMD_SEATS.saturating_sub(fixed_smd);
	let pr_available = PR_SEATS.saturating_sub(fixed_pr);

	let pr = highest_averages(shares, pr_available);
	let smd = power_law(shares, smd_available, gamma);

	let mut projection = fixed;
	for &party in shares.keys() {
		let split = SeatSplit::new(
			smd.get(&party).copied().unwrap_or(0),
			pr.get(&party).copied().unwrap_or(0),
		);
		projection.insert(party, split);
	}
	for &party in &Party::ALL {
		projection.entry(party).or_default();
	}

	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	projection
}

/// Model 1: allocate directly from the engagement shares.
pub fn project(engagement_shares: &ShareMap, tuning: &Tuning, gamma: f64) -> Projection {
	allocate(engagement_shares, tuning, gamma)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apportion::projection_total;

	fn even_shares() -> ShareMap {
		let n = Party::SOCIAL.len() as f64;
		Party::SOCIAL.iter().map(|&p| (p, 1.0 / n)).collect()
	}

	#[test]
	fn exogenous_parties_keep_their_fixed_seats() {
		let tuning = Tuning::default();
		let projection = project(&even_shares(), &tuning, 2.5);
		assert_eq!(projection[&Party::Komeito].total, 24);
		assert_eq!(projection[&Party::Komeito].smd, 10);
		assert_eq!(projection[&Party::Other].total, 10);
		assert_eq!(projection[&Party::Other].smd, 9);
	}

	#[test]
	fn chamber_totals_hold() {
		let tuning = Tuning::default();
		let mut shares = even_shares();
		shares.insert(Party::LiberalDemocratic, 0.5);
		let projection = project(&shares, &tuning, 2.5);
		assert_eq!(projection_total(&projection), TOTAL_SEATS);
		assert_eq!(projection.values().map(|s| s.smd).sum::<Seats>(), SMD_SEATS);
		for split in projection.values() {
			assert_eq!(split.smd + split.pr, split.total);
		}
	}

	#[test]
	fn leading_share_wins_plurality() {
		let tuning = Tuning::default();
		let mut shares: ShareMap = Party::SOCIAL.iter().map(|&p| (p, 0.05)).collect();
		shares.insert(Party::LiberalDemocratic, 0.65);
		let projection = project(&shares, &tuning, 2.5);
		let ldp = projection[&Party::LiberalDemocratic].total;
		for (&party, split) in &projection {
			if party != Party::LiberalDemocratic {
				assert!(ldp > split.total, "{party} >= LDP");
			}
		}
	}
}
