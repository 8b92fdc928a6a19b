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

//! Model 3: poll-anchored projection with a clamped engagement momentum
//! term.

use crate::{
	apportion::{correct_totals, power_law},
	config::Tuning,
	prelude::{Projection, SMD_SEATS, ShareMap, TOTAL_SEATS},
	signals::scores_to_shares,
	types::{Party, PartyTable, SeatSplit},
};

/// Blended share: `poll_weight * poll + engagement_weight * (poll +
/// momentum)` where momentum is the engagement-minus-polling gap clamped
/// to `±momentum_clamp`. Parties without a social presence carry zero
/// momentum rather than a spurious negative one.
pub fn blended_shares(
	poll_shares: &ShareMap,
	engagement_shares: &ShareMap,
	tuning: &Tuning,
) -> ShareMap {
	let blended: ShareMap = poll_shares
		.iter()
		.map(|(&party, &poll)| {
			let momentum = match engagement_shares.get(&party) {
				Some(&eng) => (eng - poll).clamp(-tuning.momentum_clamp, tuning.momentum_clamp),
				None => 0.0,
			};
			let share = tuning.poll_weight * poll +
				tuning.engagement_weight * (poll + momentum);
			(party, share.max(0.0))
		})
		.collect();
	scores_to_shares(&blended)
}

/// Model 3: per-party totals proportional to the blended share, each split
/// by the party's historical district ratio, then reconciled to the
/// chamber targets.
pub fn project(
	poll_shares: &ShareMap,
	engagement_shares: &ShareMap,
	table: &PartyTable,
	tuning: &Tuning,
) -> (ShareMap, Projection) {
	let blended = blended_shares(poll_shares, engagement_shares, tuning);

	// gamma 1: proportional with a largest-remainder fix.
	let totals = power_law(&blended, TOTAL_SEATS, 1.0);
	let mut projection: Projection = Party::ALL
		.iter()
		.map(|&party| {
			let total = totals.get(&party).copied().unwrap_or(0);
			(party, SeatSplit::from_ratio(total, table.smd_ratio(party)))
		})
		.collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	(blended, projection)
}
