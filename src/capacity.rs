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

//! Candidate-capacity constraint: a party cannot win more district seats
//! than it fields district candidates, and its list intake is bounded too.
//! Overflow seats are handed to parties that still have room.

use crate::{
	apportion::correct_totals,
	prelude::{Projection, SMD_SEATS, SeatMap, Seats, TOTAL_SEATS},
	types::{Candidate, DistrictId, Party, PartyTable},
};
use std::collections::{BTreeMap, BTreeSet};

/// Per-party seat ceilings derived from the candidate roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateCap {
	/// Fielded district candidates; the hard ceiling on district wins.
	pub smd: Seats,
	/// List ceiling: twice the baseline list intake, but never below the
	/// district ceiling so a party surging in districts is not starved on
	/// the list side.
	pub pr: Seats,
}

impl CandidateCap {
	pub fn total(&self) -> Seats {
		self.smd + self.pr
	}
}

pub type CapMap = BTreeMap<Party, CandidateCap>;

/// Derives caps for every projectable party. Returns `None` when the
/// roster is empty, in which case capacity is not applied at all.
/// Independents count toward [`Party::Other`], matching how their seats
/// are reported.
///
/// A roster that covers fewer districts than the chamber has is a
/// sample, so fielded counts are scaled up to national equivalents by
/// the coverage ratio. Caps from a full roster are taken as-is.
pub fn compute_caps(candidates: &[Candidate], table: &PartyTable) -> Option<CapMap> {
	if candidates.is_empty() {
		return None;
	}

	let covered: BTreeSet<&DistrictId> = candidates.iter().map(|c| &c.district).collect();
	let scale = (SMD_SEATS as f64 / covered.len() as f64).max(1.0);

	let mut fielded: BTreeMap<Party, Seats> = BTreeMap::new();
	for candidate in candidates {
		let party = match candidate.party {
			Party::Independent => Party::Other,
			p => p,
		};
		*fielded.entry(party).or_default() += 1;
	}

	let caps = Party::ALL
		.iter()
		.map(|&party| {
			let count = fielded.get(&party).copied().unwrap_or(0);
			let smd = (count as f64 * scale).round() as Seats;
			let pr = (2 * table.baseline_split(party).pr).max(smd);
			(party, CandidateCap { smd, pr })
		})
		.collect();
	Some(caps)
}

/// Clamps a projection to the caps and re-reconciles it to the chamber
/// totals.
///
/// Each side of a party's split is clamped to its own ceiling: district
/// seats to the fielded-candidate count, list seats to the list ceiling.
/// Seats removed this way are handed to parties that were not clamped
/// and still have room, in proportion to their polling baselines. The
/// district ceiling is enforced again after the final total correction
/// since that correction may push district counts back up.
pub fn apply_capacity(projection: &mut Projection, caps: &CapMap, table: &PartyTable) {
	let mut overflow: Seats = 0;
	let mut clamped: BTreeSet<Party> = BTreeSet::new();
	for (&party, split) in projection.iter_mut() {
		let cap = caps.get(&party).copied().unwrap_or_default();
		if split.smd > cap.smd {
			overflow += split.smd - cap.smd;
			split.smd = cap.smd;
			clamped.insert(party);
		}
		if split.pr > cap.pr {
			overflow += split.pr - cap.pr;
			split.pr = cap.pr;
			clamped.insert(party);
		}
		split.total = split.smd + split.pr;
	}
	if overflow > 0 {
		redistribute(projection, caps, table, &clamped, overflow);
	}

	correct_totals(projection, TOTAL_SEATS, SMD_SEATS);
	enforce_smd_caps(projection, caps);
}

/// Hands `overflow` seats to unclamped parties still below their
/// ceilings, weighted by polling baseline, largest remainder first.
/// Rounds repeat until the overflow is gone or no party has room left.
/// Each grant is split along the recipient's historical district ratio,
/// clipped to the room left on either side.
fn redistribute(
	projection: &mut Projection,
	caps: &CapMap,
	table: &PartyTable,
	clamped: &BTreeSet<Party>,
	mut overflow: Seats,
) {
	while overflow > 0 {
		let headroom: SeatMap = projection
			.iter()
			.filter_map(|(&party, split)| {
				if clamped.contains(&party) {
					return None;
				}
				let cap = caps.get(&party).copied().unwrap_or_default();
				let room = cap.smd.saturating_sub(split.smd) + cap.pr.saturating_sub(split.pr);
				(room > 0).then_some((party, room))
			})
			.collect();
		if headroom.is_empty() {
			return;
		}

		let weight_total: f64 =
			headroom.keys().map(|&p| table.baseline(p).max(1) as f64).sum();
		let mut grants: Vec<(Party, Seats, f64)> = headroom
			.iter()
			.map(|(&party, &room)| {
				let raw = overflow as f64 * table.baseline(party).max(1) as f64 / weight_total;
				let whole = (raw.floor() as Seats).min(room);
				(party, whole, raw - raw.floor())
			})
			.collect();

		let granted: Seats = grants.iter().map(|(_, g, _)| *g).sum();
		let mut leftover = overflow - granted.min(overflow);

		// Single seats by largest fractional remainder, capped by headroom.
		grants.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
		for (party, grant, _) in grants.iter_mut() {
			if leftover == 0 {
				break;
			}
			if *grant < headroom[party] {
				*grant += 1;
				leftover -= 1;
			}
		}

		let mut progressed = false;
		for &(party, grant, _) in &grants {
			if grant == 0 {
				continue;
			}
			let cap = caps.get(&party).copied().unwrap_or_default();
			let split = projection.get_mut(&party).expect("headroom from keys; qed");
			let smd_room = cap.smd.saturating_sub(split.smd);
			let pr_room = cap.pr.saturating_sub(split.pr);
			let mut smd_add = ((grant as f64) * table.smd_ratio(party)).round() as Seats;
			smd_add = smd_add.min(smd_room).min(grant);
			let mut pr_add = grant - smd_add;
			if pr_add > pr_room {
				smd_add = (grant - pr_room).min(smd_room);
				pr_add = grant - smd_add;
			}
			split.smd += smd_add;
			split.pr += pr_add;
			split.total = split.smd + split.pr;
			overflow -= grant;
			progressed = true;
		}
		if !progressed {
			return;
		}
	}
}

/// Moves district seats above a party's fielded-candidate count to its
/// list, then pulls the district sum back to target through parties that
/// still have district headroom and list seats to convert.
fn enforce_smd_caps(projection: &mut Projection, caps: &CapMap) {
	for (&party, split) in projection.iter_mut() {
		let cap = caps.get(&party).map(|c| c.smd).unwrap_or(0);
		if split.smd > cap {
			let excess = split.smd - cap;
			split.smd = cap;
			split.pr += excess;
		}
	}

	loop {
		let smd_sum: Seats = projection.values().map(|s| s.smd).sum();
		if smd_sum >= SMD_SEATS {
			return;
		}
		let recipient = projection
			.iter()
			.filter(|&(&party, split)| {
				let cap = caps.get(&party).map(|c| c.smd).unwrap_or(0);
				split.smd < cap && split.pr > 0
			})
			.max_by(|(_, a), (_, b)| {
				let ra = a.pr as f64 / a.total.max(1) as f64;
				let rb = b.pr as f64 / b.total.max(1) as f64;
				ra.partial_cmp(&rb).unwrap_or(std::cmp::Ordering::Equal)
			})
			.map(|(&party, _)| party);
		let Some(party) = recipient else { return };
		let split = projection.get_mut(&party).expect("selected from keys; qed");
		split.pr -= 1;
		split.smd += 1;
	}
}
