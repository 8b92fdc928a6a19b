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

//! Model 7: per-district winner prediction from six candidate signals,
//! aggregated into a national projection.

use crate::{
	apportion::{correct_totals, highest_averages, largest_remainder_fix, power_law},
	capacity::{CapMap, apply_capacity},
	config::Tuning,
	prelude::{LOG_TARGET, PR_SEATS, Projection, SMD_SEATS, SeatMap, Seats, ShareMap, TOTAL_SEATS},
	sources::DistrictHistory,
	types::{Candidate, DistrictId, IncumbencyClass, Party, PartyTable, SeatSplit, alliance_split},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Margin at which a prior win saturates the partisan-lean signal.
const LEAN_SATURATION_MARGIN: f64 = 0.30;
/// Poll-versus-historical-vote-share gap that saturates the swing signal.
const SWING_SATURATION_GAP: f64 = 0.25;

/// One candidate's predicted standing in their district.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateForecast {
	pub name: String,
	pub party: String,
	pub age: Option<u32>,
	/// 1 is the predicted winner.
	pub rank: u32,
	pub probability: f64,
	/// Win-probability gap to the predicted winner; 0 for the winner.
	pub margin: f64,
	pub score: f64,
	pub engagement: f64,
	pub news_mentions: u32,
}

/// Forecast for one single-member district.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictForecast {
	pub district: DistrictId,
	pub winner: String,
	pub winner_party: String,
	pub confidence: f64,
	/// Win-probability gap to the runner-up.
	pub margin: f64,
	pub candidates: Vec<CandidateForecast>,
}

/// Model 7 output: every district call plus the aggregated national
/// projection.
#[derive(Debug, Clone)]
pub struct DistrictOutcome {
	pub forecasts: Vec<DistrictForecast>,
	pub projection: Projection,
}

/// Runs the district model. With an empty roster there are no districts to
/// call, so the national projection degrades to a poll-share allocation.
pub fn project(
	candidates: &[Candidate],
	history: &[DistrictHistory],
	poll_shares: &ShareMap,
	table: &PartyTable,
	tuning: &Tuning,
	gamma: f64,
	caps: Option<&CapMap>,
) -> DistrictOutcome {
	if candidates.is_empty() {
		log::warn!(target: LOG_TARGET, "no district candidates; falling back to poll-share allocation");
		return DistrictOutcome {
			forecasts: Vec::new(),
			projection: poll_fallback(poll_shares, table, gamma, caps),
		};
	}

	let lean_table = build_lean_table(history);

	let mut districts: BTreeMap<DistrictId, Vec<&Candidate>> = BTreeMap::new();
	for candidate in candidates {
		districts.entry(candidate.district.clone()).or_default().push(candidate);
	}

	let mut forecasts = Vec::with_capacity(districts.len());
	for (district, field) in &districts {
		forecasts.push(call_district(district, field, &lean_table, poll_shares, table, tuning));
	}

	let projection = aggregate(&forecasts, poll_shares, table, caps);
	DistrictOutcome { forecasts, projection }
}

fn build_lean_table(history: &[DistrictHistory]) -> BTreeMap<DistrictId, (Party, f64)> {
	let mut table = BTreeMap::new();
	for entry in history {
		let Ok(district) = DistrictId::parse(&entry.district) else {
			log::warn!(target: LOG_TARGET, "skipping history row with unparseable district {:?}", entry.district);
			continue;
		};
		table.insert(district, (Party::from_name(&entry.winner_party), entry.margin));
	}
	table
}

fn call_district(
	district: &DistrictId,
	field: &[&Candidate],
	lean_table: &BTreeMap<DistrictId, (Party, f64)>,
	poll_shares: &ShareMap,
	table: &PartyTable,
	tuning: &Tuning,
) -> DistrictForecast {
	let w = &tuning.district;
	let max_mentions =
		field.iter().map(|c| c.news_mentions).max().unwrap_or(0).max(1) as f64;

	let scores: Vec<f64> = field
		.iter()
		.map(|candidate| {
			let lean = match lean_table.get(district) {
				Some(&(winner, margin)) => {
					let strength = (margin / LEAN_SATURATION_MARGIN).clamp(0.0, 1.0);
					if candidate.party == winner { strength } else { -strength }
				},
				None => 0.0,
			};
			let swing = match candidate.party {
				Party::Independent => 0.0,
				party => {
					let poll = poll_shares.get(&party).copied().unwrap_or(0.0);
					((poll - table.smd_vote_share(party)) / SWING_SATURATION_GAP)
						.clamp(-1.0, 1.0)
				},
			};
			let bonus = if candidate.incumbency == IncumbencyClass::Incumbent {
				w.incumbency_bonus
			} else {
				0.0
			};
			w.partisan_lean * lean +
				w.polling_swing * swing +
				w.candidate_strength * candidate.incumbency.strength() +
				w.incumbency_bonus_weight * bonus +
				w.engagement * candidate.engagement.clamp(0.0, 1.0) +
				w.news_mentions * candidate.news_mentions as f64 / max_mentions
		})
		.collect();

	// Softmax with the maximum subtracted so temperatures stay stable.
	let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
	let exps: Vec<f64> =
		scores.iter().map(|&s| ((s - max_score) / w.softmax_temperature).exp()).collect();
	let z: f64 = exps.iter().sum();
	let probs: Vec<f64> = exps.iter().map(|&e| e / z).collect();

	let mut winner_idx = 0;
	for (idx, &p) in probs.iter().enumerate() {
		if p > probs[winner_idx] {
			winner_idx = idx;
		}
	}
	let runner_up = probs
		.iter()
		.enumerate()
		.filter(|(idx, _)| *idx != winner_idx)
		.map(|(_, &p)| p)
		.fold(0.0_f64, f64::max);
	let margin = probs[winner_idx] - runner_up;
	let confidence = (margin / w.confidence_denominator).min(1.0);

	let mut candidates: Vec<CandidateForecast> = field
		.iter()
		.zip(scores.iter().zip(probs.iter()))
		.map(|(candidate, (&score, &probability))| CandidateForecast {
			name: candidate.name.clone(),
			party: candidate.party_name.clone(),
			age: candidate.age,
			rank: 0,
			probability,
			margin: probs[winner_idx] - probability,
			score,
			engagement: candidate.engagement,
			news_mentions: candidate.news_mentions,
		})
		.collect();
	// Stable sort keeps roster order among equal probabilities.
	candidates.sort_by(|a, b| {
		b.probability.partial_cmp(&a.probability).unwrap_or(std::cmp::Ordering::Equal)
	});
	for (idx, candidate) in candidates.iter_mut().enumerate() {
		candidate.rank = idx as u32 + 1;
	}

	DistrictForecast {
		district: district.clone(),
		winner: field[winner_idx].name.clone(),
		winner_party: field[winner_idx].party_name.clone(),
		confidence,
		margin,
		candidates,
	}
}

/// Folds district calls into a national projection: district wins (scaled
/// up when the roster covers fewer than all districts) become the district
/// seats, list seats follow the poll shares.
fn aggregate(
	forecasts: &[DistrictForecast],
	poll_shares: &ShareMap,
	table: &PartyTable,
	caps: Option<&CapMap>,
) -> Projection {
	let mut wins = ShareMap::new();
	for forecast in forecasts {
		match alliance_split(&forecast.winner_party) {
			Some(split) =>
				for &(party, weight) in split {
					*wins.entry(party).or_insert(0.0) += weight;
				},
			None => {
				let party = match Party::from_name(&forecast.winner_party) {
					Party::Independent => Party::Other,
					party => party,
				};
				*wins.entry(party).or_insert(0.0) += 1.0;
			},
		}
	}

	let scale = SMD_SEATS as f64 / forecasts.len().max(1) as f64;
	let raw_smd: ShareMap =
		Party::ALL.iter().map(|&p| (p, wins.get(&p).copied().unwrap_or(0.0) * scale)).collect();
	let mut smd: SeatMap =
		raw_smd.iter().map(|(&p, &v)| (p, v.round() as Seats)).collect();
	largest_remainder_fix(&mut smd, &raw_smd, SMD_SEATS);

	let pr = highest_averages(poll_shares, PR_SEATS);

	let mut projection: Projection = Party::ALL
		.iter()
		.map(|&party| {
			(party, SeatSplit::new(smd[&party], pr.get(&party).copied().unwrap_or(0)))
		})
		.collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	if let Some(caps) = caps {
		apply_capacity(&mut projection, caps, table);
	}
	projection
}

fn poll_fallback(
	poll_shares: &ShareMap,
	table: &PartyTable,
	gamma: f64,
	caps: Option<&CapMap>,
) -> Projection {
	let smd = power_law(poll_shares, SMD_SEATS, gamma);
	let pr = highest_averages(poll_shares, PR_SEATS);
	let mut projection: Projection = Party::ALL
		.iter()
		.map(|&party| {
			(party, SeatSplit::new(
				smd.get(&party).copied().unwrap_or(0),
				pr.get(&party).copied().unwrap_or(0),
			))
		})
		.collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	if let Some(caps) = caps {
		apply_capacity(&mut projection, caps, table);
	}
	projection
}
