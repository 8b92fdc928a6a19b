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

//! Model 5: news coverage blended with polling, adjusted by article tone.

use crate::{
	apportion::{correct_totals, power_law},
	config::Tuning,
	prelude::{Projection, SMD_SEATS, ShareMap, TOTAL_SEATS},
	signals::{news::NewsSignals, scores_to_shares},
	types::{Party, PartyTable, SeatSplit},
};

/// News-weighted shares: an additive blend of poll share, coverage
/// intensity and mention share, scaled by a tone multiplier. A party no
/// article ever mentions falls back to half its baseline share so it is
/// penalized for invisibility without being erased.
pub fn news_shares(
	poll_shares: &ShareMap,
	signals: &NewsSignals,
	table: &PartyTable,
	tuning: &Tuning,
) -> ShareMap {
	let w = &tuning.news;
	let baseline = table.baseline_shares();
	let scores: ShareMap = Party::ALL
		.iter()
		.map(|&party| {
			if !signals.observed.contains(&party) {
				return (party, 0.5 * baseline[&party]);
			}
			let poll = poll_shares.get(&party).copied().unwrap_or(0.0);
			let coverage = signals.coverage.get(&party).copied().unwrap_or(0.0);
			let mention = signals.mention_share.get(&party).copied().unwrap_or(0.0);
			let tone = signals.tone.get(&party).copied().unwrap_or(0.0);
			let blend = w.polling * poll + w.coverage * coverage + w.media * mention;
			// Tone swings the blend by up to ±2x the tone weight.
			let score = blend * (1.0 + tone * w.tone * 2.0);
			(party, score.max(0.0))
		})
		.collect();
	scores_to_shares(&scores)
}

/// Model 5: proportional totals from the news-weighted shares, split by
/// historical district ratios.
pub fn project(
	poll_shares: &ShareMap,
	signals: &NewsSignals,
	table: &PartyTable,
	tuning: &Tuning,
) -> (ShareMap, Projection) {
	let shares = news_shares(poll_shares, signals, table, tuning);
	let totals = power_law(&shares, TOTAL_SEATS, 1.0);
	let mut projection: Projection = Party::ALL
		.iter()
		.map(|&party| {
			let total = totals.get(&party).copied().unwrap_or(0);
			(party, SeatSplit::from_ratio(total, table.smd_ratio(party)))
		})
		.collect();
	correct_totals(&mut projection, TOTAL_SEATS, SMD_SEATS);
	(shares, projection)
}
