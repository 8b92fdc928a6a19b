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

//! Polling composite: recency- and sample-size-weighted party support,
//! normalized to shares.

use crate::{
	config::Tuning,
	prelude::ShareMap,
	signals::{decay::recency_weight, scores_to_shares},
	sources::PollObservation,
	types::{Party, PartyTable},
};
use std::collections::BTreeMap;

/// Weighted-average support per party across all poll observations,
/// weight = recency decay (against the most recent survey date) times
/// `sqrt(sample / reference_sample)`. Parties absent from every poll fall
/// back to their baseline share so the composite stays total; with no poll
/// data at all the result is exactly the baseline distribution.
pub fn composite(polls: &[PollObservation], table: &PartyTable, tuning: &Tuning) -> ShareMap {
	let party_rows: Vec<&PollObservation> =
		polls.iter().filter(|p| p.is_party_row()).collect();
	let Some(latest) = party_rows.iter().map(|p| p.survey_date).max() else {
		return table.baseline_shares();
	};

	let mut weighted: BTreeMap<Party, (f64, f64)> = BTreeMap::new();
	for poll in &party_rows {
		let party = Party::from_name(&poll.party);
		if !Party::ALL.contains(&party) {
			continue;
		}
		let age_days = (latest - poll.survey_date).num_days() as f64;
		let weight = recency_weight(age_days, tuning.poll_half_life_days) *
			(poll.sample_size as f64 / tuning.poll_reference_sample).sqrt();
		let entry = weighted.entry(party).or_insert((0.0, 0.0));
		entry.0 += weight * poll.support_rate;
		entry.1 += weight;
	}

	let baseline = table.baseline_shares();
	let mut scores = ShareMap::new();
	for &party in &Party::ALL {
		let score = match weighted.get(&party) {
			Some(&(sum, w)) if w > 0.0 => sum / w,
			// Unpolled party: scale its baseline share into the support
			// scale (percent) so normalization treats it fairly.
			_ => baseline[&party] * 100.0,
		};
		scores.insert(party, score);
	}
	scores_to_shares(&scores)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn poll(day: u32, party: &str, rate: f64, sample: u32) -> PollObservation {
		PollObservation {
			survey_date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
			source: "NHK".into(),
			party: party.into(),
			support_rate: rate,
			sample_size: sample,
		}
	}

	#[test]
	fn no_polls_fall_back_to_baseline() {
		let table = PartyTable::default();
		let shares = composite(&[], &table, &Tuning::default());
		assert_eq!(shares, table.baseline_shares());
	}

	#[test]
	fn shares_sum_to_one() {
		let table = PartyTable::default();
		let polls = vec![
			poll(5, "自由民主党", 32.0, 1500),
			poll(5, "日本維新の会", 12.0, 1500),
			poll(5, "支持なし", 21.0, 1500),
		];
		let shares = composite(&polls, &table, &Tuning::default());
		assert!((shares.values().sum::<f64>() - 1.0).abs() < 1e-9);
		assert!(shares[&Party::LiberalDemocratic] > shares[&Party::Ishin]);
	}

	#[test]
	fn recent_polls_dominate() {
		let table = PartyTable::default();
		// Old polls say Ishin leads, recent ones say LDP leads.
		let polls = vec![
			poll(1, "自由民主党", 10.0, 1500),
			poll(1, "日本維新の会", 40.0, 1500),
			poll(31, "自由民主党", 40.0, 1500),
			poll(31, "日本維新の会", 10.0, 1500),
		];
		let shares = composite(&polls, &table, &Tuning::default());
		assert!(shares[&Party::LiberalDemocratic] > shares[&Party::Ishin]);
	}

	#[test]
	fn larger_samples_weigh_more() {
		let table = PartyTable::default();
		let polls = vec![
			poll(10, "自由民主党", 20.0, 100),
			poll(10, "自由民主党", 40.0, 2500),
		];
		let shares = composite(&polls, &table, &Tuning::default());
		// The weighted mean support must sit closer to the large sample.
		let ldp = shares[&Party::LiberalDemocratic];
		let polls_eq = vec![
			poll(10, "自由民主党", 30.0, 1500),
		];
		let shares_mid = composite(&polls_eq, &table, &Tuning::default());
		assert!(ldp > shares_mid[&Party::LiberalDemocratic]);
	}
}
