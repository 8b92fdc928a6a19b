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

//! Serializable report shapes for the two output artifacts. Reports are a
//! pure function of the model outputs so reruns over the same bundle are
//! byte-identical.

use crate::{
	calibrate::CalibrationOutcome,
	models::{ModelOutputs, district::DistrictForecast},
	prelude::{PR_SEATS, SMD_SEATS, TOTAL_SEATS},
	types::{Party, SeatSplit},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// One party's row across every model, plus the intermediate signals that
/// explain the numbers.
#[derive(Debug, Clone, Serialize)]
pub struct PartyRow {
	pub party: String,
	pub engagement_score: f64,
	pub engagement_share: f64,
	pub sentiment: f64,
	pub sentiment_share: f64,
	pub poll_share: f64,
	pub blended_share: f64,
	pub news_share: f64,
	pub baseline: SeatSplit,
	pub engagement_model: SeatSplit,
	pub sentiment_model: SeatSplit,
	pub polling_model: SeatSplit,
	pub ensemble_model: SeatSplit,
	pub news_model: SeatSplit,
	pub combined_model: SeatSplit,
	pub district_model: SeatSplit,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChamberShape {
	pub total: u32,
	pub smd: u32,
	pub pr: u32,
}

/// The seat-projection artifact.
#[derive(Debug, Clone, Serialize)]
pub struct SeatProjectionReport {
	pub chamber: ChamberShape,
	pub exponent: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub calibration: Option<CalibrationOutcome>,
	pub parties: Vec<PartyRow>,
}

impl SeatProjectionReport {
	pub fn build(outputs: &ModelOutputs) -> SeatProjectionReport {
		let share = |map: &BTreeMap<Party, f64>, party: Party| {
			map.get(&party).copied().unwrap_or(0.0)
		};
		let split = |map: &BTreeMap<Party, SeatSplit>, party: Party| {
			map.get(&party).copied().unwrap_or_default()
		};

		let parties = Party::ALL
			.iter()
			.map(|&party| PartyRow {
				party: party.name().to_string(),
				engagement_score: share(&outputs.engagement_scores, party),
				engagement_share: share(&outputs.engagement_shares, party),
				sentiment: share(&outputs.sentiment, party),
				sentiment_share: share(&outputs.sentiment_shares, party),
				poll_share: share(&outputs.poll_shares, party),
				blended_share: share(&outputs.blended_shares, party),
				news_share: share(&outputs.news_shares, party),
				baseline: split(&outputs.baseline, party),
				engagement_model: split(&outputs.model1, party),
				sentiment_model: split(&outputs.model2, party),
				polling_model: split(&outputs.model3, party),
				ensemble_model: split(&outputs.model4, party),
				news_model: split(&outputs.model5, party),
				combined_model: split(&outputs.model6, party),
				district_model: split(&outputs.model7, party),
			})
			.collect();

		SeatProjectionReport {
			chamber: ChamberShape { total: TOTAL_SEATS, smd: SMD_SEATS, pr: PR_SEATS },
			exponent: outputs.exponent,
			calibration: outputs.calibration.clone(),
			parties,
		}
	}
}

/// Per-party tally of district calls.
#[derive(Debug, Clone, Serialize)]
pub struct WinnerTally {
	pub party: String,
	pub districts: u32,
	pub high_confidence: u32,
}

/// The district-prediction artifact.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictReport {
	pub districts: Vec<DistrictForecast>,
	pub tallies: Vec<WinnerTally>,
	/// Roster rows dropped for unparseable district identifiers.
	pub unmatched: Vec<String>,
}

/// Confidence at or above which a call counts as safe.
pub const SAFE_CONFIDENCE: f64 = 0.7;

impl DistrictReport {
	pub fn build(outputs: &ModelOutputs) -> DistrictReport {
		let mut tallies: BTreeMap<String, (u32, u32)> = BTreeMap::new();
		for forecast in &outputs.districts {
			let entry = tallies.entry(forecast.winner_party.clone()).or_insert((0, 0));
			entry.0 += 1;
			if forecast.confidence >= SAFE_CONFIDENCE {
				entry.1 += 1;
			}
		}
		DistrictReport {
			districts: outputs.districts.clone(),
			tallies: tallies
				.into_iter()
				.map(|(party, (districts, high_confidence))| WinnerTally {
					party,
					districts,
					high_confidence,
				})
				.collect(),
			unmatched: outputs.unmatched.clone(),
		}
	}
}
