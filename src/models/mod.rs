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

//! The seven projection models and the pipeline that runs them in order
//! over one input bundle.

pub mod district;
pub mod engagement_share;
pub mod ensemble;
pub mod news_model;
pub mod polling_momentum;
pub mod sentiment_weighted;

use crate::{
	calibrate::{self, CalibrationOutcome},
	capacity::compute_caps,
	config::Tuning,
	error::Error,
	prelude::{LOG_TARGET, Projection, ShareMap},
	signals::{self, scores_to_shares},
	sources::ProjectionInputs,
	types::{Candidate, PartyTable},
};
use district::DistrictForecast;

/// Everything one projection run produces: the seven seat maps, the
/// intermediate per-party signals the reports surface, and the per-district
/// calls.
#[derive(Debug, Clone)]
pub struct ModelOutputs {
	pub calibration: Option<CalibrationOutcome>,
	/// Exponent actually used for district allocation.
	pub exponent: f64,
	pub engagement_scores: ShareMap,
	pub engagement_shares: ShareMap,
	pub sentiment: ShareMap,
	pub sentiment_shares: ShareMap,
	pub poll_shares: ShareMap,
	pub blended_shares: ShareMap,
	pub news_shares: ShareMap,
	pub baseline: Projection,
	pub model1: Projection,
	pub model2: Projection,
	pub model3: Projection,
	pub model4: Projection,
	pub model5: Projection,
	pub model6: Projection,
	pub model7: Projection,
	pub districts: Vec<DistrictForecast>,
	/// Roster rows whose district identifier failed to parse.
	pub unmatched: Vec<String>,
}

/// Runs every model over one input bundle. Each missing input section
/// degrades the models that need it rather than failing the run; the only
/// hard error here is a malformed bundle.
pub fn run_all(inputs: &ProjectionInputs, tuning: &Tuning) -> Result<ModelOutputs, Error> {
	let table = PartyTable::from_refs(&inputs.parties);
	let reference = inputs.content_reference();

	// Calibrate the district exponent when the bundle carries history.
	let calibration = if inputs.elections.is_empty() {
		None
	} else {
		Some(calibrate::grid_search(&inputs.elections, tuning)?)
	};
	let exponent = calibration.as_ref().map(|c| c.exponent).unwrap_or(tuning.cube_exponent);

	let (candidates, unmatched) = parse_roster(inputs);
	let caps = compute_caps(&candidates, &table);

	let engagement_scores =
		signals::engagement::composite_scores(&inputs.channels, &inputs.videos, reference, tuning);
	let engagement_shares = scores_to_shares(&engagement_scores);
	let sentiment =
		signals::sentiment::party_sentiment(&inputs.videos, &inputs.comments, tuning.min_comments);
	let poll_shares = signals::polling::composite(&inputs.polls, &table, tuning);
	let news_signals =
		signals::news::aggregate(&inputs.news_articles, reference, tuning.content_half_life_days);

	let model1 = engagement_share::project(&engagement_shares, tuning, exponent);
	let (sentiment_shares, model2) =
		sentiment_weighted::project(&engagement_shares, &sentiment, tuning, exponent);
	let (blended_shares, model3) =
		polling_momentum::project(&poll_shares, &engagement_shares, &table, tuning);
	let (news_shares, model5) =
		news_model::project(&poll_shares, &news_signals, &table, tuning);

	let model4 =
		ensemble::social_ensemble(&model1, &model2, &model3, &table, tuning, caps.as_ref());
	let baseline = ensemble::baseline_projection(&table);
	let model6 =
		ensemble::combined(&model4, &model5, &baseline, &table, tuning, caps.as_ref());

	let district_outcome = district::project(
		&candidates,
		&inputs.district_history,
		&poll_shares,
		&table,
		tuning,
		exponent,
		caps.as_ref(),
	);

	log::info!(
		target: LOG_TARGET,
		"ran 7 models: {} videos, {} comments, {} articles, {} polls, {} candidates ({} unmatched)",
		inputs.videos.len(),
		inputs.comments.len(),
		inputs.news_articles.len(),
		inputs.polls.len(),
		candidates.len(),
		unmatched.len(),
	);

	Ok(ModelOutputs {
		calibration,
		exponent,
		engagement_scores,
		engagement_shares,
		sentiment,
		sentiment_shares,
		poll_shares,
		blended_shares,
		news_shares,
		baseline,
		model1,
		model2,
		model3,
		model4,
		model5,
		model6,
		model7: district_outcome.projection,
		districts: district_outcome.forecasts,
		unmatched,
	})
}

fn parse_roster(inputs: &ProjectionInputs) -> (Vec<Candidate>, Vec<String>) {
	let mut candidates = Vec::with_capacity(inputs.roster.len());
	let mut unmatched = Vec::new();
	for record in &inputs.roster {
		match Candidate::from_record(record) {
			Ok(candidate) => candidates.push(candidate),
			Err(err) => {
				log::warn!(target: LOG_TARGET, "skipping roster row for {:?}: {err}", record.candidate);
				unmatched.push(record.district.clone());
			},
		}
	}
	(candidates, unmatched)
}
