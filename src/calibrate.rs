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

//! Power-law exponent calibration against historical vote-to-seat
//! conversions.

use crate::{
	config::Tuning,
	error::Error,
	prelude::LOG_TARGET,
	sources::HistoricalElection,
};
use serde::Serialize;

/// Result of a calibration run.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationOutcome {
	/// Grid exponent with the lowest mean squared error.
	pub exponent: f64,
	pub mse: f64,
	pub per_election: Vec<ElectionFit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElectionFit {
	pub name: String,
	pub mse: f64,
}

/// Grid search over the configured exponent range, minimizing the mean
/// squared error between predicted and observed seat shares. Predictions
/// are the continuous power-law transform, not an integer allocation, so
/// the objective is smooth in the exponent apart from grid resolution.
pub fn grid_search(
	elections: &[HistoricalElection],
	tuning: &Tuning,
) -> Result<CalibrationOutcome, Error> {
	if elections.iter().all(|e| e.results.is_empty()) {
		return Err(Error::EmptyHistory);
	}

	let mut best: Option<CalibrationOutcome> = None;
	let steps =
		((tuning.calibration_max - tuning.calibration_min) / tuning.calibration_step).round() as u32;
	for step in 0..=steps {
		let exponent = tuning.calibration_min + step as f64 * tuning.calibration_step;
		let per_election: Vec<ElectionFit> = elections
			.iter()
			.filter(|e| !e.results.is_empty())
			.map(|election| ElectionFit {
				name: election.name.clone(),
				mse: election_mse(election, exponent),
			})
			.collect();
		let mse =
			per_election.iter().map(|f| f.mse).sum::<f64>() / per_election.len() as f64;
		// Strict comparison keeps the smallest exponent on a flat stretch.
		let better = best.as_ref().map(|b| mse < b.mse).unwrap_or(true);
		if better {
			best = Some(CalibrationOutcome { exponent, mse, per_election });
		}
	}

	let outcome = best.expect("grid has at least one step; qed");
	log::info!(
		target: LOG_TARGET,
		"calibrated power-law exponent {:.1} (mse {:.6}) over {} election(s)",
		outcome.exponent,
		outcome.mse,
		outcome.per_election.len(),
	);
	Ok(outcome)
}

fn election_mse(election: &HistoricalElection, exponent: f64) -> f64 {
	let weight_total: f64 = election
		.results
		.iter()
		.map(|r| r.vote_share.max(0.0).powf(exponent))
		.sum();
	if weight_total <= 0.0 {
		return 0.0;
	}
	election
		.results
		.iter()
		.map(|r| {
			let predicted = r.vote_share.max(0.0).powf(exponent) / weight_total;
			(predicted - r.seat_share).powi(2)
		})
		.sum::<f64>() /
		election.results.len() as f64
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sources::HistoricalPartyResult;

	fn election(name: &str, rows: &[(f64, f64)]) -> HistoricalElection {
		HistoricalElection {
			name: name.into(),
			results: rows
				.iter()
				.enumerate()
				.map(|(i, &(vote_share, seat_share))| HistoricalPartyResult {
					party: format!("p{i}"),
					vote_share,
					seat_share,
				})
				.collect(),
		}
	}

	#[test]
	fn empty_history_is_an_error() {
		assert!(matches!(
			grid_search(&[], &Tuning::default()),
			Err(Error::EmptyHistory)
		));
		assert!(matches!(
			grid_search(&[election("empty", &[])], &Tuning::default()),
			Err(Error::EmptyHistory)
		));
	}

	#[test]
	fn recovers_a_known_exponent() {
		// Seat shares generated from vote shares at exponent 2.0: the grid
		// must land on 2.0 exactly since it is a grid point.
		let votes: [f64; 4] = [0.45, 0.30, 0.15, 0.10];
		let z: f64 = votes.iter().map(|v| v.powi(2)).sum();
		let rows: Vec<(f64, f64)> = votes.iter().map(|&v| (v, v * v / z)).collect();
		let outcome = grid_search(&[election("synthetic", &rows)], &Tuning::default()).unwrap();
		assert!((outcome.exponent - 2.0).abs() < 1e-9);
		assert!(outcome.mse < 1e-12);
	}

	#[test]
	fn proportional_history_calibrates_low() {
		// Seats exactly proportional to votes: the best grid exponent is the
		// smallest one offered.
		let rows = [(0.5, 0.5), (0.3, 0.3), (0.2, 0.2)];
		let outcome = grid_search(&[election("proportional", &rows)], &Tuning::default()).unwrap();
		assert!((outcome.exponent - 1.5).abs() < 1e-9);
	}

	#[test]
	fn averages_across_elections() {
		let a = election("a", &[(0.6, 0.8), (0.4, 0.2)]);
		let b = election("b", &[(0.6, 0.75), (0.4, 0.25)]);
		let outcome = grid_search(&[a, b], &Tuning::default()).unwrap();
		assert_eq!(outcome.per_election.len(), 2);
		assert!(outcome.exponent > 1.5);
	}
}
