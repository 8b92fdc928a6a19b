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

//! The `districts` command: per-district winner calls with aggregate
//! statistics.

use crate::{
	commands::{load_tuning, types::DistrictsConfig},
	error::Error,
	models::run_all,
	prelude::LOG_TARGET,
	report::{DistrictReport, SAFE_CONFIDENCE},
	sources::ProjectionInputs,
	utils::{read_json, write_json},
};

pub fn districts_cmd(config: DistrictsConfig) -> Result<(), Error> {
	let inputs: ProjectionInputs = read_json(&config.input)?;
	if inputs.roster.is_empty() {
		return Err(Error::EmptyRoster);
	}
	let tuning = load_tuning(&config.tuning)?;
	let outputs = run_all(&inputs, &tuning)?;
	let report = DistrictReport::build(&outputs);

	log_statistics(&report);

	match &config.output {
		Some(path) => {
			write_json(path, &report)?;
			log::info!(target: LOG_TARGET, "wrote {}", path.display());
		},
		None => {
			let json = serde_json::to_string_pretty(&report)?;
			println!("{json}");
		},
	}
	Ok(())
}

fn log_statistics(report: &DistrictReport) {
	log::info!(target: LOG_TARGET, "called {} district(s):", report.districts.len());
	for tally in &report.tallies {
		log::info!(
			target: LOG_TARGET,
			"  {:<32} {:>3} win(s), {:>3} safe",
			tally.party,
			tally.districts,
			tally.high_confidence,
		);
	}

	let safe = report.districts.iter().filter(|d| d.confidence >= SAFE_CONFIDENCE).count();
	log::info!(
		target: LOG_TARGET,
		"{safe} safe call(s), {} tossup(s)",
		report.districts.len() - safe,
	);

	// The ten tightest races, by win-probability margin.
	let mut closest: Vec<_> = report.districts.iter().collect();
	closest.sort_by(|a, b| {
		a.margin.partial_cmp(&b.margin).unwrap_or(std::cmp::Ordering::Equal)
	});
	for forecast in closest.iter().take(10) {
		log::info!(
			target: LOG_TARGET,
			"  closest: {} -> {} ({}) margin {:.3}",
			forecast.district,
			forecast.winner,
			forecast.winner_party,
			forecast.margin,
		);
	}

	if !report.unmatched.is_empty() {
		log::warn!(
			target: LOG_TARGET,
			"{} roster row(s) had unparseable districts",
			report.unmatched.len(),
		);
	}
}
