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

//! The `project` command: run all models over a bundle and write both
//! report artifacts.

use crate::{
	commands::{load_tuning, types::ProjectConfig},
	error::Error,
	models::run_all,
	prelude::{LOG_TARGET, Projection},
	report::{DistrictReport, SeatProjectionReport},
	sources::ProjectionInputs,
	utils::{read_json, write_json},
};

pub fn project_cmd(config: ProjectConfig) -> Result<(), Error> {
	let inputs: ProjectionInputs = read_json(&config.input)?;
	let tuning = load_tuning(&config.tuning)?;
	let outputs = run_all(&inputs, &tuning)?;

	log_projection("model 1 (engagement share)", &outputs.model1);
	log_projection("model 2 (sentiment weighted)", &outputs.model2);
	log_projection("model 3 (polling + momentum)", &outputs.model3);
	log_projection("model 4 (social ensemble)", &outputs.model4);
	log_projection("model 5 (news weighted)", &outputs.model5);
	log_projection("model 6 (combined)", &outputs.model6);
	log_projection("model 7 (district)", &outputs.model7);

	std::fs::create_dir_all(&config.output_dir)?;
	let seats_path = config.output_dir.join("seat_projections.json");
	let districts_path = config.output_dir.join("district_predictions.json");
	write_json(&seats_path, &SeatProjectionReport::build(&outputs))?;
	write_json(&districts_path, &DistrictReport::build(&outputs))?;

	log::info!(
		target: LOG_TARGET,
		"wrote {} and {}",
		seats_path.display(),
		districts_path.display(),
	);
	Ok(())
}

fn log_projection(name: &str, projection: &Projection) {
	log::info!(target: LOG_TARGET, "{name}:");
	for (party, split) in projection {
		if split.total == 0 {
			continue;
		}
		log::info!(
			target: LOG_TARGET,
			"  {:<32} {:>3} ({:>3} district, {:>3} list)",
			party.name(),
			split.total,
			split.smd,
			split.pr,
		);
	}
}
