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

//! The `calibrate` command: fit the power-law exponent and print the fit.

use crate::{
	calibrate::grid_search,
	commands::{load_tuning, types::CalibrateConfig},
	error::Error,
	sources::ProjectionInputs,
	utils::read_json,
};

pub fn calibrate_cmd(config: CalibrateConfig) -> Result<(), Error> {
	let inputs: ProjectionInputs = read_json(&config.input)?;
	let tuning = load_tuning(&config.tuning)?;
	let outcome = grid_search(&inputs.elections, &tuning)?;
	let json = serde_json::to_string_pretty(&outcome)?;
	println!("{json}");
	Ok(())
}
