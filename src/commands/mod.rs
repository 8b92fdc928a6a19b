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

pub mod calibrate;
pub mod districts;
pub mod project;
pub mod types;

pub use calibrate::calibrate_cmd;
pub use districts::districts_cmd;
pub use project::project_cmd;

use crate::{config::Tuning, error::Error, utils::read_json};
use std::path::PathBuf;

/// Loads a tuning override file, or the defaults when none was given.
pub(crate) fn load_tuning(path: &Option<PathBuf>) -> Result<Tuning, Error> {
	match path {
		Some(path) => read_json(path),
		None => Ok(Tuning::default()),
	}
}
