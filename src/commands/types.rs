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

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
pub struct ProjectConfig {
	/// Path to the JSON input bundle.
	#[clap(long)]
	pub input: PathBuf,

	/// Directory the report artifacts are written to.
	#[clap(long, default_value = "results")]
	pub output_dir: PathBuf,

	/// Optional JSON file overriding any subset of the tuning constants.
	#[clap(long)]
	pub tuning: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct DistrictsConfig {
	/// Path to the JSON input bundle; must carry a candidate roster.
	#[clap(long)]
	pub input: PathBuf,

	/// Write the district report here instead of stdout.
	#[clap(long)]
	pub output: Option<PathBuf>,

	/// Optional JSON file overriding any subset of the tuning constants.
	#[clap(long)]
	pub tuning: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct CalibrateConfig {
	/// Path to the JSON input bundle; must carry historical elections.
	#[clap(long)]
	pub input: PathBuf,

	/// Optional JSON file overriding any subset of the tuning constants.
	#[clap(long)]
	pub tuning: Option<PathBuf>,
}
