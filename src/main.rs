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
use seat_projector::{
	commands::{
		calibrate_cmd, districts_cmd, project_cmd,
		types::{CalibrateConfig, DistrictsConfig, ProjectConfig},
	},
	error::Error,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
#[clap(author, version, about)]
pub struct Opt {
	/// Sets a custom logging filter. Syntax is `<target>=<level>`, e.g.
	/// -lseat-projector=debug.
	///
	/// Log levels (least to most verbose) are error, warn, info, debug, and trace.
	/// By default, all targets log `info`. The global log level can be set with `-l<level>`.
	#[clap(long, short, default_value = "info")]
	pub log: String,

	#[clap(subcommand)]
	pub command: Command,
}

#[derive(Debug, Clone, Parser)]
pub enum Command {
	/// Run all seven models over a bundle and write the report artifacts.
	Project(ProjectConfig),
	/// Call every district race and print aggregate statistics.
	Districts(DistrictsConfig),
	/// Fit the power-law exponent against historical elections.
	Calibrate(CalibrateConfig),
}

fn main() -> Result<(), Error> {
	let Opt { log, command } = Opt::parse();
	let filter = EnvFilter::from_default_env().add_directive(log.parse()?);
	tracing_subscriber::fmt().with_env_filter(filter).init();

	match command {
		Command::Project(config) => project_cmd(config),
		Command::Districts(config) => districts_cmd(config),
		Command::Calibrate(config) => calibrate_cmd(config),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cli_project_works() {
		let opt = Opt::try_parse_from([
			env!("CARGO_PKG_NAME"),
			"--log",
			"seat-projector=debug",
			"project",
			"--input",
			"bundle.json",
			"--output-dir",
			"out",
		])
		.unwrap();

		assert_eq!(opt.log, "seat-projector=debug");
		match opt.command {
			Command::Project(config) => {
				assert_eq!(config.input, std::path::PathBuf::from("bundle.json"));
				assert_eq!(config.output_dir, std::path::PathBuf::from("out"));
				assert!(config.tuning.is_none());
			},
			_ => panic!("expected project"),
		}
	}

	#[test]
	fn cli_output_dir_defaults_to_results() {
		let opt = Opt::try_parse_from([
			env!("CARGO_PKG_NAME"),
			"project",
			"--input",
			"bundle.json",
		])
		.unwrap();
		match opt.command {
			Command::Project(config) => {
				assert_eq!(config.output_dir, std::path::PathBuf::from("results"));
			},
			_ => panic!("expected project"),
		}
	}

	#[test]
	fn cli_districts_works() {
		let opt = Opt::try_parse_from([
			env!("CARGO_PKG_NAME"),
			"districts",
			"--input",
			"bundle.json",
			"--output",
			"districts.json",
			"--tuning",
			"tuning.json",
		])
		.unwrap();
		match opt.command {
			Command::Districts(config) => {
				assert_eq!(config.output, Some(std::path::PathBuf::from("districts.json")));
				assert_eq!(config.tuning, Some(std::path::PathBuf::from("tuning.json")));
			},
			_ => panic!("expected districts"),
		}
	}

	#[test]
	fn cli_calibrate_works() {
		let opt = Opt::try_parse_from([
			env!("CARGO_PKG_NAME"),
			"calibrate",
			"--input",
			"bundle.json",
		])
		.unwrap();
		assert!(matches!(opt.command, Command::Calibrate(_)));
	}

	#[test]
	fn cli_rejects_missing_input() {
		assert!(Opt::try_parse_from([env!("CARGO_PKG_NAME"), "project"]).is_err());
	}
}
