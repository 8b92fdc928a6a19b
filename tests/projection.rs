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

//! End-to-end tests over a synthetic campaign bundle.

use assert_cmd::cargo::cargo_bin;
use seat_projector::{
	apportion::projection_total,
	config::Tuning,
	models::run_all,
	prelude::{PR_SEATS, SMD_SEATS, Seats, TOTAL_SEATS},
	sources::ProjectionInputs,
	types::Party,
};

fn synthetic_bundle() -> ProjectionInputs {
	serde_json::from_value(serde_json::json!({
		"election_date": "2026-02-08",
		"channels": [
			{ "party": "自由民主党", "subscribers": 450_000, "channel_views": 90_000_000 },
			{ "party": "日本維新の会", "subscribers": 260_000, "channel_views": 40_000_000 },
			{ "party": "立憲民主党", "subscribers": 180_000, "channel_views": 30_000_000 },
			{ "party": "国民民主党", "subscribers": 320_000, "channel_views": 55_000_000 },
			{ "party": "日本共産党", "subscribers": 90_000, "channel_views": 12_000_000 },
			{ "party": "れいわ新選組", "subscribers": 410_000, "channel_views": 70_000_000 },
			{ "party": "参政党", "subscribers": 300_000, "channel_views": 48_000_000 },
			{ "party": "チームみらい", "subscribers": 120_000, "channel_views": 9_000_000 }
		],
		"videos": [
			{ "video_id": "a1", "party": "自由民主党", "published_at": "2026-01-20T10:00:00Z",
			  "views": 400_000, "likes": 12_000 },
			{ "video_id": "a2", "party": "自由民主党", "published_at": "2026-02-01T10:00:00Z",
			  "views": 650_000, "likes": 20_000 },
			{ "video_id": "b1", "party": "れいわ新選組", "published_at": "2026-01-25T10:00:00Z",
			  "views": 500_000, "likes": 30_000 },
			{ "video_id": "b2", "party": "れいわ新選組", "published_at": "2026-02-03T10:00:00Z",
			  "views": 700_000, "likes": 45_000 },
			{ "video_id": "c1", "party": "国民民主党", "published_at": "2026-01-28T10:00:00Z",
			  "views": 350_000, "likes": 18_000 }
		],
		"comments": [
			{ "video_id": "a1", "score": 0.2 },
			{ "video_id": "a1", "score": -0.4 },
			{ "video_id": "a2", "score": 0.1 },
			{ "video_id": "b1", "score": 0.8 },
			{ "video_id": "b1", "score": 0.6 },
			{ "video_id": "b2", "score": 0.7 },
			{ "video_id": "c1", "label": "positive" },
			{ "video_id": "c1", "label": "positive" },
			{ "video_id": "c1", "label": "neutral" }
		],
		"news_articles": [
			{ "source": "NHK", "credibility": 4.5, "published_at": "2026-02-02T08:00:00Z",
			  "tone": 0.1, "page_views": 90_000, "parties": ["自由民主党", "立憲民主党"] },
			{ "source": "朝日新聞", "credibility": 4.2, "published_at": "2026-02-04T08:00:00Z",
			  "tone": 0.4, "page_views": 60_000, "parties": ["れいわ新選組"] },
			{ "source": "blog", "credibility": 1.5, "published_at": "2026-01-15T08:00:00Z",
			  "tone": -0.6, "page_views": 5_000, "parties": ["参政党"] }
		],
		"polls": [
			{ "survey_date": "2026-01-25", "source": "NHK", "party": "自由民主党",
			  "support_rate": 31.0, "sample_size": 1800 },
			{ "survey_date": "2026-01-25", "source": "NHK", "party": "日本維新の会",
			  "support_rate": 11.5, "sample_size": 1800 },
			{ "survey_date": "2026-01-25", "source": "NHK", "party": "立憲民主党",
			  "support_rate": 9.0, "sample_size": 1800 },
			{ "survey_date": "2026-01-25", "source": "NHK", "party": "支持なし",
			  "support_rate": 28.0, "sample_size": 1800 },
			{ "survey_date": "2026-02-01", "source": "読売新聞", "party": "自由民主党",
			  "support_rate": 29.5, "sample_size": 2200 },
			{ "survey_date": "2026-02-01", "source": "読売新聞", "party": "れいわ新選組",
			  "support_rate": 6.5, "sample_size": 2200 },
			{ "survey_date": "2026-02-01", "source": "読売新聞", "party": "公明党",
			  "support_rate": 4.0, "sample_size": 2200 }
		],
		"roster": [
			{ "district": "東京1区", "candidate": "山田太郎", "party": "自由民主党",
			  "incumbency": "現職", "engagement_score": 0.7, "news_mentions": 95 },
			{ "district": "東京1区", "candidate": "鈴木花子", "party": "立憲民主党",
			  "incumbency": "新人", "engagement_score": 0.4, "news_mentions": 40 },
			{ "district": "大阪3区", "candidate": "佐藤次郎", "party": "日本維新の会",
			  "incumbency": "現職", "engagement_score": 0.8, "news_mentions": 70 },
			{ "district": "大阪3区", "candidate": "田中三郎", "party": "自由民主党",
			  "incumbency": "前職", "engagement_score": 0.3, "news_mentions": 25 },
			{ "district": "愛知2区", "candidate": "高橋四郎", "party": "中道改革連合",
			  "incumbency": "元職", "engagement_score": 0.5, "news_mentions": 30 },
			{ "district": "愛知2区", "candidate": "伊藤五郎", "party": "無所属",
			  "incumbency": "新人", "engagement_score": 0.2, "news_mentions": 10 }
		],
		"district_history": [
			{ "district": "東京1区", "winner_party": "自由民主党", "margin": 0.18 },
			{ "district": "大阪3区", "winner_party": "日本維新の会", "margin": 0.22 }
		],
		"elections": [
			{ "name": "2021", "results": [
				{ "party": "自由民主党", "vote_share": 0.48, "seat_share": 0.65 },
				{ "party": "立憲民主党", "vote_share": 0.30, "seat_share": 0.22 },
				{ "party": "日本維新の会", "vote_share": 0.14, "seat_share": 0.09 },
				{ "party": "日本共産党", "vote_share": 0.08, "seat_share": 0.04 }
			] },
			{ "name": "2024", "results": [
				{ "party": "自由民主党", "vote_share": 0.40, "seat_share": 0.55 },
				{ "party": "立憲民主党", "vote_share": 0.35, "seat_share": 0.32 },
				{ "party": "日本維新の会", "vote_share": 0.25, "seat_share": 0.13 }
			] }
		]
	}))
	.unwrap()
}

#[test]
fn every_model_satisfies_the_chamber_invariants() {
	let outputs = run_all(&synthetic_bundle(), &Tuning::default()).unwrap();
	for (name, projection) in [
		("m1", &outputs.model1),
		("m2", &outputs.model2),
		("m3", &outputs.model3),
		("m4", &outputs.model4),
		("m5", &outputs.model5),
		("m6", &outputs.model6),
		("m7", &outputs.model7),
	] {
		assert_eq!(projection_total(projection), TOTAL_SEATS, "{name} total");
		assert_eq!(
			projection.values().map(|s| s.smd).sum::<Seats>(),
			SMD_SEATS,
			"{name} smd"
		);
		assert_eq!(
			projection.values().map(|s| s.pr).sum::<Seats>(),
			PR_SEATS,
			"{name} pr"
		);
		for (&party, split) in projection {
			assert_eq!(split.smd + split.pr, split.total, "{name} {party}");
			assert_ne!(party, Party::Independent, "{name} carries Independent");
		}
	}
}

#[test]
fn calibration_runs_when_history_is_present() {
	let outputs = run_all(&synthetic_bundle(), &Tuning::default()).unwrap();
	let calibration = outputs.calibration.expect("bundle has elections");
	assert!((1.5..=4.0).contains(&calibration.exponent));
	assert_eq!(calibration.per_election.len(), 2);
	assert!((outputs.exponent - calibration.exponent).abs() < 1e-12);
}

#[test]
fn district_calls_cover_the_roster() {
	let outputs = run_all(&synthetic_bundle(), &Tuning::default()).unwrap();
	assert_eq!(outputs.districts.len(), 3);
	for forecast in &outputs.districts {
		let p: f64 = forecast.candidates.iter().map(|c| c.probability).sum();
		assert!((p - 1.0).abs() < 1e-9, "{}", forecast.district);
		assert!((0.0..=1.0).contains(&forecast.confidence));
	}
	// The incumbent in a district his party carried by 18 points.
	let tokyo = outputs
		.districts
		.iter()
		.find(|d| d.district.prefecture == "東京")
		.unwrap();
	assert_eq!(tokyo.winner, "山田太郎");
}

#[test]
fn reruns_are_byte_identical() {
	let bundle = synthetic_bundle();
	let a = run_all(&bundle, &Tuning::default()).unwrap();
	let b = run_all(&bundle, &Tuning::default()).unwrap();
	let ja = serde_json::to_string(&seat_projector::report::SeatProjectionReport::build(&a)).unwrap();
	let jb = serde_json::to_string(&seat_projector::report::SeatProjectionReport::build(&b)).unwrap();
	assert_eq!(ja, jb);
}

#[test]
fn project_command_writes_both_artifacts() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let bundle_path = dir.path().join("bundle.json");
	std::fs::write(&bundle_path, serde_json::to_string(&synthetic_bundle())?)?;
	let out_dir = dir.path().join("results");

	let output = assert_cmd::Command::new(cargo_bin(env!("CARGO_PKG_NAME")))
		.args([
			"project",
			"--input",
			bundle_path.to_str().unwrap(),
			"--output-dir",
			out_dir.to_str().unwrap(),
		])
		.output()?;
	assert!(output.status.success());

	let seats: serde_json::Value =
		serde_json::from_slice(&std::fs::read(out_dir.join("seat_projections.json"))?)?;
	assert_eq!(seats["chamber"]["total"], 465);
	assert_eq!(seats["parties"].as_array().unwrap().len(), 10);

	let districts: serde_json::Value =
		serde_json::from_slice(&std::fs::read(out_dir.join("district_predictions.json"))?)?;
	assert_eq!(districts["districts"].as_array().unwrap().len(), 3);
	Ok(())
}

#[test]
fn districts_command_requires_a_roster() {
	let dir = tempfile::tempdir().unwrap();
	let bundle_path = dir.path().join("bundle.json");
	std::fs::write(&bundle_path, "{}").unwrap();

	let output = assert_cmd::Command::new(cargo_bin(env!("CARGO_PKG_NAME")))
		.args(["districts", "--input", bundle_path.to_str().unwrap()])
		.output()
		.unwrap();
	assert!(!output.status.success());
}

#[test]
fn cli_version_works() {
	let crate_name = env!("CARGO_PKG_NAME");
	let output = assert_cmd::Command::new(cargo_bin(crate_name))
		.arg("--version")
		.output()
		.unwrap();

	assert!(output.status.success(), "command returned with non-success exit code");
	let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();
	assert_eq!(version, format!("{} {}", crate_name, env!("CARGO_PKG_VERSION")));
}
