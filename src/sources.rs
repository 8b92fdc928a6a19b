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

//! Data contracts for everything the engine consumes from upstream
//! collaborators. Collection of the raw data is out of scope; these types
//! only describe the boundary. The whole bundle is read from a single JSON
//! file.

use crate::prelude::Seats;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the party reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRef {
	pub party: String,
	/// Polling-baseline seat count.
	pub polling_baseline: Seats,
	/// Historical share of this party's seats won in small districts.
	pub smd_ratio: f64,
	/// Historical small-district vote share, used for swing calculation.
	pub smd_vote_share: f64,
}

/// Channel-lifetime aggregates for a party's social-video channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
	pub party: String,
	pub subscribers: u64,
	pub channel_views: u64,
}

/// A campaign-period video with its inferred party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
	pub video_id: String,
	/// Party inferred by the collector; videos without one are ignored.
	#[serde(default)]
	pub party: Option<String>,
	pub published_at: DateTime<Utc>,
	pub views: u64,
	pub likes: u64,
}

/// A scored comment joined to its owning video. Scoring free text is a
/// black box upstream; we only see the score and/or label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
	pub video_id: String,
	/// Continuous sentiment in [-1, +1].
	#[serde(default)]
	pub score: Option<f64>,
	/// Categorical fallback: "positive" / "negative" / "neutral".
	#[serde(default)]
	pub label: Option<String>,
}

impl CommentRecord {
	/// Continuous score, falling back to the categorical label.
	pub fn effective_score(&self) -> f64 {
		if let Some(score) = self.score {
			return score.clamp(-1.0, 1.0);
		}
		match self.label.as_deref() {
			Some("positive") => 1.0,
			Some("negative") => -1.0,
			_ => 0.0,
		}
	}
}

/// A news article with source credibility, tone and party mentions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
	pub source: String,
	pub credibility: f64,
	pub published_at: DateTime<Utc>,
	/// Tone in [-1, +1].
	pub tone: f64,
	pub page_views: u64,
	/// All parties mentioned by the article.
	#[serde(default)]
	pub parties: Vec<String>,
}

/// One poll observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollObservation {
	pub survey_date: NaiveDate,
	pub source: String,
	pub party: String,
	/// Support rate in percent.
	pub support_rate: f64,
	pub sample_size: u32,
}

impl PollObservation {
	/// "No party" rows are survey artifacts, not parties.
	pub fn is_party_row(&self) -> bool {
		!matches!(self.party.trim(), "支持なし" | "none" | "no party")
	}
}

/// One district candidate from the external roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRecord {
	pub district: String,
	pub candidate: String,
	pub party: String,
	/// Incumbency label: 現職 / 前職 / 元職 / 新人, or unknown.
	#[serde(default)]
	pub incumbency: String,
	#[serde(default)]
	pub age: Option<u32>,
	/// Per-candidate social engagement score in [0, 1].
	#[serde(default)]
	pub engagement_score: Option<f64>,
	#[serde(default)]
	pub news_mentions: Option<u32>,
}

/// The previous election's result in one district, used to derive
/// partisan lean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictHistory {
	pub district: String,
	pub winner_party: String,
	/// Winning margin as a vote-share fraction.
	pub margin: f64,
}

/// Per-party outcome of one historical election, for exponent calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPartyResult {
	pub party: String,
	pub vote_share: f64,
	pub seat_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalElection {
	pub name: String,
	pub results: Vec<HistoricalPartyResult>,
}

/// The full input bundle. Every section may be absent; each model degrades
/// to its named fallback rather than failing the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionInputs {
	/// Election day, the reference date for content recency. Defaults to
	/// the most recent observation across videos and articles.
	#[serde(default)]
	pub election_date: Option<NaiveDate>,
	#[serde(default)]
	pub parties: Vec<PartyRef>,
	#[serde(default)]
	pub channels: Vec<ChannelStats>,
	#[serde(default)]
	pub videos: Vec<VideoRecord>,
	#[serde(default)]
	pub comments: Vec<CommentRecord>,
	#[serde(default)]
	pub news_articles: Vec<NewsArticle>,
	#[serde(default)]
	pub polls: Vec<PollObservation>,
	#[serde(default)]
	pub roster: Vec<RosterRecord>,
	#[serde(default)]
	pub district_history: Vec<DistrictHistory>,
	#[serde(default)]
	pub elections: Vec<HistoricalElection>,
}

impl ProjectionInputs {
	/// Reference instant for content decay: election day if supplied,
	/// otherwise the newest timestamp observed in the bundle.
	pub fn content_reference(&self) -> Option<DateTime<Utc>> {
		if let Some(day) = self.election_date {
			return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
		}
		self.videos
			.iter()
			.map(|v| v.published_at)
			.chain(self.news_articles.iter().map(|a| a.published_at))
			.max()
	}
}
