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

//! Composite social-video engagement score per party.

use crate::{
	config::Tuning,
	prelude::ShareMap,
	signals::decay::{age_in_days, recency_weight},
	sources::{ChannelStats, VideoRecord},
	types::Party,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct Metrics {
	subscribers: f64,
	channel_views: f64,
	campaign_views: f64,
	campaign_likes: f64,
	avg_views: f64,
	growth_rate: f64,
}

/// Weighted composite of six per-party metrics, each min-max normalized
/// against the maximum across parties. Campaign views/likes are recency
/// weighted; the growth rate compares decayed late-window attention to the
/// early window. A party with no channel data scores 0.
pub fn composite_scores(
	channels: &[ChannelStats],
	videos: &[VideoRecord],
	reference: Option<DateTime<Utc>>,
	tuning: &Tuning,
) -> ShareMap {
	let mut metrics: BTreeMap<Party, Metrics> = BTreeMap::new();

	for ch in channels {
		let party = Party::from_name(&ch.party);
		if !Party::SOCIAL.contains(&party) {
			continue;
		}
		let entry = metrics.entry(party).or_default();
		entry.subscribers += ch.subscribers as f64;
		entry.channel_views += ch.channel_views as f64;
	}

	// Campaign-window aggregates from the video list.
	let window = campaign_window(videos);
	for video in videos {
		let Some(party_name) = &video.party else { continue };
		let party = Party::from_name(party_name);
		let Some(entry) = metrics.get_mut(&party) else { continue };

		let weight = match reference {
			Some(at) =>
				recency_weight(age_in_days(at, video.published_at), tuning.content_half_life_days),
			None => 1.0,
		};
		let attention = (video.views + video.likes) as f64 * weight;
		entry.campaign_views += video.views as f64 * weight;
		entry.campaign_likes += video.likes as f64 * weight;

		if let Some((start, end)) = window {
			let midpoint = start + (end - start) / 2;
			if video.published_at >= midpoint {
				// growth_rate temporarily accumulates late attention and
				// avg_views the early attention; both resolved below.
				entry.growth_rate += attention;
			} else {
				entry.avg_views += attention;
			}
		}
	}

	// Resolve the two accumulators into their final meanings.
	let mut per_party_counts: BTreeMap<Party, usize> = BTreeMap::new();
	for video in videos {
		if let Some(party_name) = &video.party {
			*per_party_counts.entry(Party::from_name(party_name)).or_default() += 1;
		}
	}
	for (party, entry) in metrics.iter_mut() {
		let late = entry.growth_rate;
		let early = entry.avg_views;
		// Smoothed ratio of late-window to early-window attention.
		entry.growth_rate = (late + 1.0) / (early + 1.0);
		let count = per_party_counts.get(party).copied().unwrap_or(0);
		entry.avg_views =
			if count > 0 { entry.campaign_views / count as f64 } else { 0.0 };
	}

	let max = fold_max(&metrics);
	let weights = &tuning.engagement_weights;
	let mut out = ShareMap::new();
	for &party in &Party::SOCIAL {
		let score = match metrics.get(&party) {
			Some(m) => {
				weights.subscribers * norm(m.subscribers, max.subscribers) +
					weights.channel_views * norm(m.channel_views, max.channel_views) +
					weights.campaign_views * norm(m.campaign_views, max.campaign_views) +
					weights.campaign_likes * norm(m.campaign_likes, max.campaign_likes) +
					weights.avg_views * norm(m.avg_views, max.avg_views) +
					weights.growth_rate * norm(m.growth_rate, max.growth_rate)
			},
			None => 0.0,
		};
		out.insert(party, score);
	}
	out
}

fn campaign_window(videos: &[VideoRecord]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
	let start = videos.iter().map(|v| v.published_at).min()?;
	let end = videos.iter().map(|v| v.published_at).max()?;
	(start < end).then_some((start, end))
}

fn norm(value: f64, max: f64) -> f64 {
	if max > 0.0 { value / max } else { 0.0 }
}

fn fold_max(metrics: &BTreeMap<Party, Metrics>) -> Metrics {
	let mut max = Metrics::default();
	for m in metrics.values() {
		max.subscribers = max.subscribers.max(m.subscribers);
		max.channel_views = max.channel_views.max(m.channel_views);
		max.campaign_views = max.campaign_views.max(m.campaign_views);
		max.campaign_likes = max.campaign_likes.max(m.campaign_likes);
		max.avg_views = max.avg_views.max(m.avg_views);
		max.growth_rate = max.growth_rate.max(m.growth_rate);
	}
	max
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn channel(party: &str, subscribers: u64, channel_views: u64) -> ChannelStats {
		ChannelStats { party: party.into(), subscribers, channel_views }
	}

	fn video(party: &str, day: u32, views: u64, likes: u64) -> VideoRecord {
		VideoRecord {
			video_id: format!("v-{party}-{day}-{views}"),
			party: Some(party.into()),
			published_at: Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap(),
			views,
			likes,
		}
	}

	#[test]
	fn party_without_channel_data_scores_zero() {
		let channels = vec![channel("自由民主党", 500_000, 80_000_000)];
		let videos = vec![video("自由民主党", 10, 100_000, 4_000)];
		let scores = composite_scores(&channels, &videos, None, &Tuning::default());
		assert!(scores[&Party::LiberalDemocratic] > 0.0);
		assert_eq!(scores[&Party::Reiwa], 0.0);
	}

	#[test]
	fn dominant_party_scores_highest() {
		let channels = vec![
			channel("自由民主党", 500_000, 80_000_000),
			channel("れいわ新選組", 400_000, 30_000_000),
		];
		let videos = vec![
			video("自由民主党", 5, 300_000, 9_000),
			video("自由民主党", 20, 500_000, 20_000),
			video("れいわ新選組", 5, 100_000, 8_000),
			video("れいわ新選組", 20, 90_000, 7_000),
		];
		let reference = Some(Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap());
		let scores = composite_scores(&channels, &videos, reference, &Tuning::default());
		assert!(scores[&Party::LiberalDemocratic] > scores[&Party::Reiwa]);
		// Composite weights sum to 1, so a score never exceeds 1.
		assert!(scores.values().all(|s| (0.0..=1.0).contains(s)));
	}

	#[test]
	fn recency_weighting_rewards_late_attention() {
		let channels = vec![
			channel("自由民主党", 100, 100),
			channel("日本維新の会", 100, 100),
		];
		// Same raw attention, but Ishin's videos are closer to election day.
		let videos = vec![
			video("自由民主党", 2, 100_000, 1_000),
			video("日本維新の会", 30, 100_000, 1_000),
		];
		let reference = Some(Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap());
		let scores = composite_scores(&channels, &videos, reference, &Tuning::default());
		assert!(scores[&Party::Ishin] > scores[&Party::LiberalDemocratic]);
	}
}
