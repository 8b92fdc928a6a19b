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

//! Per-party comment-sentiment composite.

use crate::{
	prelude::ShareMap,
	sources::{CommentRecord, VideoRecord},
	types::Party,
};
use std::collections::{BTreeMap, HashMap};

/// Mean continuous sentiment per party, in [-1, +1]. Comments are joined
/// to parties through their owning video. Parties with fewer than
/// `min_comments` scored comments are treated as neutral rather than
/// extrapolated from a tiny sample.
pub fn party_sentiment(
	videos: &[VideoRecord],
	comments: &[CommentRecord],
	min_comments: usize,
) -> ShareMap {
	let video_party: HashMap<&str, Party> = videos
		.iter()
		.filter_map(|v| {
			v.party.as_deref().map(|name| (v.video_id.as_str(), Party::from_name(name)))
		})
		.collect();

	let mut sums: BTreeMap<Party, (f64, usize)> = BTreeMap::new();
	for comment in comments {
		let Some(&party) = video_party.get(comment.video_id.as_str()) else { continue };
		let entry = sums.entry(party).or_insert((0.0, 0));
		entry.0 += comment.effective_score();
		entry.1 += 1;
	}

	Party::SOCIAL
		.iter()
		.map(|&party| {
			let score = match sums.get(&party) {
				Some(&(sum, count)) if count >= min_comments => sum / count as f64,
				_ => 0.0,
			};
			(party, score)
		})
		.collect()
}
