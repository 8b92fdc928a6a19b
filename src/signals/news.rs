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

//! News-coverage signals: per-party coverage intensity, tone and mention
//! share, derived from scored articles.

use crate::{
	prelude::ShareMap,
	signals::decay::{age_in_days, recency_weight},
	sources::NewsArticle,
	types::Party,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Per-party news aggregates. `coverage` is normalized so the most-covered
/// party sits at 1.0; `tone` is a weighted mean in [-1, +1]; `mention_share`
/// sums to 1 over observed parties. Parties never mentioned are absent from
/// `observed` and score 0 everywhere.
#[derive(Debug, Clone, Default)]
pub struct NewsSignals {
	pub coverage: ShareMap,
	pub tone: ShareMap,
	pub mention_share: ShareMap,
	pub observed: BTreeSet<Party>,
}

/// Aggregates articles into [`NewsSignals`]. Each mention contributes
/// `page_views * recency * credibility / max_credibility` to coverage, and
/// the same weight carries the article's tone into the per-party tone mean.
pub fn aggregate(
	articles: &[NewsArticle],
	reference: Option<DateTime<Utc>>,
	half_life_days: f64,
) -> NewsSignals {
	let max_credibility = articles
		.iter()
		.map(|a| a.credibility)
		.fold(0.0_f64, f64::max);
	if max_credibility <= 0.0 {
		return NewsSignals::default();
	}

	let mut coverage: BTreeMap<Party, f64> = BTreeMap::new();
	let mut tone_sums: BTreeMap<Party, (f64, f64)> = BTreeMap::new();
	let mut mentions: BTreeMap<Party, f64> = BTreeMap::new();

	for article in articles {
		let recency = match reference {
			Some(at) => recency_weight(age_in_days(at, article.published_at), half_life_days),
			None => 1.0,
		};
		let weight = article.page_views as f64 * recency * article.credibility / max_credibility;
		for name in &article.parties {
			let party = Party::from_name(name);
			if !Party::ALL.contains(&party) {
				continue;
			}
			*coverage.entry(party).or_default() += weight;
			let entry = tone_sums.entry(party).or_insert((0.0, 0.0));
			entry.0 += weight * article.tone;
			entry.1 += weight;
			*mentions.entry(party).or_default() += 1.0;
		}
	}

	let observed: BTreeSet<Party> = coverage.keys().copied().collect();
	let max_coverage = coverage.values().fold(0.0_f64, |acc, &v| acc.max(v));
	let total_mentions: f64 = mentions.values().sum();

	let mut out = NewsSignals { observed, ..Default::default() };
	for &party in &Party::ALL {
		let cov = coverage.get(&party).copied().unwrap_or(0.0);
		out.coverage.insert(
			party,
			if max_coverage > 0.0 { cov / max_coverage } else { 0.0 },
		);
		let tone = match tone_sums.get(&party) {
			Some(&(sum, w)) if w > 0.0 => sum / w,
			_ => 0.0,
		};
		out.tone.insert(party, tone);
		let share = mentions.get(&party).copied().unwrap_or(0.0);
		out.mention_share.insert(
			party,
			if total_mentions > 0.0 { share / total_mentions } else { 0.0 },
		);
	}
	out
}
