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

//! Exponential time-decay weighting shared by all recency-sensitive
//! signals.

use chrono::{DateTime, Utc};
use std::f64::consts::LN_2;

/// `exp(-ln2 * age_days / half_life)`: weight 1.0 at the reference
/// instant, halving every `half_life_days`. Records from after the
/// reference are treated as current rather than up-weighted.
pub fn recency_weight(age_days: f64, half_life_days: f64) -> f64 {
	if half_life_days <= 0.0 {
		return 1.0;
	}
	(-LN_2 * age_days.max(0.0) / half_life_days).exp()
}

/// Fractional days between a record and the reference instant.
pub fn age_in_days(reference: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
	(reference - at).num_seconds() as f64 / 86_400.0
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn weight_halves_at_half_life() {
		assert!((recency_weight(0.0, 14.0) - 1.0).abs() < 1e-12);
		assert!((recency_weight(14.0, 14.0) - 0.5).abs() < 1e-12);
		assert!((recency_weight(28.0, 14.0) - 0.25).abs() < 1e-12);
	}

	#[test]
	fn future_records_are_not_upweighted() {
		assert!((recency_weight(-3.0, 14.0) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn age_is_fractional_days() {
		let reference = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
		let at = Utc.with_ymd_and_hms(2026, 2, 6, 12, 0, 0).unwrap();
		assert!((age_in_days(reference, at) - 1.5).abs() < 1e-9);
	}
}
