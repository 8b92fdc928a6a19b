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

//! Tuning constants for every model. All of these are hand-tuned rather
//! than fit, so they are exposed as configuration with documented defaults
//! instead of being buried in the models. A partial JSON file can override
//! any subset.

use crate::{
	prelude::Seats,
	types::Party,
};
use serde::{Deserialize, Serialize};

/// Weights of the engagement composite's six metrics. Each metric is
/// min-max normalized against the maximum across parties before weighting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
	pub campaign_views: f64,
	pub campaign_likes: f64,
	pub subscribers: f64,
	pub channel_views: f64,
	pub avg_views: f64,
	pub growth_rate: f64,
}

impl Default for EngagementWeights {
	fn default() -> Self {
		Self {
			campaign_views: 0.35,
			campaign_likes: 0.15,
			subscribers: 0.15,
			channel_views: 0.10,
			avg_views: 0.10,
			growth_rate: 0.15,
		}
	}
}

/// Model 4 weights over the three per-signal models, summing to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleWeights {
	pub model1: f64,
	pub model2: f64,
	pub model3: f64,
}

impl Default for EnsembleWeights {
	fn default() -> Self {
		Self { model1: 0.20, model2: 0.25, model3: 0.55 }
	}
}

/// Model 6 weights: social ensemble vs news model, plus the anchor weight
/// pulling the blend back toward the static polling baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinedWeights {
	pub model4: f64,
	pub model5: f64,
	/// Share of the final blend taken from the polling baseline.
	pub anchor: f64,
}

impl Default for CombinedWeights {
	fn default() -> Self {
		Self { model4: 0.45, model5: 0.55, anchor: 0.30 }
	}
}

/// Model 5 weights. `tone` is applied as a multiplicative adjustment of
/// `1 + tone_score * tone * 2` on top of the additive blend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsWeights {
	pub polling: f64,
	pub coverage: f64,
	pub media: f64,
	pub tone: f64,
}

impl Default for NewsWeights {
	fn default() -> Self {
		Self { polling: 0.55, coverage: 0.25, media: 0.20, tone: 0.15 }
	}
}

/// Weights of the six per-candidate signals in the district model, plus
/// the softmax and confidence constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictWeights {
	pub partisan_lean: f64,
	pub polling_swing: f64,
	pub candidate_strength: f64,
	pub incumbency_bonus_weight: f64,
	pub engagement: f64,
	pub news_mentions: f64,
	/// Flat bonus granted to sitting incumbents before weighting.
	pub incumbency_bonus: f64,
	pub softmax_temperature: f64,
	pub confidence_denominator: f64,
}

impl Default for DistrictWeights {
	fn default() -> Self {
		Self {
			partisan_lean: 0.30,
			polling_swing: 0.15,
			candidate_strength: 0.25,
			incumbency_bonus_weight: 0.05,
			engagement: 0.10,
			news_mentions: 0.15,
			incumbency_bonus: 1.0,
			softmax_temperature: 0.35,
			confidence_denominator: 0.20,
		}
	}
}

/// A party with no social signal whose engagement-model allocation is
/// fixed, split by a configured small-district ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExogenousParty {
	pub party: Party,
	pub seats: Seats,
	pub smd_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
	/// Power-law exponent for district allocation; overridden by
	/// calibration when the bundle carries election history.
	pub cube_exponent: f64,
	/// Maximum multiplicative sentiment adjustment (±30%).
	pub sentiment_weight: f64,
	/// Parties with fewer comments than this are treated as neutral.
	pub min_comments: usize,
	/// Model 3 polling weight.
	pub poll_weight: f64,
	/// Model 3 engagement weight.
	pub engagement_weight: f64,
	/// Clamp on the engagement-minus-polling momentum term.
	pub momentum_clamp: f64,
	/// Half-life in days for video/article recency weighting.
	pub content_half_life_days: f64,
	/// Half-life in days for poll recency weighting.
	pub poll_half_life_days: f64,
	/// Reference sample size for the sqrt(sample) poll weight.
	pub poll_reference_sample: f64,
	pub engagement_weights: EngagementWeights,
	pub ensemble: EnsembleWeights,
	pub combined: CombinedWeights,
	pub news: NewsWeights,
	pub district: DistrictWeights,
	pub exogenous: Vec<ExogenousParty>,
	/// Calibration grid for the power-law exponent.
	pub calibration_min: f64,
	pub calibration_max: f64,
	pub calibration_step: f64,
}

impl Default for Tuning {
	fn default() -> Self {
		Self {
			cube_exponent: 2.5,
			sentiment_weight: 0.30,
			min_comments: 3,
			poll_weight: 0.70,
			engagement_weight: 0.30,
			momentum_clamp: 0.15,
			content_half_life_days: 14.0,
			poll_half_life_days: 10.0,
			poll_reference_sample: 1500.0,
			engagement_weights: EngagementWeights::default(),
			ensemble: EnsembleWeights::default(),
			combined: CombinedWeights::default(),
			news: NewsWeights::default(),
			district: DistrictWeights::default(),
			exogenous: vec![
				ExogenousParty { party: Party::Komeito, seats: 24, smd_ratio: 0.40 },
				ExogenousParty { party: Party::Other, seats: 10, smd_ratio: 0.90 },
			],
			calibration_min: 1.5,
			calibration_max: 4.0,
			calibration_step: 0.1,
		}
	}
}
