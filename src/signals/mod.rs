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

//! Signal normalizers: each converts one raw signal family into
//! comparable per-party shares. Every map produced here is a fresh value;
//! nothing is mutated in place across model invocations.

pub mod decay;
pub mod engagement;
pub mod news;
pub mod polling;
pub mod sentiment;

use crate::prelude::ShareMap;

/// Converts raw scores to shares summing to 1. An all-zero map becomes a
/// uniform distribution so downstream allocation stays total.
pub fn scores_to_shares(scores: &ShareMap) -> ShareMap {
	let total: f64 = scores.values().sum();
	if total <= 0.0 {
		let n = scores.len().max(1) as f64;
		return scores.keys().map(|&p| (p, 1.0 / n)).collect();
	}
	scores.iter().map(|(&p, &v)| (p, v / total)).collect()
}
