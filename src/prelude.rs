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

//! Constants and type aliases that are assumed fixed across the whole
//! engine. Everything tunable lives in [`crate::config::Tuning`] instead.

use crate::types::{Party, SeatSplit};
use std::collections::BTreeMap;

/// Seats in the House of Representatives.
pub const TOTAL_SEATS: u32 = 465;
/// Single-member (small) district seats.
pub const SMD_SEATS: u32 = 289;
/// Proportional-representation seats.
pub const PR_SEATS: u32 = 176;

/// The logging target.
pub const LOG_TARGET: &str = "seat-projector";

/// Seat count type.
pub type Seats = u32;
/// A normalized share or score.
pub type Share = f64;

/// Party -> seat count. `BTreeMap` keyed by the closed [`Party`] enum so
/// iteration order is the declaration order, which several tie-breaks and
/// largest-remainder adjustments depend on.
pub type SeatMap = BTreeMap<Party, Seats>;
/// Party -> share/score map with the same deterministic iteration order.
pub type ShareMap = BTreeMap<Party, Share>;
/// Party -> (smd, pr, total) seat triple.
pub type Projection = BTreeMap<Party, SeatSplit>;
