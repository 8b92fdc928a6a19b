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

//! Seat projection engine for the Japanese House of Representatives.
//!
//! The engine turns an already-collected bundle of campaign signals
//! (social-video engagement, comment sentiment, published polls, news
//! coverage and a district candidate roster) into seven seat projections
//! of increasing sophistication, from a pure engagement-share allocation
//! to a capacity-constrained per-district winner model. Data collection
//! and anything that happens after the written reports is out of scope.
//!
//! Projections are deterministic: the same bundle and tuning always
//! produce byte-identical reports.

pub mod apportion;
pub mod calibrate;
pub mod capacity;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod report;
pub mod signals;
pub mod sources;
pub mod types;
pub mod utils;
