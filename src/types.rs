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

//! Core domain types: the closed party enumeration, districts, candidates
//! and seat triples.

use crate::{
	error::Error,
	prelude::{Seats, Share},
	sources::{PartyRef, RosterRecord},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Closed enumeration of parties known to the engine.
///
/// Every free-text party name resolves to exactly one variant; anything
/// unknown collapses into [`Party::Other`] so that all lookups are total.
/// The declaration order is the canonical iteration and tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Party {
	LiberalDemocratic,
	Ishin,
	ConstitutionalDemocratic,
	Komeito,
	DemocraticForThePeople,
	Communist,
	Reiwa,
	Sanseito,
	TeamMirai,
	Other,
	/// Candidate affiliation only; never a key of a national seat map.
	Independent,
}

impl Party {
	/// The projection universe: every party a seat map may contain.
	pub const ALL: [Party; 10] = [
		Party::LiberalDemocratic,
		Party::Ishin,
		Party::ConstitutionalDemocratic,
		Party::Komeito,
		Party::DemocraticForThePeople,
		Party::Communist,
		Party::Reiwa,
		Party::Sanseito,
		Party::TeamMirai,
		Party::Other,
	];

	/// Parties with a social-video presence. Komeito and Other carry no
	/// social signal and are handled as exogenous fixed allocations in the
	/// engagement models.
	pub const SOCIAL: [Party; 8] = [
		Party::LiberalDemocratic,
		Party::Ishin,
		Party::ConstitutionalDemocratic,
		Party::DemocraticForThePeople,
		Party::Communist,
		Party::Reiwa,
		Party::Sanseito,
		Party::TeamMirai,
	];

	pub fn name(&self) -> &'static str {
		match self {
			Party::LiberalDemocratic => "Liberal Democratic Party",
			Party::Ishin => "Ishin",
			Party::ConstitutionalDemocratic => "Constitutional Democratic Party",
			Party::Komeito => "Komeito",
			Party::DemocraticForThePeople => "Democratic Party for the People",
			Party::Communist => "Japanese Communist Party",
			Party::Reiwa => "Reiwa Shinsengumi",
			Party::Sanseito => "Sanseito",
			Party::TeamMirai => "Team Mirai",
			Party::Other => "Other",
			Party::Independent => "Independent",
		}
	}

	/// Total name resolution. Unknown names map to [`Party::Other`], never
	/// to a silent dictionary-miss default somewhere downstream.
	pub fn from_name(name: &str) -> Party {
		let name = name.trim();
		if let Some((party, _)) = alias_lookup(name) {
			return party;
		}
		match name {
			"自由民主党" | "自民党" | "Liberal Democratic Party" | "LDP" =>
				Party::LiberalDemocratic,
			"日本維新の会" | "維新" | "Ishin" | "Japan Innovation Party" => Party::Ishin,
			"立憲民主党" | "立憲" | "Constitutional Democratic Party" | "CDP" =>
				Party::ConstitutionalDemocratic,
			"公明党" | "Komeito" => Party::Komeito,
			"国民民主党" | "国民" | "Democratic Party for the People" | "DPP" =>
				Party::DemocraticForThePeople,
			"日本共産党" | "共産党" | "Japanese Communist Party" | "JCP" => Party::Communist,
			"れいわ新選組" | "れいわ" | "Reiwa Shinsengumi" | "Reiwa" => Party::Reiwa,
			"参政党" | "Sanseito" => Party::Sanseito,
			"チームみらい" | "Team Mirai" => Party::TeamMirai,
			"無所属" | "Independent" => Party::Independent,
			_ => Party::Other,
		}
	}
}

impl fmt::Display for Party {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Alias table for coalition names, consulted once at name-resolution time
/// rather than scattered through the models. Each alias resolves to a
/// primary lookup party (for signals keyed by party) and carries a fixed
/// historical split used when attributing alliance district wins to the
/// constituent parties.
const ALLIANCE_ALIASES: &[(&str, &[(Party, f64)])] = &[(
	"中道改革連合",
	&[(Party::ConstitutionalDemocratic, 0.7), (Party::DemocraticForThePeople, 0.3)],
), (
	"Centrist Reform Alliance",
	&[(Party::ConstitutionalDemocratic, 0.7), (Party::DemocraticForThePeople, 0.3)],
)];

fn alias_lookup(name: &str) -> Option<(Party, &'static [(Party, f64)])> {
	ALLIANCE_ALIASES
		.iter()
		.find(|(alias, _)| *alias == name)
		.map(|(_, split)| (split[0].0, *split))
}

/// The seat split of an alliance name among its constituent parties, if
/// `name` is a registered alliance alias.
pub fn alliance_split(name: &str) -> Option<&'static [(Party, f64)]> {
	alias_lookup(name.trim()).map(|(_, split)| split)
}

/// Incumbency classification from the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncumbencyClass {
	Incumbent,
	PriorOfficeholder,
	FormerOfficeholder,
	Newcomer,
	Unknown,
}

impl IncumbencyClass {
	pub fn from_label(label: &str) -> IncumbencyClass {
		match label.trim() {
			"現職" | "incumbent" => IncumbencyClass::Incumbent,
			"前職" | "prior" => IncumbencyClass::PriorOfficeholder,
			"元職" | "former" => IncumbencyClass::FormerOfficeholder,
			"新人" | "newcomer" => IncumbencyClass::Newcomer,
			_ => IncumbencyClass::Unknown,
		}
	}

	/// Categorical candidate-strength score. Incumbents carry name
	/// recognition and an established local base.
	pub fn strength(&self) -> f64 {
		match self {
			IncumbencyClass::Incumbent => 1.0,
			IncumbencyClass::PriorOfficeholder => 0.85,
			IncumbencyClass::FormerOfficeholder => 0.60,
			IncumbencyClass::Newcomer => 0.40,
			IncumbencyClass::Unknown => 0.30,
		}
	}
}

/// A single-member district: prefecture plus sequence number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DistrictId {
	pub prefecture: String,
	pub number: u32,
}

static DISTRICT_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^\s*(.+?)[\s-]*(\d+)\s*区?\s*$").expect("static regex is valid; qed"));

impl DistrictId {
	/// Parses identifiers like `東京5区`, `北海道1区` or `Tokyo-5`.
	pub fn parse(raw: &str) -> Result<DistrictId, Error> {
		let caps = DISTRICT_RE.captures(raw).ok_or_else(|| Error::InvalidDistrict(raw.into()))?;
		let prefecture = caps[1].trim().to_string();
		let number: u32 =
			caps[2].parse().map_err(|_| Error::InvalidDistrict(raw.into()))?;
		if prefecture.is_empty() || number == 0 {
			return Err(Error::InvalidDistrict(raw.into()));
		}
		Ok(DistrictId { prefecture, number })
	}
}

impl fmt::Display for DistrictId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.prefecture, self.number)
	}
}

/// A district candidate with the raw signals carried by the roster. The
/// six derived per-candidate signals are computed by the district model
/// once per projection run.
#[derive(Debug, Clone)]
pub struct Candidate {
	pub name: String,
	pub district: DistrictId,
	/// Raw affiliation as it appeared in the roster; needed to attribute
	/// alliance wins to constituent parties.
	pub party_name: String,
	/// Resolved lookup party for all signal maps.
	pub party: Party,
	pub incumbency: IncumbencyClass,
	pub age: Option<u32>,
	pub engagement: f64,
	pub news_mentions: u32,
}

impl Candidate {
	pub fn from_record(rec: &RosterRecord) -> Result<Candidate, Error> {
		let district = DistrictId::parse(&rec.district)?;
		Ok(Candidate {
			name: rec.candidate.clone(),
			district,
			party_name: rec.party.clone(),
			party: Party::from_name(&rec.party),
			incumbency: IncumbencyClass::from_label(&rec.incumbency),
			age: rec.age,
			engagement: rec.engagement_score.unwrap_or(0.0),
			news_mentions: rec.news_mentions.unwrap_or(0),
		})
	}
}

/// Per-party (smd, pr, total) seat triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSplit {
	pub smd: Seats,
	pub pr: Seats,
	pub total: Seats,
}

impl SeatSplit {
	pub fn new(smd: Seats, pr: Seats) -> SeatSplit {
		SeatSplit { smd, pr, total: smd + pr }
	}

	/// Splits a total by a historical small-district ratio.
	pub fn from_ratio(total: Seats, smd_ratio: f64) -> SeatSplit {
		let smd = ((total as f64) * smd_ratio).round() as Seats;
		let smd = smd.min(total);
		SeatSplit { smd, pr: total - smd, total }
	}
}

/// Immutable per-party reference data: polling baseline seats, historical
/// small-district ratio and small-district vote share. Read-only for the
/// whole run.
#[derive(Debug, Clone)]
pub struct PartyTable {
	refs: BTreeMap<Party, PartyRef>,
	/// Lookup vote share for independents in the district model.
	independent_vote_share: Share,
}

const DEFAULT_REFS: &[(Party, Seats, f64, f64)] = &[
	(Party::LiberalDemocratic, 210, 0.60, 0.38),
	(Party::Ishin, 95, 0.45, 0.25),
	(Party::ConstitutionalDemocratic, 60, 0.65, 0.30),
	(Party::Komeito, 24, 0.40, 0.15),
	(Party::DemocraticForThePeople, 30, 0.50, 0.22),
	(Party::Communist, 10, 0.10, 0.06),
	(Party::Reiwa, 10, 0.20, 0.08),
	(Party::Sanseito, 6, 0.10, 0.04),
	(Party::TeamMirai, 8, 0.15, 0.05),
	(Party::Other, 12, 0.90, 0.03),
];

impl Default for PartyTable {
	fn default() -> PartyTable {
		let refs = DEFAULT_REFS
			.iter()
			.map(|&(party, polling_baseline, smd_ratio, smd_vote_share)| {
				(party, PartyRef {
					party: party.name().to_string(),
					polling_baseline,
					smd_ratio,
					smd_vote_share,
				})
			})
			.collect();
		PartyTable { refs, independent_vote_share: 0.12 }
	}
}

impl PartyTable {
	/// Builds the table from the input bundle's reference rows, falling
	/// back to the built-in defaults for any party the rows omit.
	pub fn from_refs(rows: &[PartyRef]) -> PartyTable {
		let mut table = PartyTable::default();
		for row in rows {
			let party = Party::from_name(&row.party);
			if party == Party::Independent {
				table.independent_vote_share = row.smd_vote_share;
				continue;
			}
			table.refs.insert(party, row.clone());
		}
		table
	}

	pub fn baseline(&self, party: Party) -> Seats {
		self.refs.get(&party).map(|r| r.polling_baseline).unwrap_or(0)
	}

	pub fn smd_ratio(&self, party: Party) -> f64 {
		self.refs.get(&party).map(|r| r.smd_ratio).unwrap_or(0.5)
	}

	pub fn smd_vote_share(&self, party: Party) -> Share {
		match party {
			Party::Independent => self.independent_vote_share,
			_ => self.refs.get(&party).map(|r| r.smd_vote_share).unwrap_or(0.03),
		}
	}

	pub fn total_baseline(&self) -> Seats {
		Party::ALL.iter().map(|p| self.baseline(*p)).sum()
	}

	/// Static baseline distribution as shares summing to 1.
	pub fn baseline_shares(&self) -> crate::prelude::ShareMap {
		let total = self.total_baseline().max(1) as f64;
		Party::ALL.iter().map(|&p| (p, self.baseline(p) as f64 / total)).collect()
	}

	/// The baseline split of a party's seats per its historical ratio.
	pub fn baseline_split(&self, party: Party) -> SeatSplit {
		SeatSplit::from_ratio(self.baseline(party), self.smd_ratio(party))
	}
}
