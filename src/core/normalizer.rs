use crate::core::constants::{EPSILON, round2};
use crate::core::models::{
    member::Member,
    party::{Party, PartyId},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    InvalidId,
    InvalidAmount,
}

/// A balance entry that could not be parsed and was left out.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DroppedEntry {
    pub key: String,
    pub reason: DropReason,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedBalances {
    /// Sorted by id.
    pub parties: Vec<Party>,
    pub dropped: Vec<DroppedEntry>,
}

impl NormalizedBalances {
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

/// Builds the canonical party list from a raw balance map and a roster.
///
/// Unparseable keys or values, and totals too large to hold at cent
/// precision, are dropped and reported in `dropped`. Ids that
/// collide after parsing (`"1"` and `"01"`) are summed into one party. Parties
/// whose rounded balance is within [`EPSILON`] of zero are excluded.
pub fn normalize(balances: &Map<String, Value>, members: &[Member]) -> NormalizedBalances {
    let roster = build_roster(members);
    let mut totals: BTreeMap<PartyId, f64> = BTreeMap::new();
    let mut dropped = Vec::new();

    for (key, value) in balances {
        match parse_entry(key, value) {
            Ok((id, amount)) => *totals.entry(id).or_insert(0.0) += amount,
            Err(reason) => dropped.push(DroppedEntry {
                key: key.clone(),
                reason,
            }),
        }
    }

    let mut parties = Vec::new();
    for (id, total) in totals {
        let balance = round2(total);
        // Magnitudes past ~1.8e306 overflow at cent precision.
        if !balance.is_finite() {
            dropped.push(DroppedEntry {
                key: id.to_string(),
                reason: DropReason::InvalidAmount,
            });
            continue;
        }
        if balance.abs() <= EPSILON {
            continue;
        }
        let name = roster
            .get(&id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("User_{}", id));
        parties.push(Party::new(id, name, balance));
    }

    if !dropped.is_empty() {
        warn!("Dropped {} malformed balance entries", dropped.len());
    }

    debug!("Normalized {} parties with outstanding balances", parties.len());
    NormalizedBalances { parties, dropped }
}

/// Parses one balance-map entry into an id and a finite amount.
pub fn parse_entry(key: &str, value: &Value) -> Result<(PartyId, f64), DropReason> {
    let id = parse_id_str(key).ok_or(DropReason::InvalidId)?;
    let amount = parse_amount(value).ok_or(DropReason::InvalidAmount)?;
    Ok((id, amount))
}

/// Accepts integers, integral floats and numeric strings.
pub fn parse_party_id(value: &Value) -> Option<PartyId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_to_id)),
        Value::String(s) => parse_id_str(s),
        _ => None,
    }
}

pub fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

fn parse_id_str(raw: &str) -> Option<PartyId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral_to_id))
}

fn integral_to_id(value: f64) -> Option<PartyId> {
    let in_range = value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64;
    in_range.then_some(value as i64)
}

fn build_roster(members: &[Member]) -> HashMap<PartyId, &str> {
    let mut roster = HashMap::new();
    for member in members {
        let (Some(id), Some(label)) = (parse_party_id(&member.id), member.label()) else {
            continue;
        };
        roster.entry(id).or_insert(label);
    }
    roster
}
