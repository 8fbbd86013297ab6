use crate::core::constants::{round1, round2};
use crate::core::models::{
    party::{Party, PartyId},
    settlement::{OptimizationInfo, Transaction},
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Packages the statistics reported next to a settlement plan.
pub fn report(
    parties: &[Party],
    settlements: &[Transaction],
    algorithm: impl Into<String>,
    elapsed: Duration,
) -> OptimizationInfo {
    OptimizationInfo {
        algorithm: algorithm.into(),
        computation_time: computation_time_ms(elapsed),
        efficiency_percentage: efficiency_percentage(parties.len(), settlements.len()),
        total_amount: total_amount(parties),
        transactions_reduced: transactions_reduced(parties.len(), settlements.len()),
    }
}

pub fn computation_time_ms(elapsed: Duration) -> f64 {
    round2(elapsed.as_secs_f64() * 1000.0)
}

/// Sum of what creditors are owed before settlement.
pub fn total_amount(parties: &[Party]) -> f64 {
    round2(parties.iter().filter(|p| p.balance > 0.0).map(|p| p.balance).sum())
}

pub fn transactions_reduced(party_count: usize, settlement_count: usize) -> usize {
    party_count.saturating_sub(settlement_count)
}

/// Reduction against one payment per party, 100 when nobody owes anything.
pub fn efficiency_percentage(party_count: usize, settlement_count: usize) -> f64 {
    if party_count == 0 {
        return 100.0;
    }
    let ratio = settlement_count as f64 / party_count as f64;
    round1(((1.0 - ratio) * 100.0).max(0.0))
}

/// Balances left after applying `settlements`, keyed by party id.
pub fn remaining_balances(parties: &[Party], settlements: &[Transaction]) -> BTreeMap<PartyId, f64> {
    let mut remaining: BTreeMap<PartyId, f64> = parties.iter().map(|p| (p.id, p.balance)).collect();
    for tx in settlements {
        *remaining.entry(tx.from).or_insert(0.0) += tx.amount;
        *remaining.entry(tx.to).or_insert(0.0) -= tx.amount;
    }
    remaining.into_iter().map(|(id, b)| (id, round2(b))).collect()
}

/// Total absolute balance the plan leaves unsettled.
pub fn residual(parties: &[Party], settlements: &[Transaction]) -> f64 {
    round2(remaining_balances(parties, settlements).values().map(|b| b.abs()).sum())
}
