use super::{SettlementStrategy, check_step_budget, settle_pair, working_copy};
use crate::core::errors::SettlementError;
use crate::core::models::{party::Party, settlement::Transaction};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Largest creditor against largest debtor, re-ranked after every payment.
#[derive(Debug, Clone, Default)]
pub struct GreedyHeap;

impl GreedyHeap {
    pub fn new() -> Self {
        Self
    }
}

/// Heap key: outstanding magnitude in cents, then earliest position.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    cents: i64,
    position: Reverse<usize>,
}

impl Ranked {
    fn of(position: usize, party: &Party) -> Self {
        Ranked {
            cents: (party.balance.abs() * 100.0).round() as i64,
            position: Reverse(position),
        }
    }
}

impl SettlementStrategy for GreedyHeap {
    fn settle(&self, parties: &[Party]) -> Result<Vec<Transaction>, SettlementError> {
        let mut working = working_copy(self.name(), parties)?;
        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();

        for (position, party) in working.iter().enumerate() {
            if party.is_creditor() {
                creditors.push(Ranked::of(position, party));
            } else if party.is_debtor() {
                debtors.push(Ranked::of(position, party));
            }
        }

        let mut settlements = Vec::new();
        let mut steps = 0;
        while let (Some(top_creditor), Some(top_debtor)) = (creditors.pop(), debtors.pop()) {
            steps += 1;
            check_step_budget(self.name(), steps, working.len())?;

            let (c, d) = (top_creditor.position.0, top_debtor.position.0);
            let mut creditor = working[c].clone();
            let mut debtor = working[d].clone();
            let tx = settle_pair(&mut debtor, &mut creditor).ok_or_else(|| {
                SettlementError::strategy_failed(self.name(), "paired parties settled nothing")
            })?;
            settlements.push(tx);

            if creditor.is_creditor() {
                creditors.push(Ranked::of(c, &creditor));
            }
            if debtor.is_debtor() {
                debtors.push(Ranked::of(d, &debtor));
            }
            working[c] = creditor;
            working[d] = debtor;
        }

        Ok(settlements)
    }

    fn name(&self) -> &'static str {
        "Greedy Heap"
    }
}
