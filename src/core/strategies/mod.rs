pub mod balanced_partition;
pub mod greedy_heap;
pub mod min_max_flow;
pub mod simple_greedy;

pub use balanced_partition::BalancedPartition;
pub use greedy_heap::GreedyHeap;
pub use min_max_flow::MinMaxFlow;
pub use simple_greedy::SimpleGreedy;

use crate::core::constants::{EPSILON, round2};
use crate::core::errors::SettlementError;
use crate::core::models::{party::Party, settlement::Transaction};
use std::fmt;
use std::sync::Arc;

/// A settlement-generation algorithm. Implementations work on their own copy
/// of the parties and never touch the caller's slice.
pub trait SettlementStrategy: Send + Sync + fmt::Debug {
    /// Produces the payments that settle `parties`.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::StrategyFailed`] when an internal invariant
    /// is violated.
    fn settle(&self, parties: &[Party]) -> Result<Vec<Transaction>, SettlementError>;

    /// Label reported in `optimization_info.algorithm`.
    fn name(&self) -> &'static str;
}

/// The primary strategies in selection priority order.
pub fn primary_strategies() -> Vec<Arc<dyn SettlementStrategy>> {
    vec![
        Arc::new(GreedyHeap::new()),
        Arc::new(MinMaxFlow::new()),
        Arc::new(BalancedPartition::new()),
    ]
}

/// Private copy with every balance at currency precision.
pub(crate) fn working_copy(strategy: &str, parties: &[Party]) -> Result<Vec<Party>, SettlementError> {
    parties
        .iter()
        .map(|p| {
            let balance = round2(p.balance);
            if !balance.is_finite() {
                return Err(SettlementError::strategy_failed(
                    strategy,
                    format!("balance of party {} is not finite", p.id),
                ));
            }
            Ok(Party::new(p.id, p.name.clone(), balance))
        })
        .collect()
}

/// Moves `min(creditor, -debtor)` from the debtor to the creditor.
///
/// Returns `None` when the amount would not exceed the tolerance.
pub(crate) fn settle_pair(debtor: &mut Party, creditor: &mut Party) -> Option<Transaction> {
    let amount = round2(creditor.balance.min(-debtor.balance));
    if amount <= EPSILON {
        return None;
    }
    creditor.balance = round2(creditor.balance - amount);
    debtor.balance = round2(debtor.balance + amount);
    Some(Transaction {
        from: debtor.id,
        to: creditor.id,
        from_name: debtor.name.clone(),
        to_name: creditor.name.clone(),
        amount,
    })
}

/// Every step zeroes at least one party, so a run never needs more steps
/// than there are parties.
pub(crate) fn check_step_budget(strategy: &str, steps: usize, parties: usize) -> Result<(), SettlementError> {
    if steps > parties {
        return Err(SettlementError::strategy_failed(
            strategy,
            format!("step {} exceeds the budget of {} steps", steps, parties),
        ));
    }
    Ok(())
}
