use super::{SettlementStrategy, settle_pair, working_copy};
use crate::core::errors::SettlementError;
use crate::core::models::{party::Party, settlement::Transaction};

/// Sorts both sides once, then sweeps them with two pointers.
///
/// Cheaper than [`GreedyHeap`](super::GreedyHeap) but remaining balances are
/// never re-ranked, so the transaction count can differ.
#[derive(Debug, Clone, Default)]
pub struct MinMaxFlow;

impl MinMaxFlow {
    pub fn new() -> Self {
        Self
    }
}

impl SettlementStrategy for MinMaxFlow {
    fn settle(&self, parties: &[Party]) -> Result<Vec<Transaction>, SettlementError> {
        let (mut creditors, mut debtors): (Vec<Party>, Vec<Party>) = working_copy(self.name(), parties)?
            .into_iter()
            .filter(|p| !p.is_settled())
            .partition(Party::is_creditor);

        creditors.sort_by(|a, b| b.balance.total_cmp(&a.balance));
        debtors.sort_by(|a, b| a.balance.total_cmp(&b.balance));

        let mut settlements = Vec::new();
        let (mut i, mut j) = (0, 0);
        while let (Some(creditor), Some(debtor)) = (creditors.get_mut(i), debtors.get_mut(j)) {
            let tx = settle_pair(debtor, creditor).ok_or_else(|| {
                SettlementError::strategy_failed(self.name(), "paired parties settled nothing")
            })?;
            settlements.push(tx);
            if !creditor.is_creditor() {
                i += 1;
            }
            if !debtor.is_debtor() {
                j += 1;
            }
        }

        Ok(settlements)
    }

    fn name(&self) -> &'static str {
        "Min-Max Flow"
    }
}
