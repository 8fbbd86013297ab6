use super::{SettlementStrategy, check_step_budget, working_copy};
use crate::core::constants::{EPSILON, round2};
use crate::core::errors::SettlementError;
use crate::core::models::{party::Party, settlement::Transaction};

/// Exhaustive pair search: each step settles the creditor/debtor pair that
/// moves the largest amount.
///
/// O(n²) per step and O(n³) overall. Ties go to the first pair encountered,
/// scanning the working list ordered by absolute balance (largest first).
#[derive(Debug, Clone, Default)]
pub struct BalancedPartition;

impl BalancedPartition {
    pub fn new() -> Self {
        Self
    }
}

/// Indices into the working list plus the amount the pair would settle.
struct BestPair {
    debtor: usize,
    creditor: usize,
    amount: f64,
}

fn find_best_pair(remaining: &[Party]) -> Option<BestPair> {
    let mut best: Option<BestPair> = None;
    for (i, p1) in remaining.iter().enumerate() {
        for (j, p2) in remaining.iter().enumerate().skip(i + 1) {
            let compatible =
                (p1.balance > 0.0 && p2.balance < 0.0) || (p1.balance < 0.0 && p2.balance > 0.0);
            if !compatible {
                continue;
            }
            let amount = round2(p1.balance.abs().min(p2.balance.abs()));
            if amount > best.as_ref().map_or(0.0, |b| b.amount) {
                let (debtor, creditor) = if p1.balance > 0.0 { (j, i) } else { (i, j) };
                best = Some(BestPair {
                    debtor,
                    creditor,
                    amount,
                });
            }
        }
    }
    best
}

impl SettlementStrategy for BalancedPartition {
    fn settle(&self, parties: &[Party]) -> Result<Vec<Transaction>, SettlementError> {
        let mut remaining: Vec<Party> = working_copy(self.name(), parties)?
            .into_iter()
            .filter(|p| !p.is_settled())
            .collect();
        remaining.sort_by(|a, b| b.balance.abs().total_cmp(&a.balance.abs()));

        let budget = remaining.len();
        let mut settlements = Vec::new();
        let mut steps = 0;
        while remaining.len() > 1 {
            let Some(best) = find_best_pair(&remaining) else {
                break;
            };
            steps += 1;
            check_step_budget(self.name(), steps, budget)?;
            if best.amount <= EPSILON {
                return Err(SettlementError::strategy_failed(
                    self.name(),
                    format!("selected a non-positive amount {}", best.amount),
                ));
            }

            let debtor = &remaining[best.debtor];
            let creditor = &remaining[best.creditor];
            settlements.push(Transaction {
                from: debtor.id,
                to: creditor.id,
                from_name: debtor.name.clone(),
                to_name: creditor.name.clone(),
                amount: best.amount,
            });

            remaining[best.debtor].balance = round2(remaining[best.debtor].balance + best.amount);
            remaining[best.creditor].balance = round2(remaining[best.creditor].balance - best.amount);
            remaining.retain(|p| !p.is_settled());
        }

        Ok(settlements)
    }

    fn name(&self) -> &'static str {
        "Balanced Partition"
    }
}
