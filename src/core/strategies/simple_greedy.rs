use super::SettlementStrategy;
use crate::core::constants::{EPSILON, round2};
use crate::core::errors::SettlementError;
use crate::core::models::{party::Party, settlement::Transaction};

/// Unsorted two-pointer sweep in input order.
///
/// Only runs when every primary strategy failed, so it shares no helpers with
/// them.
#[derive(Debug, Clone, Default)]
pub struct SimpleGreedy;

impl SimpleGreedy {
    pub fn new() -> Self {
        Self
    }
}

impl SettlementStrategy for SimpleGreedy {
    fn settle(&self, parties: &[Party]) -> Result<Vec<Transaction>, SettlementError> {
        let mut creditors: Vec<(i64, &str, f64)> = Vec::new();
        let mut debtors: Vec<(i64, &str, f64)> = Vec::new();
        for party in parties {
            let balance = round2(party.balance);
            if !balance.is_finite() {
                return Err(SettlementError::strategy_failed(
                    self.name(),
                    format!("balance of party {} is not finite", party.id),
                ));
            }
            if balance > EPSILON {
                creditors.push((party.id, party.name.as_str(), balance));
            } else if balance < -EPSILON {
                debtors.push((party.id, party.name.as_str(), -balance));
            }
        }

        let mut settlements = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < creditors.len() && j < debtors.len() {
            let (creditor_id, creditor_name, credit) = creditors[i];
            let (debtor_id, debtor_name, debt) = debtors[j];
            let amount = round2(credit.min(debt));

            // Unreachable while both heads are finite and above the tolerance.
            if !amount.is_finite() || amount <= EPSILON {
                return Err(SettlementError::strategy_failed(
                    self.name(),
                    format!("no progress settling {} to {}", debtor_id, creditor_id),
                ));
            }
            settlements.push(Transaction {
                from: debtor_id,
                to: creditor_id,
                from_name: debtor_name.to_string(),
                to_name: creditor_name.to_string(),
                amount,
            });

            creditors[i].2 = round2(credit - amount);
            debtors[j].2 = round2(debt - amount);

            if creditors[i].2 <= EPSILON {
                i += 1;
            }
            if debtors[j].2 <= EPSILON {
                j += 1;
            }
        }

        Ok(settlements)
    }

    fn name(&self) -> &'static str {
        "Simple Greedy"
    }
}
