use super::party::PartyId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One proposed payment from a debtor to a creditor.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    pub from: PartyId,
    pub to: PartyId,
    #[serde(rename = "fromName")]
    pub from_name: String,
    #[serde(rename = "toName")]
    pub to_name: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OptimizationInfo {
    pub algorithm: String,
    /// Milliseconds
    pub computation_time: f64,
    pub efficiency_percentage: f64,
    pub total_amount: f64,
    pub transactions_reduced: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettlementPlan {
    pub settlements: Vec<Transaction>,
    pub optimization_info: OptimizationInfo,
}

impl SettlementPlan {
    pub fn transaction_count(&self) -> usize {
        self.settlements.len()
    }
}
