mod api_tests;

use crate::core::constants::EPSILON;
use crate::core::metrics::remaining_balances;
use crate::core::models::{party::Party, settlement::Transaction};
use crate::core::optimizer::{OptimizerConfig, SettlementOptimizer};
use crate::core::services::SettlementService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use serde_json::{Map, Value};

pub fn create_test_service() -> SettlementService<InMemoryLogging> {
    create_service_with(OptimizerConfig::default())
}

pub fn create_service_with(config: OptimizerConfig) -> SettlementService<InMemoryLogging> {
    SettlementService::new(SettlementOptimizer::new(config), InMemoryLogging::new())
}

pub fn parties(entries: &[(i64, &str, f64)]) -> Vec<Party> {
    entries
        .iter()
        .map(|&(id, name, balance)| Party::new(id, name, balance))
        .collect()
}

pub fn balance_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Applying the plan leaves every party within tolerance of zero.
pub fn assert_settles(parties: &[Party], settlements: &[Transaction]) {
    for tx in settlements {
        assert!(tx.amount > EPSILON, "non-positive amount in {:?}", tx);
    }
    for (id, balance) in remaining_balances(parties, settlements) {
        assert!(balance.abs() <= EPSILON, "party {} left with {}", id, balance);
    }
}

pub fn edges(settlements: &[Transaction]) -> Vec<(i64, i64, f64)> {
    settlements.iter().map(|t| (t.from, t.to, t.amount)).collect()
}
