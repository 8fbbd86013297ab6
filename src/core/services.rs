use crate::core::constants::{SETTLEMENT_FAILED, SETTLEMENT_OPTIMIZED};
use crate::core::errors::SettlementError;
use crate::core::models::{audit::AppLog, member::Member, settlement::SettlementPlan};
use crate::core::normalizer;
use crate::core::optimizer::SettlementOptimizer;
use crate::infrastructure::logging::LoggingService;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

pub struct SettlementService<L: LoggingService> {
    optimizer: SettlementOptimizer,
    logging: L,
}

impl<L: LoggingService> SettlementService<L> {
    pub fn new(optimizer: SettlementOptimizer, logging: L) -> Self {
        SettlementService { optimizer, logging }
    }

    /// Normalizes the raw balances, runs the optimizer and records the run.
    ///
    /// Malformed entries never fail the call; they are dropped and counted.
    pub async fn optimize_settlement(
        &self,
        balances: &Map<String, Value>,
        members: &[Member],
    ) -> Result<SettlementPlan, SettlementError> {
        info!(
            "Optimizing settlement for {} balance entries and {} members",
            balances.len(),
            members.len()
        );
        let normalized = normalizer::normalize(balances, members);
        let party_count = normalized.parties.len();
        let dropped = normalized.dropped;

        match self.optimizer.optimize(normalized.parties).await {
            Ok(plan) => {
                debug!("Optimization info: {:?}", plan.optimization_info);
                self.logging
                    .log_action(
                        SETTLEMENT_OPTIMIZED,
                        json!({
                            "algorithm": plan.optimization_info.algorithm,
                            "party_count": party_count,
                            "settlement_count": plan.settlements.len(),
                            "dropped_entries": dropped,
                            "computation_time": plan.optimization_info.computation_time,
                        }),
                    )
                    .await?;
                Ok(plan)
            }
            Err(e) => {
                self.logging
                    .log_action(
                        SETTLEMENT_FAILED,
                        json!({
                            "party_count": party_count,
                            "dropped_entries": dropped,
                            "error": e.to_string(),
                        }),
                    )
                    .await?;
                Err(e)
            }
        }
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, SettlementError> {
        self.logging.get_logs().await
    }
}
