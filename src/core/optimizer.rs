use crate::core::constants::{EPSILON, FALLBACK_LABEL, NO_BALANCES_LABEL, round2};
use crate::core::errors::SettlementError;
use crate::core::metrics;
use crate::core::models::{
    party::{Party, PartyId},
    settlement::{SettlementPlan, Transaction},
};
use crate::core::strategies::{SettlementStrategy, SimpleGreedy, primary_strategies};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Clone, Debug, Default)]
pub struct OptimizerConfig {
    /// Reject input whose credits and debits do not net to zero.
    pub strict_balance_check: bool,
}

/// Output of one primary strategy that passed the consistency check.
#[derive(Debug)]
struct Candidate {
    algorithm: &'static str,
    settlements: Vec<Transaction>,
}

/// Runs every primary strategy in parallel and keeps the plan with the
/// fewest payments.
#[derive(Debug)]
pub struct SettlementOptimizer {
    strategies: Vec<Arc<dyn SettlementStrategy>>,
    fallback: Arc<dyn SettlementStrategy>,
    config: OptimizerConfig,
}

impl Default for SettlementOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl SettlementOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self::with_strategies(primary_strategies(), Arc::new(SimpleGreedy::new()), config)
    }

    /// `strategies` must be listed in tie-break priority order.
    pub fn with_strategies(
        strategies: Vec<Arc<dyn SettlementStrategy>>,
        fallback: Arc<dyn SettlementStrategy>,
        config: OptimizerConfig,
    ) -> Self {
        SettlementOptimizer {
            strategies,
            fallback,
            config,
        }
    }

    /// Computes a settlement plan for already-normalized parties.
    ///
    /// # Errors
    ///
    /// [`SettlementError::UnbalancedInput`] in strict mode when the balances do
    /// not net to zero, and [`SettlementError::FallbackFailed`] when every
    /// primary strategy and the fallback failed.
    pub async fn optimize(&self, parties: Vec<Party>) -> Result<SettlementPlan, SettlementError> {
        let started = Instant::now();

        if parties.is_empty() {
            debug!("No outstanding balances, skipping strategies");
            return Ok(SettlementPlan {
                settlements: Vec::new(),
                optimization_info: metrics::report(&parties, &[], NO_BALANCES_LABEL, started.elapsed()),
            });
        }

        self.check_balance(&parties)?;

        let candidates = self.run_primaries(&parties).await;
        let (algorithm, settlements) = match select_best(candidates) {
            Some(best) => (best.algorithm, best.settlements),
            None => {
                warn!("All primary strategies failed, running fallback");
                let settlements = run_isolated(Arc::clone(&self.fallback), parties.clone())
                    .await
                    .map_err(|e| {
                        error!("Fallback strategy failed: {}", e);
                        SettlementError::FallbackFailed(e.to_string())
                    })?;
                (FALLBACK_LABEL, settlements)
            }
        };
        let elapsed = started.elapsed();

        let residual = metrics::residual(&parties, &settlements);
        if residual > EPSILON {
            warn!("{} left {} unsettled", algorithm, residual);
        }

        info!(
            "Selected {} with {} transactions for {} parties",
            algorithm,
            settlements.len(),
            parties.len()
        );
        let optimization_info = metrics::report(&parties, &settlements, algorithm, elapsed);
        Ok(SettlementPlan {
            settlements,
            optimization_info,
        })
    }

    async fn run_primaries(&self, parties: &[Party]) -> Vec<Candidate> {
        let runs = self.strategies.iter().map(|strategy| {
            let strategy = Arc::clone(strategy);
            let snapshot = parties.to_vec();
            async move {
                let algorithm = strategy.name();
                (algorithm, run_isolated(strategy, snapshot).await)
            }
        });

        futures::future::join_all(runs)
            .await
            .into_iter()
            .filter_map(|(algorithm, outcome)| match outcome {
                Ok(settlements) => {
                    debug!("{} produced {} transactions", algorithm, settlements.len());
                    Some(Candidate {
                        algorithm,
                        settlements,
                    })
                }
                Err(e) => {
                    warn!("Algorithm {} failed: {}", algorithm, e);
                    None
                }
            })
            .collect()
    }

    fn check_balance(&self, parties: &[Party]) -> Result<(), SettlementError> {
        let credits = round2(parties.iter().filter(|p| p.balance > 0.0).map(|p| p.balance).sum());
        let debits = round2(parties.iter().filter(|p| p.balance < 0.0).map(|p| -p.balance).sum());
        if (credits - debits).abs() <= EPSILON {
            return Ok(());
        }
        if self.config.strict_balance_check {
            warn!("Rejecting unbalanced input: credits {} debits {}", credits, debits);
            return Err(SettlementError::UnbalancedInput { credits, debits });
        }
        warn!(
            "Balances do not net to zero (credits {}, debits {}), residual will stay unsettled",
            credits, debits
        );
        Ok(())
    }
}

/// Earliest candidate with the strictly smallest transaction count.
fn select_best(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(best) if best.settlements.len() <= candidate.settlements.len() => Some(best),
        _ => Some(candidate),
    })
}

/// Runs one strategy on the blocking pool and checks its output.
///
/// A panic inside the strategy surfaces as a failed strategy.
async fn run_isolated(
    strategy: Arc<dyn SettlementStrategy>,
    parties: Vec<Party>,
) -> Result<Vec<Transaction>, SettlementError> {
    let algorithm = strategy.name();
    tokio::task::spawn_blocking(move || {
        let settlements = strategy.settle(&parties)?;
        verify_plan(strategy.name(), &parties, &settlements)?;
        Ok::<_, SettlementError>(settlements)
    })
    .await
    .map_err(|e| SettlementError::strategy_failed(algorithm, format!("task aborted: {}", e)))?
}

/// Every amount exceeds the tolerance and every id belongs to the input.
pub fn verify_plan(algorithm: &str, parties: &[Party], settlements: &[Transaction]) -> Result<(), SettlementError> {
    let ids: HashSet<PartyId> = parties.iter().map(|p| p.id).collect();
    for tx in settlements {
        if !tx.amount.is_finite() || tx.amount <= EPSILON {
            return Err(SettlementError::strategy_failed(
                algorithm,
                format!("invalid amount {} from {} to {}", tx.amount, tx.from, tx.to),
            ));
        }
        if !ids.contains(&tx.from) || !ids.contains(&tx.to) || tx.from == tx.to {
            return Err(SettlementError::strategy_failed(
                algorithm,
                format!("invalid parties {} -> {}", tx.from, tx.to),
            ));
        }
    }
    Ok(())
}
