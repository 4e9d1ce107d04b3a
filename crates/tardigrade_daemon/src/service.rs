use std::time::{Duration, Instant};

use tardigrade_core::{WalkConfig, WalkError, WalkHistory, WalkSimulator, WalkStep};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::store::{StoreError, StoreSession, TransactionStore};

/// Failure of one history computation. Nothing partial is ever returned.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transaction store read failed: {0}")]
    UpstreamRead(#[from] StoreError),
    #[error("transaction store read timed out after {0:?}")]
    UpstreamTimeout(Duration),
    #[error("walk simulation failed: {0}")]
    Simulation(#[from] WalkError),
}

/// Recomputes the walk from the store on every call.
pub struct WalkService<S> {
    store: S,
    simulator: WalkSimulator,
    read_timeout: Duration,
}

impl<S: TransactionStore> WalkService<S> {
    pub fn new(store: S, walk: &WalkConfig, read_timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self {
            store,
            simulator: WalkSimulator::new(walk)?,
            read_timeout,
        })
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full history, genesis first.
    pub async fn history(&self) -> Result<WalkHistory, ServiceError> {
        let start = Instant::now();
        let transactions = self.fetch().await?;

        let history = self.simulator.run(&transactions).map_err(|e| {
            error!(error = %e, transactions = transactions.len(), "Walk simulation failed");
            ServiceError::Simulation(e)
        })?;

        for step in history.iter().skip(1) {
            debug!(
                index = step.index,
                x = step.x,
                y = step.y,
                direction = %step.direction,
                timestamp = step.timestamp,
                "Walk step"
            );
        }

        let position = history.position();
        info!(
            transactions = transactions.len(),
            steps = history.len(),
            x = position.x,
            y = position.y,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Walk recomputed"
        );
        Ok(history)
    }

    /// Most recent step only.
    pub async fn latest(&self) -> Result<WalkStep, ServiceError> {
        Ok(self.history().await?.latest().clone())
    }

    /// One bounded read of the whole log through a fresh session.
    async fn fetch(&self) -> Result<Vec<tardigrade_core::TransactionRecord>, ServiceError> {
        let read = async {
            let mut session = self.store.open_session().await?;
            session.list().await
        };

        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(Ok(transactions)) => Ok(transactions),
            Ok(Err(e)) => {
                error!(error = %e, "Transaction store read failed");
                Err(ServiceError::UpstreamRead(e))
            }
            Err(_) => {
                error!(timeout = ?self.read_timeout, "Transaction store read timed out");
                Err(ServiceError::UpstreamTimeout(self.read_timeout))
            }
        }
    }
}
