use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Args;

/// Number of transactions folded into one walk step.
pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Transactions per batch (one walk step per batch)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), crate::WalkError> {
        if self.batch_size == 0 {
            return Err(crate::WalkError::InvalidBatchSize);
        }
        Ok(())
    }
}

/// Command-line overrides layered on top of a loaded [`WalkConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(Args))]
pub struct WalkOverrides {
    /// Transactions per batch (overrides config)
    #[cfg_attr(feature = "cli", arg(long))]
    pub batch_size: Option<usize>,
}

impl WalkOverrides {
    /// Apply the overrides that were given and validate the result.
    pub fn apply(&self, config: &mut WalkConfig) -> Result<(), crate::WalkError> {
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        config.validate()
    }
}
