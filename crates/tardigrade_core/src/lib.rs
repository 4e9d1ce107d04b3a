//! Tardigrade walk engine
//!
//! Turns an ordered log of swap transactions into a reproducible 2-D walk:
//! 1. Partition the log into fixed-size batches (hot path is one batch at a time)
//! 2. Feed batch features through a constant feed-forward network
//! 3. Seed a 4-neuron motor layer from the SHA-256 digest of the batch signatures
//! 4. Softmax the motor outputs and step one cell in the winning direction
//!
//! Design constraints:
//! - No std: core::* and alloc only, float transcendental functions come from `libm`
//! - No persisted state: every run rebuilds the full history from the log
//! - Bit-level determinism: the same log always yields the same history
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod activation;
pub mod batch;
pub mod codec;
pub mod config;
pub mod error;
pub mod history;
pub mod motor;
pub mod network;
pub mod simulator;

pub use batch::{ActivityType, SensoryVector, TransactionBatch, TransactionRecord};
pub use config::{WalkConfig, WalkOverrides};
pub use error::WalkError;
pub use history::{Direction, Position, WalkHistory, WalkStep};
pub use simulator::WalkSimulator;

/// Convenience entry point: simulate `transactions` with the default configuration.
pub fn simulate(transactions: &[TransactionRecord]) -> Result<WalkHistory, WalkError> {
    WalkSimulator::new(&WalkConfig::default())?.run(transactions)
}
