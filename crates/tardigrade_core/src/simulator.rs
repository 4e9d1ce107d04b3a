//! Walk simulator.
//!
//! State machine over `AtStep(i)`, `i = 0..=batches`. Starting from genesis,
//! each batch advances the walk by exactly one transition:
//! features → fixed network → hash-seeded motor layer → softmax → argmax → step.
//! A failure in any transition aborts the run; no partial history is returned.

use alloc::vec::Vec;

use crate::activation::{argmax, softmax};
use crate::batch::{self, SensoryVector, TransactionBatch, TransactionRecord};
use crate::history::{Direction, WalkHistory};
use crate::motor::MotorParameterGenerator;
use crate::network::FixedNetwork;
use crate::{WalkConfig, WalkError};

/// Result of evaluating the network on one batch.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub features: SensoryVector,
    /// Output of the last fixed hidden layer
    pub hidden: Vec<f64>,
    /// Raw sigmoid outputs of the motor neurons, in `Direction::MOTOR_ORDER`
    pub motor: Vec<f64>,
    /// Softmax of `motor`
    pub probabilities: Vec<f64>,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WalkSimulator {
    network: FixedNetwork,
    motor: MotorParameterGenerator,
    batch_size: usize,
}

impl WalkSimulator {
    pub fn new(config: &WalkConfig) -> Result<Self, WalkError> {
        config.validate()?;
        Ok(Self {
            network: FixedNetwork::standard()?,
            motor: MotorParameterGenerator::default(),
            batch_size: config.batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn network(&self) -> &FixedNetwork {
        &self.network
    }

    /// Evaluate one batch and resolve its direction.
    pub fn decide(&self, batch: &TransactionBatch<'_>) -> Result<Decision, WalkError> {
        let features = batch.features();
        let hidden = self.network.forward(&features.to_array())?;

        let motor_layer = self.motor.motor_layer(&batch.signature())?;
        let motor = motor_layer.forward(&hidden)?;
        let probabilities = softmax(&motor);

        // Infinite volume turns the features into NaN; the walker stays in place.
        let direction = argmax(&probabilities)
            .and_then(|i| Direction::MOTOR_ORDER.get(i).copied())
            .unwrap_or(Direction::None);

        Ok(Decision {
            features,
            hidden,
            motor,
            probabilities,
            direction,
        })
    }

    /// Rebuild the complete walk from `transactions` (sorted ascending by block time).
    pub fn run(&self, transactions: &[TransactionRecord]) -> Result<WalkHistory, WalkError> {
        let batches = batch::batch(transactions, self.batch_size)?;
        let mut history = WalkHistory::with_capacity(batches.len());

        for batch in &batches {
            let decision = self.decide(batch)?;
            history.record(decision.direction, batch.signatures(), batch.timestamp());
        }

        Ok(history)
    }
}
