//! Fixed network parameters.
//!
//! These literals define every walk ever produced: changing a single digit
//! changes the direction chosen for most batches. They are never mutated.

use crate::activation::ActivationKind::{self, Relu, Sigmoid, Tanh};

/// Width of the sensory input vector (buy, sell, fill ratio).
pub const SENSORY_INPUTS: usize = 3;

/// Static description of one neuron.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSpec {
    pub weights: &'static [f64],
    pub bias: f64,
    pub activation: ActivationKind,
}

const fn unit(weights: &'static [f64], bias: f64, activation: ActivationKind) -> UnitSpec {
    UnitSpec {
        weights,
        bias,
        activation,
    }
}

/// One-hot pass-through: buy amount, sell amount, transaction count.
pub const SENSORY_LAYER: [UnitSpec; 3] = [
    unit(&[1.0, 0.0, 0.0], 0.0, Relu),
    unit(&[0.0, 1.0, 0.0], 0.0, Relu),
    unit(&[0.0, 0.0, 1.0], 0.0, Relu),
];

pub const HIDDEN_LAYER_1: [UnitSpec; 4] = [
    unit(&[0.54789, -0.31456, 0.26934], 0.12345, Tanh),
    unit(&[-0.41892, 0.61734, -0.11238], -0.23456, Relu),
    unit(&[0.31459, 0.37891, 0.34567], 0.01234, Sigmoid),
    unit(&[-0.21987, 0.81234, -0.51789], 0.05678, Tanh),
];

pub const HIDDEN_LAYER_2: [UnitSpec; 4] = [
    unit(&[0.79234, -0.51892, 0.41234, 0.11789], 0.05432, Relu),
    unit(&[-0.61789, 0.91234, -0.31892, 0.21456], -0.12345, Sigmoid),
    unit(&[0.21789, 0.23456, 0.61234, -0.41892], 0.23456, Tanh),
    unit(&[0.11234, -0.21789, 0.51456, 0.31892], -0.05678, Relu),
];

pub const HIDDEN_LAYER_3: [UnitSpec; 4] = [
    unit(&[0.41892, -0.61234, 0.31789, 0.21456], 0.03456, Sigmoid),
    unit(&[-0.51234, 0.71892, -0.21789, 0.41234], -0.07891, Tanh),
    unit(&[0.31892, 0.11789, 0.51234, -0.31456], 0.12345, Relu),
    unit(&[0.21789, 0.23456, 0.21234, 0.22345], 0.01234, Sigmoid),
];

/// Layers in evaluation order.
pub const FIXED_LAYERS: [&[UnitSpec]; 4] = [
    &SENSORY_LAYER,
    &HIDDEN_LAYER_1,
    &HIDDEN_LAYER_2,
    &HIDDEN_LAYER_3,
];
