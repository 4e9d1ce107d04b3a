//! Feed-forward network primitives.
//!
//! A neuron is a pure function of its inputs: `activation(bias + Σ input_i * weight_i)`.
//! Layers share one input vector and emit one output per neuron, in order; the
//! output of a layer is the input of the next.
pub mod constants;

use alloc::vec::Vec;

use crate::activation::ActivationKind;
use crate::WalkError;
use constants::{UnitSpec, FIXED_LAYERS, SENSORY_INPUTS};

/// Weighted sum plus activation.
///
/// The sum starts from `bias` and accumulates left to right; reordering the
/// additions would change the low bits of the result.
pub fn activate(
    inputs: &[f64],
    weights: &[f64],
    bias: f64,
    activation: ActivationKind,
) -> Result<f64, WalkError> {
    if inputs.len() != weights.len() {
        return Err(WalkError::DimensionMismatch {
            expected: weights.len(),
            got: inputs.len(),
        });
    }

    let weighted_sum = inputs
        .iter()
        .zip(weights)
        .fold(bias, |sum, (input, weight)| sum + input * weight);
    Ok(activation.apply(weighted_sum))
}

#[derive(Clone, Debug, PartialEq)]
pub struct NeuronUnit {
    weights: Vec<f64>,
    bias: f64,
    activation: ActivationKind,
}

impl NeuronUnit {
    pub fn new(weights: Vec<f64>, bias: f64, activation: ActivationKind) -> Self {
        Self {
            weights,
            bias,
            activation,
        }
    }

    pub fn from_spec(spec: &UnitSpec) -> Self {
        Self::new(spec.weights.to_vec(), spec.bias, spec.activation)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> ActivationKind {
        self.activation
    }

    /// Number of inputs this neuron expects.
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    pub fn activate(&self, inputs: &[f64]) -> Result<f64, WalkError> {
        activate(inputs, &self.weights, self.bias, self.activation)
    }
}

/// Ordered set of neurons reading the same inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLayer {
    units: Vec<NeuronUnit>,
}

impl NetworkLayer {
    pub fn new(units: Vec<NeuronUnit>) -> Self {
        Self { units }
    }

    pub fn from_specs(specs: &[UnitSpec]) -> Self {
        Self::new(specs.iter().map(NeuronUnit::from_spec).collect())
    }

    pub fn units(&self) -> &[NeuronUnit] {
        &self.units
    }

    /// Number of outputs produced.
    pub fn width(&self) -> usize {
        self.units.len()
    }

    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<f64>, WalkError> {
        self.units.iter().map(|unit| unit.activate(inputs)).collect()
    }
}

/// The constant sensory → hidden1 → hidden2 → hidden3 stack.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedNetwork {
    layers: Vec<NetworkLayer>,
    input_width: usize,
}

impl FixedNetwork {
    /// Build the network from the constant table in [`constants`].
    pub fn standard() -> Result<Self, WalkError> {
        let layers = FIXED_LAYERS
            .iter()
            .map(|specs| NetworkLayer::from_specs(specs))
            .collect();
        Self::from_layers(layers, SENSORY_INPUTS)
    }

    /// Assemble a network, checking that every neuron's fan-in matches the
    /// width of the layer feeding it.
    pub fn from_layers(layers: Vec<NetworkLayer>, input_width: usize) -> Result<Self, WalkError> {
        let mut width = input_width;
        for layer in &layers {
            if let Some(unit) = layer.units.iter().find(|u| u.fan_in() != width) {
                return Err(WalkError::DimensionMismatch {
                    expected: unit.fan_in(),
                    got: width,
                });
            }
            width = layer.width();
        }
        Ok(Self {
            layers,
            input_width,
        })
    }

    pub fn layers(&self) -> &[NetworkLayer] {
        &self.layers
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    /// Width of the final layer's output.
    pub fn output_width(&self) -> usize {
        self.layers
            .last()
            .map(NetworkLayer::width)
            .unwrap_or(self.input_width)
    }

    pub fn forward(&self, inputs: &[f64]) -> Result<Vec<f64>, WalkError> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }
}
