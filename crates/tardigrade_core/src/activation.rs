use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Activation function attached to a neuron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    Sigmoid,
    Relu,
    Tanh,
}

impl ActivationKind {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ActivationKind::Sigmoid => sigmoid(x),
            ActivationKind::Relu => relu(x),
            ActivationKind::Tanh => tanh(x),
        }
    }
}

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + libm::exp(-x))
}

/// NaN passes through; `f64::max` would turn it into 0.
#[inline]
pub fn relu(x: f64) -> f64 {
    if x > 0.0 || x.is_nan() {
        x
    } else {
        0.0
    }
}

/// Maximum that is NaN as soon as either side is.
#[inline]
fn nan_max(acc: f64, v: f64) -> f64 {
    if v.is_nan() || acc.is_nan() {
        f64::NAN
    } else {
        acc.max(v)
    }
}

#[inline]
pub fn tanh(x: f64) -> f64 {
    libm::tanh(x)
}

/// Numerically stabilized softmax: the maximum is subtracted before exponentiating.
///
/// An empty input yields an empty output; a NaN anywhere makes every output NaN.
pub fn softmax(outputs: &[f64]) -> Vec<f64> {
    let max_output = outputs.iter().copied().fold(f64::NEG_INFINITY, nan_max);
    let exps: Vec<f64> = outputs
        .iter()
        .map(|&output| libm::exp(output - max_output))
        .collect();
    let sum: f64 = exps.iter().fold(0.0, |acc, &v| acc + v);
    exps.into_iter().map(|v| v / sum).collect()
}

/// Index of the largest value; ties go to the first occurrence.
///
/// Returns `None` for an empty slice or when no element equals the maximum
/// (a NaN anywhere in the input).
pub fn argmax(values: &[f64]) -> Option<usize> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, nan_max);
    values.iter().position(|&v| v == max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
    }

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(relu(-3.5), 0.0);
        assert_eq!(relu(2.25), 2.25);
        assert_eq!(relu(-0.0).to_bits(), 0.0f64.to_bits());
        assert!(relu(f64::NAN).is_nan());
    }

    #[test]
    fn activation_kind_dispatch() {
        assert_eq!(ActivationKind::Relu.apply(-1.0), 0.0);
        assert_eq!(ActivationKind::Sigmoid.apply(0.0), 0.5);
        assert_eq!(ActivationKind::Tanh.apply(0.0), 0.0);
    }

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[0.1, 0.7, 0.3, 0.9]);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(argmax(&probs), Some(3));
    }

    #[test]
    fn softmax_survives_large_inputs() {
        let probs = softmax(&[1000.0, 1000.0]);
        assert_eq!(probs, alloc::vec![0.5, 0.5]);
    }

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.25, 0.25, 0.25, 0.25]), Some(0));
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), Some(1));
    }

    #[test]
    fn argmax_without_a_winner() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[0.2, f64::NAN]), None);
    }

    #[test]
    fn softmax_spreads_nan() {
        let probs = softmax(&[0.3, f64::NAN, 0.1]);
        assert!(probs.iter().all(|p| p.is_nan()));
        assert_eq!(argmax(&probs), None);
    }
}
