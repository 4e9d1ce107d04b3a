//! Hash-seeded motor layer.
//!
//! Each batch gets a fresh set of four motor neurons. Neuron `k` (1-based) is
//! seeded with `"{batch_signature}_{k}"`; the SHA-256 hex of that seed is cut into
//! `weights + biases` equal segments and each segment is mapped into [-1, 1].
//! Trailing digest characters that do not fill a whole segment are ignored.

use alloc::format;
use alloc::vec::Vec;

use crate::activation::ActivationKind;
use crate::codec::{self, DIGEST_HEX_LEN};
use crate::history::Direction;
use crate::network::{NetworkLayer, NeuronUnit};
use crate::WalkError;

pub const MOTOR_WEIGHTS: usize = 4;
pub const MOTOR_BIASES: usize = 1;

/// Weights and bias for one motor neuron.
#[derive(Clone, Debug, PartialEq)]
pub struct MotorParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorParameterGenerator {
    weight_count: usize,
    bias_count: usize,
    segment_len: usize,
}

impl MotorParameterGenerator {
    /// Generator with the given shape.
    ///
    /// Fails if the digest cannot be cut into `weight_count + bias_count`
    /// non-empty segments, or if the shape has no weights or no bias.
    pub fn new(weight_count: usize, bias_count: usize) -> Result<Self, WalkError> {
        if weight_count == 0 || bias_count == 0 {
            return Err(WalkError::InvalidMotorShape {
                weights: weight_count,
                biases: bias_count,
            });
        }
        let segments = weight_count + bias_count;
        if segments > DIGEST_HEX_LEN {
            return Err(WalkError::DegenerateHashSegment {
                digest_len: DIGEST_HEX_LEN,
                segments,
            });
        }
        Ok(Self {
            weight_count,
            bias_count,
            segment_len: DIGEST_HEX_LEN / segments,
        })
    }

    pub fn weight_count(&self) -> usize {
        self.weight_count
    }

    pub fn bias_count(&self) -> usize {
        self.bias_count
    }

    /// Hex characters per segment (12 for the default 4 + 1 shape).
    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// Derive the parameters of motor neuron `neuron_index` for a batch.
    ///
    /// Only the first bias segment is used as the neuron's bias.
    pub fn generate(
        &self,
        batch_signature: &str,
        neuron_index: usize,
    ) -> Result<MotorParams, WalkError> {
        let seed = format!("{}_{}", batch_signature, neuron_index);
        let hash = codec::digest(&seed);

        let segment = |i: usize| {
            let start = i * self.segment_len;
            codec::hex_slice_to_unit_float(&hash[start..start + self.segment_len])
        };

        let weights = (0..self.weight_count)
            .map(segment)
            .collect::<Result<Vec<_>, _>>()?;
        let bias = segment(self.weight_count)?;

        Ok(MotorParams { weights, bias })
    }

    /// Build the full motor layer for a batch, one sigmoid neuron per direction
    /// in `Direction::MOTOR_ORDER`.
    pub fn motor_layer(&self, batch_signature: &str) -> Result<NetworkLayer, WalkError> {
        let units = Direction::MOTOR_ORDER
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let params = self.generate(batch_signature, i + 1)?;
                Ok(NeuronUnit::new(
                    params.weights,
                    params.bias,
                    ActivationKind::Sigmoid,
                ))
            })
            .collect::<Result<Vec<_>, WalkError>>()?;
        Ok(NetworkLayer::new(units))
    }
}

impl Default for MotorParameterGenerator {
    fn default() -> Self {
        Self {
            weight_count: MOTOR_WEIGHTS,
            bias_count: MOTOR_BIASES,
            segment_len: DIGEST_HEX_LEN / (MOTOR_WEIGHTS + MOTOR_BIASES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_shape_uses_twelve_char_segments() {
        let gen = MotorParameterGenerator::default();
        assert_eq!(gen.segment_len(), 12);
        assert_eq!(gen, MotorParameterGenerator::new(4, 1).unwrap());
    }

    #[test]
    fn params_follow_digest_segments() {
        let gen = MotorParameterGenerator::default();
        let params = gen.generate("abc", 1).unwrap();

        let hash = codec::digest("abc_1");
        let expected: Vec<f64> = (0..5)
            .map(|i| codec::hex_slice_to_unit_float(&hash[i * 12..i * 12 + 12]).unwrap())
            .collect();

        assert_eq!(params.weights, expected[..4].to_vec());
        assert_eq!(params.bias, expected[4]);
    }

    #[test]
    fn abc_up_neuron_known_values() {
        // sha256("abc_1") = d49bad9d8aa3 2e9f1cf51268 4ab08122de3c 519be58a84c0 b94e...
        let params = MotorParameterGenerator::default().generate("abc", 1).unwrap();
        assert_eq!(
            params.weights,
            vec![
                0.6610009211774741,
                -0.6357692530975201,
                -0.4164885120149201,
                -0.36242991196058716
            ]
        );
        assert_eq!(params.bias, 0.44771640894528075);
    }

    #[test]
    fn widest_shape_reads_half_digest_segments() {
        let gen = MotorParameterGenerator::new(1, 1).unwrap();
        assert_eq!(gen.segment_len(), 32);

        let params = gen.generate("abc", 1).unwrap();
        assert_eq!(params.weights, vec![0.6610009211774694]);
        assert_eq!(params.bias, 0.736215783234986);
    }

    #[test]
    fn params_are_bounded_and_reproducible() {
        let gen = MotorParameterGenerator::default();
        for index in 1..=4 {
            let a = gen.generate("sig1-sig2", index).unwrap();
            let b = gen.generate("sig1-sig2", index).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.weights.len(), 4);
            assert!(a.weights.iter().all(|w| (-1.0..=1.0).contains(w)));
            assert!((-1.0..=1.0).contains(&a.bias));
        }
    }

    #[test]
    fn each_direction_gets_its_own_parameters() {
        let gen = MotorParameterGenerator::default();
        let up = gen.generate("batch", 1).unwrap();
        let down = gen.generate("batch", 2).unwrap();
        assert_ne!(up, down);
    }

    #[test]
    fn motor_layer_has_four_sigmoid_units() {
        let layer = MotorParameterGenerator::default().motor_layer("abc").unwrap();
        assert_eq!(layer.width(), 4);
        assert!(layer
            .units()
            .iter()
            .all(|u| u.activation() == ActivationKind::Sigmoid && u.fan_in() == 4));
    }

    #[test]
    fn oversized_shape_is_degenerate() {
        assert_eq!(
            MotorParameterGenerator::new(60, 5),
            Err(WalkError::DegenerateHashSegment {
                digest_len: 64,
                segments: 65
            })
        );
        assert!(MotorParameterGenerator::new(63, 1).is_ok());
    }

    #[test]
    fn shape_needs_a_bias() {
        assert_eq!(
            MotorParameterGenerator::new(4, 0),
            Err(WalkError::InvalidMotorShape {
                weights: 4,
                biases: 0
            })
        );
    }
}
