use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

/// Per-layer activation. Layer 0 carries one too, but input neurons pass their
/// value through untouched, so it is never applied there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    Tanh,
    ReLU,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
    Gelu,
    Swish,
    /// Periodic activation; its derivative is naturally expressed on the input.
    Sin,
}

impl Default for ActivationFunction {
    fn default() -> Self {
        ActivationFunction::Sigmoid
    }
}

impl ActivationFunction {
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => if x > 0.0 { x } else { alpha * x.exp_m1() },
            ActivationFunction::Gelu => {
                let c = (2.0 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x * sigmoid(x),
            ActivationFunction::Sin => x.sin(),
        }
    }

    /// Derivative at a neuron, given its pre-activation `input` and its
    /// post-activation `output`. Saturating functions read the output,
    /// everything else reads the input.
    pub fn differential(&self, input: f64, output: f64) -> f64 {
        match *self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => output * (1.0 - output),
            ActivationFunction::Tanh => 1.0 - output * output,
            ActivationFunction::ReLU => if input > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if input > 0.0 { 1.0 } else { alpha },
            ActivationFunction::Elu { alpha } => if input > 0.0 { 1.0 } else { alpha * input.exp() },
            ActivationFunction::Gelu => {
                let c = (2.0 / PI).sqrt();
                let t = (c * (input + 0.044715 * input.powi(3))).tanh();
                let d_inner = c * (1.0 + 3.0 * 0.044715 * input * input);
                0.5 * (1.0 + t) + 0.5 * input * (1.0 - t * t) * d_inner
            }
            ActivationFunction::Swish => {
                let s = sigmoid(input);
                s + input * s * (1.0 - s)
            }
            ActivationFunction::Sin => input.cos(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
