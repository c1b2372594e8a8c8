use serde::{Serialize, Deserialize};

use super::{BinaryCrossEntropy, HuberError, MeanAbsoluteError, MeanSquaredError, SumSquaredError};

/// Selects how a network scores one sample. One per network, fixed at build time.
///
/// - `SumSquared`        : default; Σ(expected − obtained)², no averaging.
/// - `MeanSquared`       : the same, divided by the output count.
/// - `MeanAbsolute`      : mean |expected − obtained|.
/// - `Huber`             : Huber loss with δ = 1.
/// - `BinaryCrossEntropy`: pair with a Sigmoid output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    #[default]
    SumSquared,
    MeanSquared,
    MeanAbsolute,
    Huber,
    BinaryCrossEntropy,
}

impl ErrorFunction {
    /// Scalar loss for one sample. Both slices must have the same length.
    pub fn aggregate(&self, expected: &[f64], obtained: &[f64]) -> f64 {
        match self {
            ErrorFunction::SumSquared         => SumSquaredError::aggregate(expected, obtained),
            ErrorFunction::MeanSquared        => MeanSquaredError::aggregate(expected, obtained),
            ErrorFunction::MeanAbsolute       => MeanAbsoluteError::aggregate(expected, obtained),
            ErrorFunction::Huber              => HuberError::aggregate(expected, obtained),
            ErrorFunction::BinaryCrossEntropy => BinaryCrossEntropy::aggregate(expected, obtained),
        }
    }

    /// ∂loss/∂obtained for every output. The trainer descends along the negation.
    pub fn gradient(&self, expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        match self {
            ErrorFunction::SumSquared         => SumSquaredError::gradient(expected, obtained),
            ErrorFunction::MeanSquared        => MeanSquaredError::gradient(expected, obtained),
            ErrorFunction::MeanAbsolute       => MeanAbsoluteError::gradient(expected, obtained),
            ErrorFunction::Huber              => HuberError::gradient(expected, obtained),
            ErrorFunction::BinaryCrossEntropy => BinaryCrossEntropy::gradient(expected, obtained),
        }
    }
}
