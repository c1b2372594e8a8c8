use std::f64::consts::PI;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::network::builder::required_edge_count;

/// Where the dense edge weights come from.
///
/// Generated weights follow the same order the builder consumes them in: for
/// each consecutive layer pair, each target neuron, each source neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInit {
    /// Exactly one weight per dense edge.
    Explicit(Vec<f64>),
    /// Uniform in `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// N(0, sqrt(1 / fan_in)); suits Sigmoid/Tanh/Identity layers.
    Xavier,
    /// N(0, sqrt(2 / fan_in)); suits ReLU-family layers.
    He,
}

impl WeightInit {
    pub fn resolve<R: Rng>(&self, sizes: &[usize], rng: &mut R) -> Result<Vec<f64>> {
        let required = required_edge_count(sizes);
        match self {
            WeightInit::Explicit(weights) => {
                if weights.len() != required {
                    return Err(NetError::mismatch("dense weights", required, weights.len()));
                }
                Ok(weights.clone())
            }
            WeightInit::Uniform { low, high } => {
                check_range(*low, *high)?;
                Ok((0..required).map(|_| uniform(rng, *low, *high)).collect())
            }
            WeightInit::Xavier => Ok(by_fan_in(sizes, rng, 1.0)),
            WeightInit::He => Ok(by_fan_in(sizes, rng, 2.0)),
        }
    }
}

/// Where the bias units' weights and constant outputs come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasInit {
    /// One weight and one value per neuron, grouped by layer.
    Explicit { weights: Vec<Vec<f64>>, values: Vec<Vec<f64>> },
    /// Random weight in `[low, high)`, the same bias value for every unit.
    Uniform { low: f64, high: f64, value: f64 },
    Constant { weight: f64, value: f64 },
}

/// Per-layer bias weights and bias values, shaped like the topology.
pub type BiasTable = (Vec<Vec<f64>>, Vec<Vec<f64>>);

impl BiasInit {
    pub fn resolve<R: Rng>(&self, sizes: &[usize], rng: &mut R) -> Result<BiasTable> {
        match self {
            BiasInit::Explicit { weights, values } => Ok((weights.clone(), values.clone())),
            BiasInit::Uniform { low, high, value } => {
                check_range(*low, *high)?;
                let weights = sizes.iter()
                    .map(|&n| (0..n).map(|_| uniform(rng, *low, *high)).collect())
                    .collect();
                Ok((weights, shaped(sizes, *value)))
            }
            BiasInit::Constant { weight, value } => Ok((shaped(sizes, *weight), shaped(sizes, *value))),
        }
    }
}

fn shaped(sizes: &[usize], value: f64) -> Vec<Vec<f64>> {
    sizes.iter().map(|&n| vec![value; n]).collect()
}

fn check_range(low: f64, high: f64) -> Result<()> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(NetError::InvalidConfig(format!("random range [{low}, {high}) is empty or not finite")));
    }
    Ok(())
}

fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    rng.gen_range(low..high)
}

fn by_fan_in<R: Rng>(sizes: &[usize], rng: &mut R, gain: f64) -> Vec<f64> {
    let mut weights = Vec::with_capacity(required_edge_count(sizes));
    for pair in sizes.windows(2) {
        let (fan_in, targets) = (pair[0], pair[1]);
        let std_dev = (gain / fan_in as f64).sqrt();
        for _ in 0..fan_in * targets {
            weights.push(standard_normal(rng) * std_dev);
        }
    }
    weights
}

/// Box-Muller; both uniforms are drawn from (0, 1] so ln never sees 0.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
