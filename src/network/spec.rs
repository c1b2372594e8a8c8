use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::Result;
use crate::forward::AbstractionWindow;
use crate::init::{BiasInit, WeightInit};
use crate::loss::ErrorFunction;

/// Describes one layer in a network specification.
///
/// Layer 0 is the input layer; its activation is carried for symmetry but
/// never applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    #[serde(default)]
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn new(size: usize, activation: ActivationFunction) -> LayerSpec {
        LayerSpec { size, activation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters { learning_rate: 0.1, momentum: 0.0 }
    }
}

/// Everything needed to construct a ready network, loadable from JSON.
///
/// This is configuration, not a model file: the weights it produces are
/// generated (or listed) up front and trained weights are never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    /// Ordered list of layers, input → output.
    pub layers: Vec<LayerSpec>,
    pub weights: WeightInit,
    pub bias: BiasInit,
    #[serde(default)]
    pub error_function: ErrorFunction,
    #[serde(default)]
    pub hyperparameters: Hyperparameters,
    /// Layer sub-range used while training, if any.
    #[serde(default)]
    pub abstraction: Option<AbstractionWindow>,
    /// Seed for generated weights; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.size).collect()
    }

    pub fn activations(&self) -> Vec<ActivationFunction> {
        self.layers.iter().map(|l| l.activation).collect()
    }

    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
