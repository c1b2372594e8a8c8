use serde::{Serialize, Deserialize};

/// One training pair. `input` is sized to layer 0, `expected` to the layer
/// training reads its outputs from (the last one unless a window says otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Sample {
        Sample { input, expected }
    }
}
