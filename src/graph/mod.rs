pub mod graph;
pub mod neuron;

pub use graph::Graph;
pub use neuron::{Edge, Neuron, NeuronAddress, NeuronId, NeuronKind};
