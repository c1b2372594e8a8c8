pub mod builder;
pub mod network;
pub mod spec;
pub mod staged;

pub use builder::{build_dense, neuron_count, required_edge_count, wire_bias};
pub use network::Network;
pub use spec::{Hyperparameters, LayerSpec, NetworkSpec};
pub use staged::{NetworkBuilder, Stage};
