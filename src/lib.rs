//! A from-scratch neural network engine built on an explicit neuron graph.
//!
//! Networks are constructed in stages (topology, dense weights, bias units),
//! evaluated forward layer by layer (optionally over a layer sub-range), and
//! trained online with backpropagation and momentum. Extra edges, including
//! skip and recurrent ones, can be wired in by hand with `connect`.

pub mod activation;
pub mod error;
pub mod forward;
pub mod graph;
pub mod init;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use error::{NetError, Result};
pub use forward::AbstractionWindow;
pub use graph::{Graph, NeuronAddress};
pub use init::{BiasInit, WeightInit};
pub use loss::ErrorFunction;
pub use network::{Network, NetworkBuilder, NetworkSpec, Stage};
pub use optim::Sgd;
pub use train::{run_training, train_loop, Sample, TrainConfig};
