use tracing::{debug, info};

use crate::error::{NetError, Result};
use crate::forward::{self, AbstractionWindow};
use crate::graph::{Edge, Graph, NeuronAddress};
use crate::loss::ErrorFunction;
use crate::network::spec::NetworkSpec;
use crate::network::staged::NetworkBuilder;
use crate::optim::Sgd;
use crate::train::backprop::train_on_window;
use crate::train::sample::Sample;

/// A fully constructed network: topology, weights and bias units are all bound.
/// Only [`NetworkBuilder::build`] hands these out.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    error_function: ErrorFunction,
    optimizer: Sgd,
    abstraction: Option<AbstractionWindow>,
    seed: Option<u64>,
}

impl Network {
    pub(crate) fn from_parts(
        graph: Graph,
        error_function: ErrorFunction,
        optimizer: Sgd,
        abstraction: Option<AbstractionWindow>,
        seed: Option<u64>,
    ) -> Network {
        Network { graph, error_function, optimizer, abstraction, seed }
    }

    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// Runs the staged builder over a [`NetworkSpec`].
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        let mut builder = NetworkBuilder::new();
        if let Some(seed) = spec.seed {
            builder.seed(seed);
        }
        builder
            .error_function(spec.error_function)
            .abstraction(spec.abstraction)
            .hyperparameters(spec.hyperparameters.learning_rate, spec.hyperparameters.momentum)?
            .topology(&spec.sizes(), &spec.activations())?
            .weights(&spec.weights)?
            .bias(&spec.bias)?;
        let network = builder.build()?;
        info!(name = %spec.name, sizes = ?spec.sizes(), "network ready");
        Ok(network)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.graph.sizes()
    }

    pub fn error_function(&self) -> ErrorFunction {
        self.error_function
    }

    /// Seed given to the builder, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn optimizer(&self) -> &Sgd {
        &self.optimizer
    }

    pub fn abstraction(&self) -> Option<AbstractionWindow> {
        self.abstraction
    }

    /// Restricts training to a layer sub-range, or lifts the restriction.
    pub fn set_abstraction(&mut self, window: Option<AbstractionWindow>) -> Result<()> {
        if let Some(w) = window {
            w.validate(&self.graph)?;
        }
        debug!(?window, "abstraction window set");
        self.abstraction = window;
        Ok(())
    }

    /// Full forward pass; returns the output layer.
    pub fn evaluate(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        forward::evaluate(&mut self.graph, input)?;
        Ok(forward::read_outputs(&self.graph))
    }

    /// Forward pass over `window` only; returns the outputs of `window.end`.
    /// See [`forward::evaluate_window`] for how `input` is interpreted.
    pub fn evaluate_window(&mut self, input: Option<&[f64]>, window: AbstractionWindow) -> Result<Vec<f64>> {
        forward::evaluate_window(&mut self.graph, input, window)?;
        Ok(forward::read_layer(&self.graph, window.end))
    }

    /// Evaluates one sample and backpropagates its error. Returns the loss
    /// measured before the weights moved.
    ///
    /// With an abstraction window `[s, e]` this runs in two phases: a forward
    /// pass over `[0, e]` on the sample input, then backprop restricted to
    /// `[s, e]`, so the expected vector is sized to layer `e`.
    pub fn train_sample(&mut self, sample: &Sample) -> Result<f64> {
        let window = self.abstraction.unwrap_or_else(|| AbstractionWindow::full(&self.graph));
        let out_size = self.graph.layer(window.end).len();
        if sample.expected.len() != out_size {
            return Err(NetError::mismatch("expected output", out_size, sample.expected.len()));
        }

        let reach = AbstractionWindow::new(0, window.end);
        forward::evaluate_window(&mut self.graph, Some(sample.input.as_slice()), reach)?;
        train_on_window(&mut self.graph, &sample.expected, &self.optimizer, self.error_function, window)
    }

    /// One online pass over `dataset` in order; returns the average loss.
    pub fn run_training(&mut self, dataset: &[Sample]) -> Result<f64> {
        crate::train::run_training(self, dataset)
    }

    pub fn connect(&mut self, from: NeuronAddress, to: NeuronAddress, weight: f64) -> Result<()> {
        self.graph.connect(from, to, weight)
    }

    pub fn disconnect(&mut self, from: NeuronAddress, to: NeuronAddress) -> Result<Edge> {
        self.graph.disconnect(from, to)
    }

    pub fn weight(&self, from: NeuronAddress, to: NeuronAddress) -> Option<f64> {
        self.graph.weight(from, to)
    }

    /// (bias value, bias weight) of the unit feeding `address`.
    pub fn bias_of(&self, address: NeuronAddress) -> Result<Option<(f64, f64)>> {
        self.graph.bias_of(address)
    }
}
