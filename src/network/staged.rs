use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::forward::AbstractionWindow;
use crate::graph::Graph;
use crate::graph::graph::validate_topology;
use crate::init::{BiasInit, WeightInit};
use crate::loss::ErrorFunction;
use crate::network::builder::{build_dense, wire_bias};
use crate::network::network::Network;
use crate::optim::Sgd;

/// Setup progress of a [`NetworkBuilder`]. Stages are only ever entered in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Unconfigured,
    TopologyBound,
    WeightsBound,
    BiasBound,
    Ready,
}

/// Staged construction of a [`Network`].
///
/// `topology` → `weights` → `bias` → `build`, in that order. Calling a step out
/// of order is a `Precondition` error and a failing step leaves the builder in
/// the stage it was in. The error function, learning parameters, abstraction
/// window and seed can be set at any point before `build`.
///
/// ```
/// use ferrite_graph::{ActivationFunction as A, BiasInit, NetworkBuilder, WeightInit};
///
/// let mut builder = NetworkBuilder::new();
/// builder
///     .topology(&[2, 2, 1], &[A::Identity, A::Sigmoid, A::Sigmoid])?
///     .weights(&WeightInit::Uniform { low: -1.0, high: 1.0 })?
///     .bias(&BiasInit::Constant { weight: 0.0, value: 1.0 })?;
/// let mut network = builder.build()?;
/// assert_eq!(network.evaluate(&[0.0, 1.0])?.len(), 1);
/// # Ok::<(), ferrite_graph::NetError>(())
/// ```
#[derive(Debug)]
pub struct NetworkBuilder {
    stage: Stage,
    sizes: Vec<usize>,
    activations: Vec<ActivationFunction>,
    graph: Option<Graph>,
    error_function: ErrorFunction,
    optimizer: Sgd,
    abstraction: Option<AbstractionWindow>,
    rng: StdRng,
    seed: Option<u64>,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        NetworkBuilder::new()
    }
}

impl NetworkBuilder {
    pub fn new() -> NetworkBuilder {
        NetworkBuilder {
            stage: Stage::Unconfigured,
            sizes: Vec::new(),
            activations: Vec::new(),
            graph: None,
            error_function: ErrorFunction::default(),
            optimizer: Sgd::default(),
            abstraction: None,
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Makes generated weights reproducible. Only affects later `weights`/`bias`
    /// steps. The built network keeps the seed for shuffling in `train_loop`.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = Some(seed);
        self
    }

    pub fn error_function(&mut self, error_function: ErrorFunction) -> &mut Self {
        self.error_function = error_function;
        self
    }

    pub fn hyperparameters(&mut self, learning_rate: f64, momentum: f64) -> Result<&mut Self> {
        self.optimizer = Sgd::new(learning_rate, momentum)?;
        Ok(self)
    }

    /// Checked against the topology when the network is built.
    pub fn abstraction(&mut self, window: Option<AbstractionWindow>) -> &mut Self {
        self.abstraction = window;
        self
    }

    pub fn topology(&mut self, sizes: &[usize], activations: &[ActivationFunction]) -> Result<&mut Self> {
        self.require(Stage::Unconfigured, "topology")?;
        validate_topology(sizes)?;
        if activations.len() != sizes.len() {
            return Err(NetError::mismatch("activations per layer", sizes.len(), activations.len()));
        }
        self.sizes = sizes.to_vec();
        self.activations = activations.to_vec();
        self.advance(Stage::TopologyBound);
        Ok(self)
    }

    pub fn weights(&mut self, init: &WeightInit) -> Result<&mut Self> {
        self.require(Stage::TopologyBound, "weights")?;
        let flat = init.resolve(&self.sizes, &mut self.rng)?;
        self.graph = Some(build_dense(&self.sizes, &self.activations, &flat)?);
        self.advance(Stage::WeightsBound);
        Ok(self)
    }

    pub fn bias(&mut self, init: &BiasInit) -> Result<&mut Self> {
        self.require(Stage::WeightsBound, "bias")?;
        let (weights, values) = init.resolve(&self.sizes, &mut self.rng)?;
        let graph = self.graph
            .as_mut()
            .ok_or_else(|| NetError::precondition("bias", "no graph has been built"))?;
        wire_bias(graph, &weights, &values)?;
        self.advance(Stage::BiasBound);
        Ok(self)
    }

    pub fn build(&mut self) -> Result<Network> {
        self.require(Stage::BiasBound, "build")?;
        let graph = self.graph
            .take()
            .ok_or_else(|| NetError::precondition("build", "no graph has been built"))?;
        if let Some(window) = self.abstraction {
            if let Err(e) = window.validate(&graph) {
                self.graph = Some(graph);
                return Err(e);
            }
        }
        self.advance(Stage::Ready);
        Ok(Network::from_parts(graph, self.error_function, self.optimizer, self.abstraction, self.seed))
    }

    fn require(&self, needed: Stage, operation: &'static str) -> Result<()> {
        if self.stage != needed {
            return Err(NetError::precondition(
                operation,
                format!("builder is {:?}, this step needs {:?}", self.stage, needed),
            ));
        }
        Ok(())
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, "builder stage");
        self.stage = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACT: [ActivationFunction; 3] = [ActivationFunction::Identity; 3];

    fn topology_bound() -> NetworkBuilder {
        let mut b = NetworkBuilder::new();
        b.topology(&[2, 2, 1], &ACT).unwrap();
        b
    }

    #[test]
    fn stages_advance_in_order() {
        let mut b = NetworkBuilder::new();
        assert_eq!(b.stage(), Stage::Unconfigured);
        b.topology(&[2, 2, 1], &ACT).unwrap();
        assert_eq!(b.stage(), Stage::TopologyBound);
        b.weights(&WeightInit::Explicit(vec![1.0; 6])).unwrap();
        assert_eq!(b.stage(), Stage::WeightsBound);
        b.bias(&BiasInit::Constant { weight: 0.0, value: 1.0 }).unwrap();
        assert_eq!(b.stage(), Stage::BiasBound);
        let network = b.build().unwrap();
        assert_eq!(b.stage(), Stage::Ready);
        assert_eq!(network.graph().bias_count(), 5);
    }

    #[test]
    fn out_of_order_steps_fail() {
        let mut b = NetworkBuilder::new();
        assert!(matches!(b.weights(&WeightInit::Xavier), Err(NetError::Precondition { operation: "weights", .. })));
        assert!(matches!(b.bias(&BiasInit::Constant { weight: 0.0, value: 1.0 }), Err(NetError::Precondition { .. })));
        assert!(matches!(b.build(), Err(NetError::Precondition { operation: "build", .. })));

        let mut b = topology_bound();
        assert!(matches!(b.topology(&[1, 1], &ACT[..2]), Err(NetError::Precondition { .. })));
        assert!(matches!(b.build(), Err(NetError::Precondition { .. })));
    }

    #[test]
    fn failed_step_keeps_the_stage() {
        let mut b = topology_bound();
        let err = b.weights(&WeightInit::Explicit(vec![1.0; 4])).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 6, got: 4, .. }));
        assert_eq!(b.stage(), Stage::TopologyBound);
        b.weights(&WeightInit::Explicit(vec![1.0; 6])).unwrap();

        let bad = BiasInit::Explicit { weights: vec![vec![0.0; 2]], values: vec![vec![1.0; 2]] };
        assert!(b.bias(&bad).is_err());
        assert_eq!(b.stage(), Stage::WeightsBound);
    }

    #[test]
    fn bad_abstraction_window_fails_build_but_keeps_graph() {
        let mut b = topology_bound();
        b.weights(&WeightInit::Xavier).unwrap()
            .bias(&BiasInit::Constant { weight: 0.0, value: 1.0 }).unwrap()
            .abstraction(Some(AbstractionWindow::new(1, 5)));
        assert!(matches!(b.build(), Err(NetError::InvalidConfig(_))));
        assert_eq!(b.stage(), Stage::BiasBound);
        b.abstraction(Some(AbstractionWindow::new(1, 2)));
        assert!(b.build().is_ok());
    }

    #[test]
    fn seeded_builders_agree() {
        let build = || {
            let mut b = NetworkBuilder::new();
            b.seed(9)
                .topology(&[3, 4, 2], &ACT).unwrap()
                .weights(&WeightInit::Uniform { low: -1.0, high: 1.0 }).unwrap()
                .bias(&BiasInit::Uniform { low: -1.0, high: 1.0, value: 1.0 }).unwrap();
            b.build().unwrap()
        };
        let (mut a, mut b) = (build(), build());
        assert_eq!(a.evaluate(&[0.1, 0.2, 0.3]).unwrap(), b.evaluate(&[0.1, 0.2, 0.3]).unwrap());
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let mut b = NetworkBuilder::new();
        assert!(matches!(b.hyperparameters(-1.0, 0.0), Err(NetError::InvalidConfig(_))));
        assert!(b.hyperparameters(0.3, 0.9).is_ok());
    }
}
