use std::collections::BTreeMap;

use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::graph::neuron::{Edge, Neuron, NeuronAddress, NeuronId};

/// Arena of neurons and the directed weighted edges between them.
///
/// Real neurons are addressed by (layer, position); bias pseudo-neurons live in
/// the same arena but are reachable only through the neuron they feed. Edges are
/// stored under their source as a `child -> Edge` map, with a back-reference in
/// the child's parent set. Both are ordered, so traversal order (and therefore
/// floating-point summation order) is deterministic.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) neurons: Vec<Neuron>,
    pub(crate) layers: Vec<Vec<NeuronId>>,
    activations: Vec<ActivationFunction>,
    /// Real neuron -> its bias unit.
    bias_units: BTreeMap<NeuronId, NeuronId>,
    /// Set once layer 0 has received an input vector.
    pub(crate) primed: bool,
}

impl Graph {
    /// Creates one unconnected neuron per (layer, position).
    pub(crate) fn with_topology(sizes: &[usize], activations: &[ActivationFunction]) -> Result<Graph> {
        validate_topology(sizes)?;
        if activations.len() != sizes.len() {
            return Err(NetError::mismatch("activations per layer", sizes.len(), activations.len()));
        }

        let mut neurons = Vec::with_capacity(sizes.iter().sum());
        let mut layers = Vec::with_capacity(sizes.len());
        for (layer, &size) in sizes.iter().enumerate() {
            let ids = (0..size)
                .map(|position| {
                    neurons.push(Neuron::real(NeuronAddress::new(layer, position)));
                    NeuronId(neurons.len() - 1)
                })
                .collect();
            layers.push(ids);
        }

        Ok(Graph {
            neurons,
            layers,
            activations: activations.to_vec(),
            bias_units: BTreeMap::new(),
            primed: false,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn output_layer(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    pub fn layer_size(&self, layer: usize) -> Option<usize> {
        self.layers.get(layer).map(Vec::len)
    }

    /// Handles of a layer's neurons in position order; empty for an unknown layer.
    pub fn layer(&self, layer: usize) -> &[NeuronId] {
        self.layers.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn activation(&self, layer: usize) -> Option<ActivationFunction> {
        self.activations.get(layer).copied()
    }

    /// Number of real (non-bias) neurons.
    pub fn neuron_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    pub fn bias_count(&self) -> usize {
        self.bias_units.len()
    }

    pub fn is_biased(&self) -> bool {
        !self.bias_units.is_empty()
    }

    /// Edges between real neurons, dense and hand-connected alike.
    pub fn edge_count(&self) -> usize {
        self.neurons.iter()
            .filter(|n| !n.is_bias())
            .map(|n| n.children.len())
            .sum()
    }

    pub fn id(&self, address: NeuronAddress) -> Result<NeuronId> {
        self.layers
            .get(address.layer)
            .and_then(|layer| layer.get(address.position))
            .copied()
            .ok_or(NetError::UnknownNeuron(address))
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.0)
    }

    pub fn at(&self, address: NeuronAddress) -> Result<&Neuron> {
        let id = self.id(address)?;
        Ok(&self.neurons[id.0])
    }

    pub fn weight(&self, from: NeuronAddress, to: NeuronAddress) -> Option<f64> {
        let from = self.id(from).ok()?;
        let to = self.id(to).ok()?;
        self.neurons[from.0].edge_to(to).map(|edge| edge.weight)
    }

    /// The bias unit feeding `address`, as (bias value, bias weight).
    pub fn bias_of(&self, address: NeuronAddress) -> Result<Option<(f64, f64)>> {
        let id = self.id(address)?;
        Ok(self.bias_units.get(&id).and_then(|&unit| {
            let unit = &self.neurons[unit.0];
            unit.edge_to(id).map(|edge| (unit.output, edge.weight))
        }))
    }

    /// Adds (or re-weights) a directed edge between two real neurons, regardless
    /// of layering. Recurrent and skip edges are allowed. Re-weighting an existing
    /// edge also clears its momentum history.
    pub fn connect(&mut self, from: NeuronAddress, to: NeuronAddress, weight: f64) -> Result<()> {
        let source = self.id(from)?;
        let target = self.id(to)?;
        if let Some(previous) = self.link(source, target, weight) {
            debug!(%from, %to, old = previous.weight, new = weight, "re-weighted existing edge");
        } else {
            debug!(%from, %to, weight, "connected edge");
        }
        Ok(())
    }

    /// Removes exactly the edge `from -> to`. A missing edge is a `GraphEdit`
    /// error and leaves the graph unchanged.
    pub fn disconnect(&mut self, from: NeuronAddress, to: NeuronAddress) -> Result<Edge> {
        let source = self.id(from)?;
        let target = self.id(to)?;
        let edge = self.neurons[source.0]
            .children
            .remove(&target)
            .ok_or(NetError::GraphEdit { from, to })?;
        self.neurons[target.0].parents.remove(&source);
        debug!(%from, %to, weight = edge.weight, "disconnected edge");
        Ok(edge)
    }

    pub(crate) fn link(&mut self, source: NeuronId, target: NeuronId, weight: f64) -> Option<Edge> {
        let previous = self.neurons[source.0].children.insert(target, Edge::new(weight));
        self.neurons[target.0].parents.insert(source);
        previous
    }

    /// Appends a bias pseudo-neuron with a fixed output feeding `target` only.
    pub(crate) fn attach_bias(&mut self, target: NeuronId, value: f64, weight: f64) {
        self.neurons.push(Neuron::bias(value));
        let unit = NeuronId(self.neurons.len() - 1);
        self.link(unit, target, weight);
        self.bias_units.insert(target, unit);
    }
}

pub(crate) fn validate_topology(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(NetError::InvalidTopology(format!(
            "need at least 2 layers, got {}",
            sizes.len()
        )));
    }
    if let Some(layer) = sizes.iter().position(|&s| s == 0) {
        return Err(NetError::InvalidTopology(format!("layer {layer} has no neurons")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(sizes: &[usize]) -> Graph {
        let activations = vec![ActivationFunction::Identity; sizes.len()];
        Graph::with_topology(sizes, &activations).unwrap()
    }

    #[test]
    fn addresses_are_unique_and_ordered() {
        let g = graph(&[2, 3, 1]);
        assert_eq!(g.neuron_count(), 6);
        assert_eq!(g.sizes(), vec![2, 3, 1]);
        let id = g.id(NeuronAddress::new(1, 2)).unwrap();
        assert_eq!(g.neuron(id).unwrap().address(), Some(NeuronAddress::new(1, 2)));
        assert_ne!(g.id(NeuronAddress::new(0, 0)).unwrap(), g.id(NeuronAddress::new(0, 1)).unwrap());
    }

    #[test]
    fn rejects_degenerate_topologies() {
        assert!(matches!(
            Graph::with_topology(&[3], &[ActivationFunction::Identity]),
            Err(NetError::InvalidTopology(_))
        ));
        assert!(matches!(
            Graph::with_topology(&[3, 0, 1], &[ActivationFunction::Identity; 3]),
            Err(NetError::InvalidTopology(_))
        ));
        assert!(matches!(
            Graph::with_topology(&[3, 1], &[ActivationFunction::Identity]),
            Err(NetError::DimensionMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn unknown_address_is_reported() {
        let g = graph(&[2, 1]);
        let missing = NeuronAddress::new(1, 5);
        assert!(matches!(g.id(missing), Err(NetError::UnknownNeuron(a)) if a == missing));
    }

    #[test]
    fn connect_and_disconnect_keep_both_directions_in_sync() {
        let mut g = graph(&[1, 1, 1]);
        let (a, c) = (NeuronAddress::new(2, 0), NeuronAddress::new(1, 0));
        g.connect(a, c, 0.5).unwrap();
        assert_eq!(g.weight(a, c), Some(0.5));
        let child = g.id(c).unwrap();
        assert!(g.neuron(child).unwrap().parents().any(|p| p == g.id(a).unwrap()));

        let removed = g.disconnect(a, c).unwrap();
        assert_eq!(removed.weight, 0.5);
        assert_eq!(g.weight(a, c), None);
        assert_eq!(g.neuron(child).unwrap().parents().count(), 0);
    }

    #[test]
    fn disconnect_of_missing_edge_fails_without_side_effects() {
        let mut g = graph(&[1, 1]);
        let (a, b) = (NeuronAddress::new(0, 0), NeuronAddress::new(1, 0));
        g.connect(a, b, 2.0).unwrap();
        let err = g.disconnect(b, a).unwrap_err();
        assert!(matches!(err, NetError::GraphEdit { from, to } if from == b && to == a));
        assert_eq!(g.weight(a, b), Some(2.0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn reconnect_overwrites_weight_and_momentum() {
        let mut g = graph(&[1, 1]);
        let (a, b) = (NeuronAddress::new(0, 0), NeuronAddress::new(1, 0));
        g.connect(a, b, 1.0).unwrap();
        let (sa, sb) = (g.id(a).unwrap(), g.id(b).unwrap());
        g.neurons[sa.0].children.get_mut(&sb).unwrap().previous_update = 0.3;
        g.connect(a, b, -1.0).unwrap();
        assert_eq!(g.neuron(sa).unwrap().edge_to(sb), Some(&Edge::new(-1.0)));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn bias_units_feed_exactly_one_neuron() {
        let mut g = graph(&[1, 2]);
        let target = g.id(NeuronAddress::new(1, 1)).unwrap();
        g.attach_bias(target, 1.0, 0.25);
        assert_eq!(g.bias_of(NeuronAddress::new(1, 1)).unwrap(), Some((1.0, 0.25)));
        assert_eq!(g.bias_of(NeuronAddress::new(1, 0)).unwrap(), None);
        assert_eq!(g.bias_count(), 1);
        // bias edges are not counted among real edges
        assert_eq!(g.edge_count(), 0);
    }
}
