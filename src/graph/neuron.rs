use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Deserialize};

/// Opaque handle into the graph's neuron arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Caller-facing identity of a real neuron: (layer index, position in layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NeuronAddress {
    pub layer: usize,
    pub position: usize,
}

impl NeuronAddress {
    pub fn new(layer: usize, position: usize) -> NeuronAddress {
        NeuronAddress { layer, position }
    }
}

impl fmt::Display for NeuronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronKind {
    Real(NeuronAddress),
    /// Constant-output pseudo-neuron feeding exactly one real neuron.
    Bias,
}

/// One directed weighted edge, stored under its source neuron.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edge {
    pub weight: f64,
    /// Last update applied to `weight`; the momentum term reuses it.
    pub previous_update: f64,
}

impl Edge {
    pub fn new(weight: f64) -> Edge {
        Edge { weight, previous_update: 0.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) kind: NeuronKind,
    pub(crate) input: f64,
    pub(crate) output: f64,
    pub(crate) children: BTreeMap<NeuronId, Edge>,
    pub(crate) parents: BTreeSet<NeuronId>,
}

impl Neuron {
    pub(crate) fn real(address: NeuronAddress) -> Neuron {
        Neuron {
            kind: NeuronKind::Real(address),
            input: 0.0,
            output: 0.0,
            children: BTreeMap::new(),
            parents: BTreeSet::new(),
        }
    }

    pub(crate) fn bias(value: f64) -> Neuron {
        Neuron {
            kind: NeuronKind::Bias,
            input: value,
            output: value,
            children: BTreeMap::new(),
            parents: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> NeuronKind {
        self.kind
    }

    pub fn address(&self) -> Option<NeuronAddress> {
        match self.kind {
            NeuronKind::Real(address) => Some(address),
            NeuronKind::Bias => None,
        }
    }

    pub fn is_bias(&self) -> bool {
        self.kind == NeuronKind::Bias
    }

    /// Pre-activation accumulator (or the injected value on layer 0).
    pub fn input(&self) -> f64 {
        self.input
    }

    /// Post-activation value.
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn children(&self) -> impl Iterator<Item = (NeuronId, &Edge)> + '_ {
        self.children.iter().map(|(&id, edge)| (id, edge))
    }

    pub fn parents(&self) -> impl Iterator<Item = NeuronId> + '_ {
        self.parents.iter().copied()
    }

    pub fn edge_to(&self, child: NeuronId) -> Option<&Edge> {
        self.children.get(&child)
    }
}
