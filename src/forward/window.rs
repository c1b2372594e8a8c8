use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::graph::Graph;

/// Inclusive layer sub-range `[start, end]` a pass is restricted to.
///
/// A forward pass recomputes layers `start + 1 ..= end`; layer `start` acts as
/// the pass's input. Training restricted to a window updates only edges that
/// feed layers `start + 1 ..= end` and reads its outputs from layer `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractionWindow {
    pub start: usize,
    pub end: usize,
}

impl AbstractionWindow {
    pub fn new(start: usize, end: usize) -> AbstractionWindow {
        AbstractionWindow { start, end }
    }

    /// The whole network, input layer to output layer.
    pub fn full(graph: &Graph) -> AbstractionWindow {
        AbstractionWindow { start: 0, end: graph.output_layer() }
    }

    pub fn validate(&self, graph: &Graph) -> Result<()> {
        if self.start >= self.end || self.end >= graph.layer_count() {
            return Err(NetError::InvalidConfig(format!(
                "abstraction window [{}, {}] does not fit {} layers",
                self.start,
                self.end,
                graph.layer_count()
            )));
        }
        Ok(())
    }
}
