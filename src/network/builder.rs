use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{NetError, Result};
use crate::graph::Graph;
use crate::graph::graph::validate_topology;

/// Number of dense edges between consecutive layers: Σ sizeᵢ · sizeᵢ₊₁.
pub fn required_edge_count(sizes: &[usize]) -> usize {
    sizes.windows(2).map(|pair| pair[0] * pair[1]).sum()
}

/// Number of real neurons, which is also the number of bias units.
pub fn neuron_count(sizes: &[usize]) -> usize {
    sizes.iter().sum()
}

/// Builds a fully connected layered graph.
///
/// `flat_weights` is consumed in a fixed order: for each consecutive layer pair,
/// for each target neuron in position order, for each source neuron in position
/// order. Its length must equal [`required_edge_count`]; a short or long list is
/// a `DimensionMismatch`, never a silent truncation.
pub fn build_dense(
    sizes: &[usize],
    activations: &[ActivationFunction],
    flat_weights: &[f64],
) -> Result<Graph> {
    validate_topology(sizes)?;
    let required = required_edge_count(sizes);
    if flat_weights.len() != required {
        return Err(NetError::mismatch("dense weights", required, flat_weights.len()));
    }

    let mut graph = Graph::with_topology(sizes, activations)?;
    let mut weights = flat_weights.iter().copied();
    for layer in 1..graph.layer_count() {
        let sources = graph.layers[layer - 1].clone();
        let targets = graph.layers[layer].clone();
        for &target in &targets {
            for (&source, weight) in sources.iter().zip(weights.by_ref()) {
                graph.link(source, target, weight);
            }
        }
    }

    debug!(?sizes, edges = required, "built dense graph");
    Ok(graph)
}

/// Gives every real neuron its own bias unit: a pseudo-neuron whose output is
/// fixed to `bias_values[layer][position]`, feeding that neuron alone through a
/// trainable edge of weight `bias_weights[layer][position]`.
///
/// Both tables must be shaped one row per layer, one entry per neuron. The
/// shape is checked in full before anything is wired.
pub fn wire_bias(graph: &mut Graph, bias_weights: &[Vec<f64>], bias_values: &[Vec<f64>]) -> Result<()> {
    if graph.is_biased() {
        return Err(NetError::precondition("wire_bias", "bias units are already wired"));
    }
    check_shape(graph, "bias weight layers", "bias weights in layer", bias_weights)?;
    check_shape(graph, "bias value layers", "bias values in layer", bias_values)?;

    for layer in 0..graph.layer_count() {
        let targets = graph.layers[layer].clone();
        for (position, target) in targets.into_iter().enumerate() {
            graph.attach_bias(target, bias_values[layer][position], bias_weights[layer][position]);
        }
    }

    debug!(units = graph.bias_count(), "wired bias units");
    Ok(())
}

fn check_shape(graph: &Graph, rows: &'static str, row: &'static str, table: &[Vec<f64>]) -> Result<()> {
    if table.len() != graph.layer_count() {
        return Err(NetError::mismatch(rows, graph.layer_count(), table.len()));
    }
    for (layer, entries) in table.iter().enumerate() {
        let size = graph.layer(layer).len();
        if entries.len() != size {
            return Err(NetError::mismatch(row, size, entries.len()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NeuronAddress;

    fn identity(n: usize) -> Vec<ActivationFunction> {
        vec![ActivationFunction::Identity; n]
    }

    #[test]
    fn counts() {
        assert_eq!(required_edge_count(&[2, 2, 1]), 6);
        assert_eq!(required_edge_count(&[3, 4, 5, 2]), 12 + 20 + 10);
        assert_eq!(neuron_count(&[3, 4, 5, 2]), 14);
    }

    #[test]
    fn weights_are_consumed_target_major() {
        let weights: Vec<f64> = (1..=6).map(f64::from).collect();
        let g = build_dense(&[3, 2], &identity(2), &weights).unwrap();
        let w = |s, t| g.weight(NeuronAddress::new(0, s), NeuronAddress::new(1, t)).unwrap();
        assert_eq!([w(0, 0), w(1, 0), w(2, 0)], [1.0, 2.0, 3.0]);
        assert_eq!([w(0, 1), w(1, 1), w(2, 1)], [4.0, 5.0, 6.0]);
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn input_layer_has_no_incoming_edges() {
        let g = build_dense(&[2, 2, 1], &identity(3), &[0.5; 6]).unwrap();
        for position in 0..2 {
            assert_eq!(g.at(NeuronAddress::new(0, position)).unwrap().parents().count(), 0);
        }
    }

    #[test]
    fn weight_count_mismatch_is_an_error() {
        for len in [5, 7] {
            let err = build_dense(&[2, 2, 1], &identity(3), &vec![1.0; len]).unwrap_err();
            assert!(matches!(err, NetError::DimensionMismatch { expected: 6, .. }));
        }
    }

    #[test]
    fn activation_count_mismatch_is_an_error() {
        let err = build_dense(&[2, 2, 1], &identity(2), &[1.0; 6]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 3, got: 2, .. }));
    }

    #[test]
    fn wires_one_bias_unit_per_neuron() {
        let mut g = build_dense(&[2, 2, 1], &identity(3), &[1.0; 6]).unwrap();
        let weights = vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5]];
        let values = vec![vec![1.0, 1.0], vec![-1.0, 2.0], vec![1.0]];
        wire_bias(&mut g, &weights, &values).unwrap();
        assert_eq!(g.bias_count(), g.neuron_count());
        assert_eq!(g.bias_of(NeuronAddress::new(1, 1)).unwrap(), Some((2.0, 0.4)));
        let n = g.at(NeuronAddress::new(2, 0)).unwrap();
        assert_eq!(n.parents().filter(|&p| g.neuron(p).unwrap().is_bias()).count(), 1);
    }

    #[test]
    fn misshaped_bias_leaves_graph_untouched() {
        let mut g = build_dense(&[2, 1], &identity(2), &[1.0; 2]).unwrap();
        let weights = vec![vec![0.1, 0.2], vec![0.3, 0.4]];
        let values = vec![vec![1.0, 1.0], vec![1.0]];
        let err = wire_bias(&mut g, &weights, &values).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 1, got: 2, .. }));
        assert!(!g.is_biased());

        let err = wire_bias(&mut g, &weights[..1], &values[..1]).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn bias_cannot_be_wired_twice() {
        let mut g = build_dense(&[1, 1], &identity(2), &[1.0]).unwrap();
        let table = vec![vec![0.0], vec![0.0]];
        wire_bias(&mut g, &table, &table).unwrap();
        let err = wire_bias(&mut g, &table, &table).unwrap_err();
        assert!(matches!(err, NetError::Precondition { .. }));
        assert_eq!(g.bias_count(), 2);
    }
}
