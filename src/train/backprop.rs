use tracing::trace;

use crate::error::{NetError, Result};
use crate::forward::{read_layer, AbstractionWindow};
use crate::graph::{Graph, NeuronId, NeuronKind};
use crate::loss::ErrorFunction;
use crate::optim::Sgd;

/// One online backprop step over the whole network. See [`train_on_window`].
pub fn train_on_sample(
    graph: &mut Graph,
    expected: &[f64],
    optimizer: &Sgd,
    error_function: ErrorFunction,
) -> Result<f64> {
    let window = AbstractionWindow::full(graph);
    train_on_window(graph, expected, optimizer, error_function, window)
}

/// Backpropagates the error of the last forward pass and updates weights in
/// place. Does not evaluate: the caller runs the forward pass first.
///
/// Outputs are read from layer `window.end` and `expected` must match its size.
/// Deltas are computed for layers `end` down to `start + 1`, all of them before
/// any weight moves; then every edge feeding those layers (bias edges and
/// hand-connected edges included) takes one [`Sgd::step`].
///
/// A hidden neuron's delta sums over all of its children. Children in the same
/// or an earlier layer (recurrent edges) have no delta yet in this sweep and
/// contribute nothing.
///
/// Returns this sample's loss, measured before the update.
pub fn train_on_window(
    graph: &mut Graph,
    expected: &[f64],
    optimizer: &Sgd,
    error_function: ErrorFunction,
    window: AbstractionWindow,
) -> Result<f64> {
    if !graph.is_biased() {
        return Err(NetError::precondition("train", "bias units are not wired"));
    }
    if !graph.primed {
        return Err(NetError::precondition("train", "no forward pass has been run"));
    }
    window.validate(graph)?;
    let out_size = graph.layer(window.end).len();
    if expected.len() != out_size {
        return Err(NetError::mismatch("expected output", out_size, expected.len()));
    }

    let obtained = read_layer(graph, window.end);
    let loss = error_function.aggregate(expected, &obtained);
    let gradient = error_function.gradient(expected, &obtained);

    let deltas = compute_deltas(graph, &gradient, window);
    apply_updates(graph, &deltas, optimizer, window);

    trace!(loss, "backprop step");
    Ok(loss)
}

fn compute_deltas(graph: &Graph, gradient: &[f64], window: AbstractionWindow) -> Vec<f64> {
    let mut deltas = vec![0.0; graph.neurons.len()];

    if let Some(activation) = graph.activation(window.end) {
        for (&id, g) in graph.layer(window.end).iter().zip(gradient) {
            let n = &graph.neurons[id.0];
            deltas[id.0] = -g * activation.differential(n.input, n.output);
        }
    }

    for layer in (window.start + 1..window.end).rev() {
        let Some(activation) = graph.activation(layer) else { continue };
        for &id in graph.layer(layer) {
            let n = &graph.neurons[id.0];
            let downstream: f64 = n.children
                .iter()
                .filter(|(child, _)| is_downstream(graph, **child, layer))
                .map(|(child, edge)| deltas[child.0] * edge.weight)
                .sum();
            deltas[id.0] = activation.differential(n.input, n.output) * downstream;
        }
    }

    deltas
}

/// Only children in a later layer carry a delta in this sweep.
fn is_downstream(graph: &Graph, child: NeuronId, layer: usize) -> bool {
    matches!(graph.neurons[child.0].kind, NeuronKind::Real(address) if address.layer > layer)
}

fn apply_updates(graph: &mut Graph, deltas: &[f64], optimizer: &Sgd, window: AbstractionWindow) {
    for layer in window.start + 1..=window.end {
        for i in 0..graph.layers[layer].len() {
            let target = graph.layers[layer][i];
            let parents: Vec<NeuronId> = graph.neurons[target.0].parents.iter().copied().collect();
            for parent in parents {
                let source = &mut graph.neurons[parent.0];
                let source_output = source.output;
                if let Some(edge) = source.children.get_mut(&target) {
                    optimizer.step(edge, deltas[target.0], source_output);
                }
            }
        }
    }
}
