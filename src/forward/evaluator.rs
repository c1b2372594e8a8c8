use crate::error::{NetError, Result};
use crate::forward::window::AbstractionWindow;
use crate::graph::{Graph, NeuronId};

/// Full forward pass: loads `input` into layer 0 and recomputes every later layer.
pub fn evaluate(graph: &mut Graph, input: &[f64]) -> Result<()> {
    let window = AbstractionWindow::full(graph);
    evaluate_window(graph, Some(input), window)
}

/// Forward pass restricted to `window`.
///
/// Layer `window.start` is the pass's input. `Some(values)` overwrites that
/// layer's outputs (for `start == 0` this is the ordinary input vector);
/// `None` reuses whatever the previous pass left there, which is how a second,
/// narrower pass builds on the intermediate outputs of a full one. Layers
/// `start + 1 ..= end` are then recomputed in increasing order; layers outside
/// the window keep their values.
pub fn evaluate_window(graph: &mut Graph, input: Option<&[f64]>, window: AbstractionWindow) -> Result<()> {
    window.validate(graph)?;
    match input {
        Some(values) => load_layer(graph, window.start, values)?,
        None if !graph.primed => {
            return Err(NetError::precondition(
                "evaluate_window",
                "no earlier pass left outputs to reuse; supply the window's input",
            ));
        }
        None => {}
    }

    for layer in window.start + 1..=window.end {
        propagate_layer(graph, layer);
    }
    Ok(())
}

/// Outputs of the last layer, in position order.
pub fn read_outputs(graph: &Graph) -> Vec<f64> {
    read_layer(graph, graph.output_layer())
}

/// Outputs of one layer, in position order; empty for an unknown layer.
pub fn read_layer(graph: &Graph, layer: usize) -> Vec<f64> {
    graph.layer(layer)
        .iter()
        .map(|id| graph.neurons[id.0].output)
        .collect()
}

fn load_layer(graph: &mut Graph, layer: usize, values: &[f64]) -> Result<()> {
    let size = graph.layer(layer).len();
    if values.len() != size {
        let what = if layer == 0 { "input vector" } else { "frozen layer values" };
        return Err(NetError::mismatch(what, size, values.len()));
    }
    for (i, &value) in values.iter().enumerate() {
        let id = graph.layers[layer][i];
        let neuron = &mut graph.neurons[id.0];
        if layer == 0 {
            neuron.input = value;
        }
        neuron.output = value;
    }
    graph.primed = true;
    Ok(())
}

/// Every neuron of the layer reads only the current outputs of its parents,
/// so all sums are taken before any neuron of the layer is overwritten.
fn propagate_layer(graph: &mut Graph, layer: usize) {
    let Some(activation) = graph.activation(layer) else { return };
    let snapshot: &Graph = graph;
    let sums: Vec<f64> = snapshot.layer(layer)
        .iter()
        .map(|&id| weighted_sum(snapshot, id))
        .collect();

    for (i, sum) in sums.into_iter().enumerate() {
        let id = graph.layers[layer][i];
        let neuron = &mut graph.neurons[id.0];
        neuron.input = sum;
        neuron.output = activation.apply(sum);
    }
}

/// Σ parent.output · weight(parent → id), bias unit included.
fn weighted_sum(graph: &Graph, id: NeuronId) -> f64 {
    graph.neurons[id.0]
        .parents
        .iter()
        .map(|parent| {
            let source = &graph.neurons[parent.0];
            source.children.get(&id).map_or(0.0, |edge| source.output * edge.weight)
        })
        .sum()
}
