use tracing::trace;

use crate::error::{NetError, Result};
use crate::network::Network;
use crate::train::sample::Sample;

/// One online pass over `dataset` in order: each sample is evaluated,
/// backpropagated and applied before the next one is looked at.
///
/// Returns the mean of the per-sample losses. An empty dataset is rejected
/// rather than averaged to NaN. A mis-sized sample stops the pass with a
/// `DimensionMismatch`; samples before it have already been applied.
pub fn run_training(network: &mut Network, dataset: &[Sample]) -> Result<f64> {
    run_training_in_order(network, dataset, 0..dataset.len())
}

pub(crate) fn run_training_in_order(
    network: &mut Network,
    dataset: &[Sample],
    order: impl IntoIterator<Item = usize>,
) -> Result<f64> {
    if dataset.is_empty() {
        return Err(NetError::InvalidConfig("training dataset is empty".into()));
    }
    let input_size = network.graph().layer(0).len();

    let mut total_loss = 0.0;
    for idx in order {
        let sample = &dataset[idx];
        if sample.input.len() != input_size {
            return Err(NetError::mismatch("sample input", input_size, sample.input.len()));
        }
        let loss = network.train_sample(sample)?;
        trace!(sample = idx, loss, "trained sample");
        total_loss += loss;
    }

    Ok(total_loss / dataset.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::graph::NeuronAddress;
    use crate::init::{BiasInit, WeightInit};
    use crate::network::NetworkBuilder;
    use approx::assert_relative_eq;

    fn linear() -> Network {
        let mut b = NetworkBuilder::new();
        b.topology(&[1, 1], &[ActivationFunction::Identity; 2]).unwrap()
            .weights(&WeightInit::Explicit(vec![0.0])).unwrap()
            .bias(&BiasInit::Constant { weight: 0.0, value: 1.0 }).unwrap()
            .hyperparameters(0.05, 0.0).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn returns_mean_loss_of_the_pass() {
        let mut n = linear();
        let data = vec![Sample::new(vec![1.0], vec![1.0]), Sample::new(vec![1.0], vec![1.0])];
        let avg = run_training(&mut n, &data).unwrap();
        // first sample: loss 1; after the update out = 0.05 + 0.05 = 0.1, loss 0.81
        assert_relative_eq!(avg, (1.0 + 0.81) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn learns_a_line() {
        let mut n = linear();
        let data: Vec<Sample> = (0..5)
            .map(|i| {
                let x = i as f64 / 4.0;
                Sample::new(vec![x], vec![2.0 * x - 1.0])
            })
            .collect();
        let mut loss = f64::MAX;
        for _ in 0..500 {
            loss = run_training(&mut n, &data).unwrap();
        }
        assert!(loss < 1e-4, "loss {loss}");
        let w = n.weight(NeuronAddress::new(0, 0), NeuronAddress::new(1, 0)).unwrap();
        assert_relative_eq!(w, 2.0, epsilon = 1e-2);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut n = linear();
        assert!(matches!(run_training(&mut n, &[]), Err(NetError::InvalidConfig(_))));
    }

    #[test]
    fn mis_sized_sample_is_rejected() {
        let mut n = linear();
        let data = vec![Sample::new(vec![1.0, 2.0], vec![1.0])];
        let err = run_training(&mut n, &data).unwrap_err();
        assert!(matches!(err, NetError::DimensionMismatch { expected: 1, got: 2, .. }));
        assert_eq!(n.weight(NeuronAddress::new(0, 0), NeuronAddress::new(1, 0)), Some(0.0));
    }
}
