use ferrite_graph::{
    train_loop, ActivationFunction, BiasInit, Network, Sample, TrainConfig, WeightInit,
};
use tracing_subscriber::EnvFilter;

fn main() -> ferrite_graph::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut builder = Network::builder();
    builder
        .seed(2016)
        .hyperparameters(0.5, 0.3)?
        .topology(&[2, 2, 1], &[ActivationFunction::Identity, ActivationFunction::Sigmoid, ActivationFunction::Sigmoid])?
        .weights(&WeightInit::Uniform { low: -1.0, high: 1.0 })?
        .bias(&BiasInit::Uniform { low: -1.0, high: 1.0, value: 1.0 })?;
    let mut network = builder.build()?;

    let dataset = vec![
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![0.0, 0.0], vec![0.0]),
    ];

    train_loop(&mut network, &dataset, &TrainConfig::new(5000).log_every(1000))?;

    for sample in &dataset {
        let output = network.evaluate(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4}", sample.input, output[0]);
    }
    Ok(())
}
