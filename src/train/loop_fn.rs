use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::error::Result;
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::sample::Sample;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::run_training_in_order;

/// Trains `network` for `config.epochs` online passes over `dataset` and
/// returns the statistics of every completed epoch.
///
/// With `config.shuffle`, the sample order is drawn from the network's seed
/// when it was built with one, so seeded runs repeat exactly.
///
/// Stops at the first error; epochs completed before it are already applied
/// to the network.
pub fn train_loop(network: &mut Network, dataset: &[Sample], config: &TrainConfig) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);
    let mut order: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = match network.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        if config.shuffle {
            order.shuffle(&mut rng);
        }

        let train_loss = run_training_in_order(network, dataset, order.iter().copied())?;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        let due = config.log_every > 0 && epoch % config.log_every == 0;
        if due || epoch == config.epochs {
            info!(epoch, total = config.epochs, loss = train_loss, ms = stats.elapsed_ms, "epoch finished");
        }
        history.push(stats);
    }

    Ok(history)
}
