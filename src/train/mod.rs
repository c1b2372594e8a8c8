pub mod backprop;
pub mod epoch_stats;
pub mod loop_fn;
pub mod sample;
pub mod train_config;
pub mod trainer;

pub use backprop::{train_on_sample, train_on_window};
pub use epoch_stats::EpochStats;
pub use loop_fn::train_loop;
pub use sample::Sample;
pub use train_config::TrainConfig;
pub use trainer::run_training;
