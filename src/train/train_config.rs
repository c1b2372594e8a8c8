/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`   : full online passes over the dataset
/// - `shuffle`  : visit samples in a fresh random order every epoch
/// - `log_every`: emit an `info` event every this many epochs (0 = only the last)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig { epochs, shuffle: false, log_every: 0 }
    }

    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    pub fn log_every(mut self, epochs: usize) -> Self {
        self.log_every = epochs;
        self
    }
}
