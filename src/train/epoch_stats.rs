use serde::{Serialize, Deserialize};

/// Per-epoch training statistics collected by `train_loop`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean per-sample loss over this epoch, each sample scored before its update.
    pub train_loss: f64,
    pub elapsed_ms: u64,
}
