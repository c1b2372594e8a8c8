pub mod evaluator;
pub mod window;

pub use evaluator::{evaluate, evaluate_window, read_layer, read_outputs};
pub use window::AbstractionWindow;
