pub mod error_function;
pub mod sse;
pub mod mse;
pub mod mae;
pub mod huber;
pub mod bce;

pub use error_function::ErrorFunction;
pub use sse::SumSquaredError;
pub use mse::MeanSquaredError;
pub use mae::MeanAbsoluteError;
pub use huber::HuberError;
pub use bce::BinaryCrossEntropy;
