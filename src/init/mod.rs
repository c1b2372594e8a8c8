pub mod weight_init;

pub use weight_init::{BiasInit, BiasTable, WeightInit};
