use crate::error::{NetError, Result};
use crate::graph::Edge;

/// Online gradient descent with momentum, applied one edge at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
    momentum: f64,
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd { learning_rate: 0.1, momentum: 0.0 }
    }
}

impl Sgd {
    pub fn new(learning_rate: f64, momentum: f64) -> Result<Sgd> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetError::InvalidConfig(format!("learning rate must be finite and positive, got {learning_rate}")));
        }
        if !(momentum.is_finite() && (0.0..1.0).contains(&momentum)) {
            return Err(NetError::InvalidConfig(format!("momentum must lie in [0, 1), got {momentum}")));
        }
        Ok(Sgd { learning_rate, momentum })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// update = lr · δ(target) · source output + momentum · previous update.
    /// The update is added to the weight and remembered for the next call.
    pub fn step(&self, edge: &mut Edge, target_delta: f64, source_output: f64) -> f64 {
        let update = self.learning_rate * target_delta * source_output + self.momentum * edge.previous_update;
        edge.weight += update;
        edge.previous_update = update;
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn momentum_carries_the_previous_update() {
        let sgd = Sgd::new(0.5, 0.9).unwrap();
        let mut edge = Edge::new(1.0);
        assert_relative_eq!(sgd.step(&mut edge, 2.0, 0.1), 0.1, epsilon = 1e-12);
        assert_relative_eq!(edge.weight, 1.1, epsilon = 1e-12);
        // no gradient this time: only momentum moves the weight
        assert_relative_eq!(sgd.step(&mut edge, 0.0, 0.1), 0.09, epsilon = 1e-12);
        assert_relative_eq!(edge.weight, 1.19, epsilon = 1e-12);
        assert_relative_eq!(edge.previous_update, 0.09, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        assert!(Sgd::new(0.0, 0.0).is_err());
        assert!(Sgd::new(f64::NAN, 0.0).is_err());
        assert!(Sgd::new(0.1, 1.0).is_err());
        assert!(Sgd::new(0.1, -0.1).is_err());
        assert!(Sgd::new(0.1, 0.0).is_ok());
    }

    #[test]
    fn accessors_report_validated_values() {
        let sgd = Sgd::new(0.25, 0.5).unwrap();
        assert_eq!((sgd.learning_rate(), sgd.momentum()), (0.25, 0.5));
        let default = Sgd::default();
        assert_eq!((default.learning_rate(), default.momentum()), (0.1, 0.0));
    }
}
