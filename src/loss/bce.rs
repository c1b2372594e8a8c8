pub struct BinaryCrossEntropy;

/// Outputs are kept this far from 0 and 1 so the logs and the gradient stay finite.
const CLAMP: f64 = 1e-12;

fn clamped(p: f64) -> f64 {
    p.clamp(CLAMP, 1.0 - CLAMP)
}

impl BinaryCrossEntropy {
    /// Mean over outputs of -(e·ln o + (1 - e)·ln(1 - o)). Expects outputs in (0, 1).
    pub fn aggregate(expected: &[f64], obtained: &[f64]) -> f64 {
        let n = expected.len().max(1) as f64;
        expected.iter().zip(obtained)
            .map(|(&e, &o)| {
                let o = clamped(o);
                -(e * o.ln() + (1.0 - e) * (1.0 - o).ln())
            })
            .sum::<f64>() / n
    }

    pub fn gradient(expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        expected.iter().zip(obtained)
            .map(|(&e, &o)| {
                let o = clamped(o);
                (o - e) / (o * (1.0 - o))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn saturated_outputs_stay_finite() {
        assert!(BinaryCrossEntropy::aggregate(&[1.0, 0.0], &[0.0, 1.0]).is_finite());
        assert!(BinaryCrossEntropy::gradient(&[1.0], &[0.0])[0].is_finite());
    }

    #[test]
    fn half_output_costs_ln_two() {
        assert_relative_eq!(BinaryCrossEntropy::aggregate(&[1.0], &[0.5]), std::f64::consts::LN_2);
        assert_relative_eq!(BinaryCrossEntropy::gradient(&[1.0], &[0.5])[0], -2.0);
    }
}
