pub struct HuberError;

/// Quadratic below this residual, linear above it.
const DELTA: f64 = 1.0;

impl HuberError {
    pub fn aggregate(expected: &[f64], obtained: &[f64]) -> f64 {
        let n = expected.len().max(1) as f64;
        expected.iter().zip(obtained)
            .map(|(e, o)| {
                let r = (o - e).abs();
                if r <= DELTA { 0.5 * r * r } else { DELTA * (r - 0.5 * DELTA) }
            })
            .sum::<f64>() / n
    }

    pub fn gradient(expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        expected.iter().zip(obtained)
            .map(|(e, o)| (o - e).clamp(-DELTA, DELTA))
            .collect()
    }
}
