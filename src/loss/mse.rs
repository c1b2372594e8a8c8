pub struct MeanSquaredError;

impl MeanSquaredError {
    /// mean((expected - obtained)²)
    pub fn aggregate(expected: &[f64], obtained: &[f64]) -> f64 {
        let n = expected.len().max(1) as f64;
        super::SumSquaredError::aggregate(expected, obtained) / n
    }

    /// (obtained - expected) / n, the factor 2 folded into the learning rate.
    pub fn gradient(expected: &[f64], obtained: &[f64]) -> Vec<f64> {
        let n = expected.len().max(1) as f64;
        expected.iter().zip(obtained)
            .map(|(e, o)| (o - e) / n)
            .collect()
    }
}
