//! Ordinary least-squares fit of `y = slope * x + intercept`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    /// Closed-form fit over `(x, y)` points.
    ///
    /// The slope is 0 when `n * Σx² - (Σx)²` is 0 (fewer than two distinct x
    /// values); the intercept is 0 when there are no points.
    pub fn fit(points: &[(f64, f64)]) -> Self {
        let n = points.len() as f64;
        let (sum_x, sum_y, sum_xy, sum_x2) = points.iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(sx, sy, sxy, sx2), &(x, y)| (sx + x, sy + y, sxy + x * y, sx2 + x * x),
        );

        let denominator = n * sum_x2 - sum_x * sum_x;
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = if points.is_empty() {
            0.0
        } else {
            (sum_y - slope * sum_x) / n
        };

        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
