use crate::error::ForecastError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

/// Seam between the pipeline and whatever actually fits the per-horizon
/// models. Anything with a fit/predict pair plugs in here.
pub trait Regressor {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<(), ForecastError>;
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ForecastError>;
}

/// Ridge regression solved through the normal equations with an intercept
/// term. The intercept is not penalized.
pub struct RidgeRegressor {
    lambda: f64,
    /// `[intercept, coefficients...]` once fitted.
    weights: Option<Array1<f64>>,
}

impl RidgeRegressor {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            weights: None,
        }
    }
}

impl Regressor for RidgeRegressor {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<(), ForecastError> {
        let (rows, cols) = x.dim();
        let mut design = Array2::ones((rows, cols + 1));
        design.slice_mut(s![.., 1..]).assign(&x);

        let mut gram = design.t().dot(&design);
        for j in 1..=cols {
            gram[[j, j]] += self.lambda;
        }
        let moment = design.t().dot(&y);

        self.weights = Some(solve(gram, moment)?);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ForecastError> {
        let weights = self.weights.as_ref().ok_or(ForecastError::NotFitted)?;
        let (rows, cols) = x.dim();
        let mut design = Array2::ones((rows, cols + 1));
        design.slice_mut(s![.., 1..]).assign(&x);
        Ok(design.dot(weights))
    }
}

/// Gaussian elimination with partial pivoting. The systems here are tiny
/// (one row/column per feature), so no factorization crate is warranted.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, ForecastError> {
    let n = b.len();

    for k in 0..n {
        let mut pivot = k;
        for i in k + 1..n {
            if a[[i, k]].abs() > a[[pivot, k]].abs() {
                pivot = i;
            }
        }
        if a[[pivot, k]].abs() < 1e-12 {
            return Err(ForecastError::SingularSystem);
        }
        if pivot != k {
            for j in 0..n {
                a.swap([k, j], [pivot, j]);
            }
            b.swap(k, pivot);
        }

        for i in k + 1..n {
            let factor = a[[i, k]] / a[[k, k]];
            for j in k..n {
                a[[i, j]] -= factor * a[[k, j]];
            }
            b[i] -= factor * b[k];
        }
    }

    let mut x = Array1::zeros(n);
    for k in (0..n).rev() {
        let mut sum = b[k];
        for j in k + 1..n {
            sum -= a[[k, j]] * x[j];
        }
        x[k] = sum / a[[k, k]];
    }
    Ok(x)
}
