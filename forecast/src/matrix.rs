use crate::error::ForecastError;
use ndarray::{Array1, Array2};
use polars::prelude::*;

fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ForecastError> {
    let series = df
        .column(name)
        .map_err(|_| ForecastError::MissingColumn(name.to_string()))?;
    let values = series.f64()?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Row-major feature matrix for the named columns, rows in table order.
pub fn feature_matrix(df: &DataFrame, columns: &[String]) -> Result<Array2<f64>, ForecastError> {
    let rows = df.height();
    let mut gathered = Vec::with_capacity(columns.len());
    for name in columns {
        gathered.push(column_values(df, name)?);
    }

    let mut data = Vec::with_capacity(rows * columns.len());
    for r in 0..rows {
        for column in &gathered {
            data.push(column[r]);
        }
    }
    Ok(Array2::from_shape_vec((rows, columns.len()), data)?)
}

/// One target column as a vector, rows in table order.
pub fn target_vector(df: &DataFrame, name: &str) -> Result<Array1<f64>, ForecastError> {
    Ok(Array1::from_vec(column_values(df, name)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_is_row_major_in_table_order() {
        let df = DataFrame::new(vec![
            Series::new("a", vec![1.0, 2.0, 3.0]),
            Series::new("b", vec![10.0, 20.0, 30.0]),
        ])
        .unwrap();
        let x = feature_matrix(&df, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(x.dim(), (3, 2));
        assert_eq!(x[[0, 0]], 1.0);
        assert_eq!(x[[0, 1]], 10.0);
        assert_eq!(x[[2, 1]], 30.0);
    }

    #[test]
    fn missing_column_is_named_in_the_error() {
        let df = DataFrame::new(vec![Series::new("a", vec![1.0])]).unwrap();
        let err = target_vector(&df, "pct_chg9").unwrap_err();
        assert!(matches!(err, ForecastError::MissingColumn(name) if name == "pct_chg9"));
    }
}
