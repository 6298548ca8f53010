//! Price and log-return matrices
//!
//! Both are rectangular, row-major, rows = time periods ascending, columns = assets.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Gap-free matrix of strictly positive prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PriceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PriceMatrix {
    /// Build from rows, rejecting ragged, non-finite or non-positive input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> DataResult<Self> {
        let (n_rows, n_cols, data) = flatten(rows)?;
        for (i, &value) in data.iter().enumerate() {
            if value <= 0.0 {
                return Err(DataError::NonPositive {
                    row: i / n_cols,
                    col: i % n_cols,
                    value,
                });
            }
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn assets(&self) -> usize {
        self.cols
    }

    pub fn row(&self, t: usize) -> &[f64] {
        &self.data[t * self.cols..(t + 1) * self.cols]
    }

    /// `ln(p[t+1] / p[t])` per asset, one row shorter than the prices
    pub fn log_returns(&self) -> ReturnMatrix {
        let periods = self.rows.saturating_sub(1);
        let mut data = Vec::with_capacity(periods * self.cols);
        for t in 0..periods {
            let (prev, next) = (self.row(t), self.row(t + 1));
            data.extend(prev.iter().zip(next).map(|(p0, p1)| (p1 / p0).ln()));
        }
        ReturnMatrix {
            periods,
            assets: self.cols,
            data,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|t| self.row(t).to_vec()).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for PriceMatrix {
    type Error = DataError;

    fn try_from(rows: Vec<Vec<f64>>) -> DataResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<PriceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PriceMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Matrix of per-period log-returns (T periods x N assets)
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnMatrix {
    periods: usize,
    assets: usize,
    data: Vec<f64>,
}

impl ReturnMatrix {
    /// Build from rows of log-returns, rejecting ragged or non-finite input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> DataResult<Self> {
        let (periods, assets, data) = flatten(rows)?;
        Ok(Self {
            periods,
            assets,
            data,
        })
    }

    /// Number of periods (`T`)
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Number of assets (`N`)
    pub fn assets(&self) -> usize {
        self.assets
    }

    pub fn row(&self, t: usize) -> &[f64] {
        &self.data[t * self.assets..(t + 1) * self.assets]
    }

    /// Copy of rows `start..end`, with `end` clamped to the horizon
    pub fn slice_rows(&self, start: usize, end: usize) -> ReturnMatrix {
        let end = end.min(self.periods);
        let start = start.min(end);
        ReturnMatrix {
            periods: end - start,
            assets: self.assets,
            data: self.data[start * self.assets..end * self.assets].to_vec(),
        }
    }

    /// Per-period portfolio log-returns `returns[start..end] @ weights`.
    ///
    /// `end` is clamped to the horizon, so a segment running past it is
    /// shorter rather than padded.
    pub fn portfolio_returns(&self, start: usize, end: usize, weights: &[f64]) -> Vec<f64> {
        let end = end.min(self.periods);
        (start.min(end)..end)
            .map(|t| self.row(t).iter().zip(weights).map(|(r, w)| r * w).sum())
            .collect()
    }

    /// Column means over the last `lookback` rows (all rows if fewer, or if 0)
    pub fn mean_over_last(&self, lookback: usize) -> Vec<f64> {
        let n = if lookback == 0 {
            self.periods
        } else {
            lookback.min(self.periods)
        };
        let mut means = vec![0.0; self.assets];
        if n == 0 {
            return means;
        }
        for t in self.periods - n..self.periods {
            for (m, r) in means.iter_mut().zip(self.row(t)) {
                *m += r;
            }
        }
        means.iter_mut().for_each(|m| *m /= n as f64);
        means
    }
}

fn flatten(rows: Vec<Vec<f64>>) -> DataResult<(usize, usize, Vec<f64>)> {
    let n_rows = rows.len();
    let n_cols = rows.first().map(Vec::len).unwrap_or(0);
    if n_rows == 0 || n_cols == 0 {
        return Err(DataError::Empty);
    }

    let mut data = Vec::with_capacity(n_rows * n_cols);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != n_cols {
            return Err(DataError::Ragged {
                row,
                expected: n_cols,
                actual: values.len(),
            });
        }
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(DataError::NonFinite { row, col });
        }
        data.extend(values);
    }
    Ok((n_rows, n_cols, data))
}
