use rand::Rng;

pub type Matrix = Vec<Vec<i64>>;

/// Fixed 5x5 input used by the matrix demo.
pub const DEMO_MATRIX: [[i64; 5]; 5] = [
    [66, 21, -3, -1, 90],
    [1, 74, -2, 80, -1],
    [10, 30, 20, -50, 91],
    [2, 4, 5, 81, 0],
    [33, 69, -5, 51, 24],
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot take the geometric mean of an empty row")]
    EmptyRow,

    #[error("cannot average an empty list of values")]
    EmptyInput,
}

pub fn demo_matrix() -> Matrix {
    DEMO_MATRIX.iter().map(|row| row.to_vec()).collect()
}

/// Builds a `rows` x `cols` matrix with entries drawn uniformly from `[min, max]`.
pub fn random_matrix(rows: usize, cols: usize, min: i64, max: i64) -> Matrix {
    let mut rng = rand::thread_rng();
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_range(min..=max)).collect())
        .collect()
}

fn check_rectangular<T>(matrix: &[Vec<T>]) -> Result<usize, MatrixError> {
    let cols = matrix.first().map_or(0, Vec::len);
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != cols {
            return Err(MatrixError::Ragged {
                row,
                expected: cols,
                found: values.len(),
            });
        }
    }
    Ok(cols)
}

/// Sorts every column in ascending order with an exchange (bubble) sort.
///
/// Columns are sorted independently, so rows do not stay together. A ragged
/// matrix is rejected before anything is moved.
pub fn bubble_sort_columns<T: PartialOrd>(matrix: &mut [Vec<T>]) -> Result<(), MatrixError> {
    let cols = check_rectangular(matrix)?;
    let rows = matrix.len();

    for col in 0..cols {
        for pass in 0..rows.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..rows - 1 - pass {
                if matrix[j][col] > matrix[j + 1][col] {
                    let (upper, lower) = matrix.split_at_mut(j + 1);
                    std::mem::swap(&mut upper[j][col], &mut lower[0][col]);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
    }
    Ok(())
}

/// Geometric mean of the absolute values in `row`.
pub fn geometric_mean(row: &[i64]) -> Result<f64, MatrixError> {
    if row.is_empty() {
        return Err(MatrixError::EmptyRow);
    }
    if row.contains(&0) {
        return Ok(0.0);
    }
    // Averaging logarithms keeps long rows from overflowing the product.
    let log_sum: f64 = row.iter().map(|x| (x.unsigned_abs() as f64).ln()).sum();
    Ok((log_sum / row.len() as f64).exp())
}

pub fn arithmetic_mean(values: &[f64]) -> Result<f64, MatrixError> {
    if values.is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn row_geometric_means(matrix: &[Vec<i64>]) -> Result<Vec<f64>, MatrixError> {
    matrix.iter().map(|row| geometric_mean(row)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSummary {
    /// `f(i)`: geometric mean of row `i`.
    pub row_means: Vec<f64>,
    /// `F`: arithmetic mean of all `f(i)`.
    pub mean_of_means: f64,
}

impl MatrixSummary {
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "rows": self.row_means.len(),
            "f": self.row_means,
            "F": self.mean_of_means,
        })
        .to_string()
    }
}

pub fn summarize(matrix: &[Vec<i64>]) -> Result<MatrixSummary, MatrixError> {
    let row_means = row_geometric_means(matrix)?;
    let mean_of_means = arithmetic_mean(&row_means)?;
    Ok(MatrixSummary {
        row_means,
        mean_of_means,
    })
}
