use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense block of weights for one connection layer.
///
/// `data[k][j]` is the weight on the edge from source unit `k` to
/// destination unit `j`, so `rows` is the source layer width and `cols` the
/// destination layer width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently and uniformly from `[min, max)`.
    ///
    /// A degenerate range (`min == max`) fills the block with `min`.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, min: f64, max: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill_uniform(min, max, rng);
        res
    }

    pub fn fill_uniform<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) {
        for row in &mut self.data {
            for w in row.iter_mut() {
                *w = rng.gen::<f64>() * (max - min) + min;
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn add_to(&mut self, row: usize, col: usize, delta: f64) {
        self.data[row][col] += delta;
    }

    /// Row-major iteration: source unit ascending, then destination unit.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
