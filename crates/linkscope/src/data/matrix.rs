/// Square symmetric matrix of link counts, indexed by department.
///
/// Flat row-major storage. All matrices over one dataset share the same
/// dimension, so elementwise combination asserts rather than propagating a
/// dimension error: a mismatch is a bug, not an input condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    cells: Vec<f64>,
}

/// Elementwise combination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    Add,
    Subtract,
}

/// A link pair written more than once while building a matrix.
/// Last write wins; the caller decides whether to log.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateCell {
    pub i: usize,
    pub j: usize,
    pub previous: f64,
    pub replacement: f64,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0.0; n * n],
        }
    }

    /// Build a symmetric matrix from `(i, j, value)` triples.
    ///
    /// Each triple writes both `[i][j]` and `[j][i]`. Writing a cell that is
    /// already non-zero produces a `DuplicateCell` diagnostic and overwrites.
    pub fn from_pairs(
        n: usize,
        pairs: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> (Self, Vec<DuplicateCell>) {
        let mut m = Self::zeros(n);
        let mut duplicates = Vec::new();

        for (i, j, value) in pairs {
            let previous = m.get(i, j).max(m.get(j, i));
            if m.get(i, j) != 0.0 || m.get(j, i) != 0.0 {
                duplicates.push(DuplicateCell {
                    i,
                    j,
                    previous,
                    replacement: value,
                });
            }
            m.set_sym(i, j, value);
        }

        (m, duplicates)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.n + j]
    }

    /// Write both symmetric cells.
    pub fn set_sym(&mut self, i: usize, j: usize, value: f64) {
        self.cells[i * self.n + j] = value;
        self.cells[j * self.n + i] = value;
    }

    /// Elementwise combination of two equal-sized matrices.
    pub fn combine(a: &Matrix, b: &Matrix, op: CombineOp) -> Matrix {
        assert_eq!(
            a.n, b.n,
            "combined matrices must share the same department universe"
        );
        let cells = a
            .cells
            .iter()
            .zip(&b.cells)
            .map(|(x, y)| match op {
                CombineOp::Add => x + y,
                CombineOp::Subtract => x - y,
            })
            .collect();
        Matrix { n: a.n, cells }
    }

    /// Per-row sums, used as sort keys and pie slice sizes.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n)
            .map(|i| self.cells[i * self.n..(i + 1) * self.n].iter().sum())
            .collect()
    }
}
