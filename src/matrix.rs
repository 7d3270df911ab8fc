//! Dense square matrices: the only linear algebra the learner needs.
//!
//! Row-major `Vec<f64>`; `m[(i, j)]` is row `i`, column `j`.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn zeros(n: usize) -> Self {
        Self { n, data: vec![0.0; n * n] }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from rows. Returns `None` unless every row has `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        Some(Self { n, data: rows.concat() })
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.n..(i + 1) * self.n]
    }
}

impl Index<(usize, usize)> for SquareMatrix {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.n + j]
    }
}

impl IndexMut<(usize, usize)> for SquareMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.n + j]
    }
}

/// `a · b`. Panics if the dimensions differ.
pub fn multiply(a: &SquareMatrix, b: &SquareMatrix) -> SquareMatrix {
    assert_eq!(a.n, b.n, "dimension mismatch");
    let n = a.n;
    let mut out = SquareMatrix::zeros(n);
    // i-k-j order keeps the inner loop on contiguous rows of `b` and `out`.
    for i in 0..n {
        for k in 0..n {
            let aik = a[(i, k)];
            if aik == 0.0 {
                continue;
            }
            let b_row = b.row(k);
            let out_row = out.row_mut(i);
            for j in 0..n {
                out_row[j] += aik * b_row[j];
            }
        }
    }
    out
}

/// `m^k` by repeated squaring: `O(log k)` multiplications. `m^0` is the identity.
pub fn power(m: &SquareMatrix, mut k: u64) -> SquareMatrix {
    let mut result = SquareMatrix::identity(m.n);
    let mut base = m.clone();
    while k > 0 {
        if k & 1 == 1 {
            result = multiply(&result, &base);
        }
        k >>= 1;
        if k > 0 {
            base = multiply(&base, &base);
        }
    }
    result
}
