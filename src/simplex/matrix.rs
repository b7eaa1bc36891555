//! Dense matrices of precision scalars.

use std::ops::{Index, IndexMut};

use malachite::num::arithmetic::traits::Abs;
use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;

use crate::precision::Precision;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

/// Raised when a matrix has no usable pivot in some column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Singular {
    pub column: usize,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![Rational::ZERO; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Matrix {
        let mut matrix = Matrix::zeros(n, n);

        for i in 0..n {
            matrix[(i, i)] = Rational::ONE;
        }

        matrix
    }

    pub fn row(&self, i: usize) -> &[Rational] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }

        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// Computes `self * v`.
    pub fn mul_vec(&self, v: &[Rational], prec: &Precision) -> Vec<Rational> {
        (0..self.rows).map(|i| prec.dot(self.row(i), v)).collect()
    }

    /// Computes `v^T * self`.
    pub fn vec_mul(&self, v: &[Rational], prec: &Precision) -> Vec<Rational> {
        (0..self.cols)
            .map(|j| {
                let column = (0..self.rows).map(|i| &self[(i, j)]);
                prec.dot(v, column)
            })
            .collect()
    }

    /// Inverts a square matrix by Gauss-Jordan elimination with partial
    /// pivoting.
    ///
    /// A pivot whose magnitude does not exceed `n * epsilon` times the largest
    /// entry of the matrix counts as zero.
    pub fn inverse(&self, prec: &Precision) -> Result<Matrix, Singular> {
        debug_assert_eq!(self.rows, self.cols);

        let n = self.rows;
        let mut work = self.clone();
        let mut inverse = Matrix::identity(n);

        let scale = self
            .data
            .iter()
            .map(|x| x.abs())
            .max()
            .unwrap_or(Rational::ZERO);
        let threshold = prec.epsilon() * scale * Rational::from(n);

        for col in 0..n {
            let mut pivot_row = col;
            let mut best = (&work[(col, col)]).abs();

            for row in col + 1..n {
                let candidate = (&work[(row, col)]).abs();

                if candidate > best {
                    pivot_row = row;
                    best = candidate;
                }
            }

            if best <= threshold || best == 0 {
                return Err(Singular { column: col });
            }

            work.swap_rows(col, pivot_row);
            inverse.swap_rows(col, pivot_row);

            let pivot = work[(col, col)].clone();

            for j in 0..n {
                work[(col, j)] = prec.div(&work[(col, j)], &pivot);
                inverse[(col, j)] = prec.div(&inverse[(col, j)], &pivot);
            }

            for row in 0..n {
                if row == col || work[(row, col)] == 0 {
                    continue;
                }

                let factor = work[(row, col)].clone();

                for j in 0..n {
                    let w = &factor * &work[(col, j)];
                    let v = &factor * &inverse[(col, j)];

                    let w = prec.sub(&work[(row, j)], &w);
                    let v = prec.sub(&inverse[(row, j)], &v);

                    work[(row, j)] = w;
                    inverse[(row, j)] = v;
                }
            }
        }

        Ok(inverse)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (i, j): (usize, usize)) -> &Rational {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Rational {
        &mut self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, entries: &[i64]) -> Matrix {
        Matrix {
            rows,
            cols,
            data: entries.iter().map(|&x| Rational::from(x)).collect(),
        }
    }

    #[test]
    fn products() {
        let prec = Precision::new(20).unwrap();
        let m = matrix(2, 3, &[1, 2, 3, 4, 5, 6]);

        let v = [Rational::from(1), Rational::from(0), Rational::from(-1)];
        let w = [Rational::from(1), Rational::from(1)];

        assert_eq!(
            m.mul_vec(&v, &prec),
            vec![Rational::from(-2), Rational::from(-2)]
        );
        assert_eq!(
            m.vec_mul(&w, &prec),
            vec![Rational::from(5), Rational::from(7), Rational::from(9)]
        );
    }

    #[test]
    fn inverse_needs_pivoting() {
        let prec = Precision::new(20).unwrap();
        let m = matrix(2, 2, &[0, 1, 2, 0]);

        let inverse = m.inverse(&prec).unwrap();

        assert_eq!(inverse[(0, 1)], Rational::from_signeds(1, 2));
        assert_eq!(inverse[(1, 0)], Rational::from(1));
        assert_eq!(inverse[(0, 0)], 0);
        assert_eq!(inverse[(1, 1)], 0);
    }

    #[test]
    fn inverse_of_dense_matrix() {
        let prec = Precision::new(30).unwrap();
        let m = matrix(3, 3, &[2, -1, 0, -1, 2, -1, 0, -1, 2]);

        let inverse = m.inverse(&prec).unwrap();

        for i in 0..3 {
            let row = m.mul_vec(inverse.row(i), &prec);
            let expected: Vec<_> = (0..3)
                .map(|j| if i == j { Rational::ONE } else { Rational::ZERO })
                .collect();

            let residual = row
                .iter()
                .zip(&expected)
                .all(|(a, b)| prec.is_negligible(&(a - b)));

            assert!(residual);
        }
    }

    #[test]
    fn singular() {
        let prec = Precision::new(20).unwrap();
        let m = matrix(2, 2, &[1, 2, 2, 4]);

        assert_eq!(m.inverse(&prec), Err(Singular { column: 1 }));
    }
}
