use alloc::vec;
use alloc::vec::Vec;
use core::ops::Mul;

use rand::{CryptoRng, RngCore};

use super::bitvector::BitVector;

/// A dense r x c matrix over GF(2), stored row-major as `rows` BitVectors
/// of length `cols`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    rows: usize,
    cols: usize,
    data: Vec<BitVector>,
}

impl BitMatrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        BitMatrix {
            rows,
            cols,
            data: vec![BitVector::zero(cols); rows],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = BitMatrix::zero(n, n);
        for i in 0..n {
            m.set(i, i, true);
        }
        m
    }

    pub fn random<R: RngCore + CryptoRng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows).map(|_| BitVector::random(cols, rng)).collect();
        BitMatrix { rows, cols, data }
    }

    /// The permutation matrix implementing a 1-bit left shift: row `i`
    /// selects column `i - 1` (row 0 is all zero, dropping the overflow bit).
    pub fn left_shift(n: usize) -> Self {
        let mut m = BitMatrix::zero(n, n);
        for i in 1..n {
            m.set(i, i - 1, true);
        }
        m
    }

    /// The permutation matrix implementing a 1-bit right shift: row `i`
    /// selects column `i + 1` (the last row is all zero).
    pub fn right_shift(n: usize) -> Self {
        let mut m = BitMatrix::zero(n, n);
        for i in 0..n.saturating_sub(1) {
            m.set(i, i + 1, true);
        }
        m
    }

    /// An n x n matrix whose single nonzero column is `col`, filled with
    /// ones: multiplying it onto a vector broadcasts bit `col` of that
    /// vector across every output position.
    pub fn column_projector(n: usize, col: usize) -> Self {
        let mut m = BitMatrix::zero(n, n);
        for i in 0..n {
            m.set(i, col, true);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.data[i].get(j)
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.data[i].set(j, value);
    }

    pub fn row(&self, i: usize) -> &BitVector {
        &self.data[i]
    }

    pub fn set_row(&mut self, i: usize, row: &BitVector) {
        debug_assert_eq!(row.len(), self.cols);
        self.data[i] = row.clone();
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// `row[target] ^= row[source]`
    fn xor_row_into(&mut self, target: usize, source: usize) {
        let src = self.data[source].clone();
        let dst = &mut self.data[target];
        *dst = &*dst ^ &src;
    }

    pub fn transpose(&self) -> BitMatrix {
        let mut out = BitMatrix::zero(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.get(i, j) {
                    out.set(j, i, true);
                }
            }
        }
        out
    }

    pub fn mul_vec(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(self.cols, v.len());
        let mut out = BitVector::zero(self.rows);
        for i in 0..self.rows {
            out.set(i, self.data[i].dot(v));
        }
        out
    }

    pub fn mul_mat(&self, other: &BitMatrix) -> BitMatrix {
        debug_assert_eq!(self.cols, other.rows());
        let mut out = BitMatrix::zero(self.rows, other.cols());
        for i in 0..self.rows {
            let mut acc = BitVector::zero(other.cols());
            for k in 0..self.cols {
                if self.get(i, k) {
                    acc = &acc ^ other.row(k);
                }
            }
            out.set_row(i, &acc);
        }
        out
    }

    /// Horizontal augmentation: stacks matrices side by side. All operands
    /// must share the same row count.
    pub fn aug_h(mats: &[&BitMatrix]) -> BitMatrix {
        let rows = mats[0].rows;
        debug_assert!(mats.iter().all(|m| m.rows == rows));
        let total_cols: usize = mats.iter().map(|m| m.cols).sum();
        let mut out = BitMatrix::zero(rows, total_cols);
        for i in 0..rows {
            let mut offset = 0;
            for m in mats {
                for j in 0..m.cols {
                    out.set(i, offset + j, m.get(i, j));
                }
                offset += m.cols;
            }
        }
        out
    }

    /// Vertical augmentation: stacks matrices on top of each other. All
    /// operands must share the same column count.
    pub fn aug_v(mats: &[&BitMatrix]) -> BitMatrix {
        let cols = mats[0].cols;
        debug_assert!(mats.iter().all(|m| m.cols == cols));
        let total_rows: usize = mats.iter().map(|m| m.rows).sum();
        let mut out = BitMatrix::zero(total_rows, cols);
        let mut offset = 0;
        for m in mats {
            for i in 0..m.rows {
                out.set_row(offset + i, m.row(i));
            }
            offset += m.rows;
        }
        out
    }

    /// Splits the columns at `at`, returning `(left, right)`.
    pub fn split_h_at(&self, at: usize) -> (BitMatrix, BitMatrix) {
        let mut left = BitMatrix::zero(self.rows, at);
        let mut right = BitMatrix::zero(self.rows, self.cols - at);
        for i in 0..self.rows {
            for j in 0..at {
                left.set(i, j, self.get(i, j));
            }
            for j in at..self.cols {
                right.set(i, j - at, self.get(i, j));
            }
        }
        (left, right)
    }

    /// Splits the rows at `at`, returning `(top, bottom)`.
    pub fn split_v_at(&self, at: usize) -> (BitMatrix, BitMatrix) {
        let mut top = BitMatrix::zero(at, self.cols);
        for i in 0..at {
            top.set_row(i, self.row(i));
        }
        let mut bottom = BitMatrix::zero(self.rows - at, self.cols);
        for i in at..self.rows {
            bottom.set_row(i - at, self.row(i));
        }
        (top, bottom)
    }

    /// Row block `part` (0 or 1) of an even vertical split in half.
    pub fn split_v2(&self, part: usize) -> BitMatrix {
        debug_assert_eq!(self.rows % 2, 0);
        let half = self.rows / 2;
        let (top, bottom) = self.split_v_at(half);
        if part == 0 {
            top
        } else {
            bottom
        }
    }

    /// Row block `part` (0, 1 or 2) of an even vertical split in thirds.
    pub fn split_v3(&self, part: usize) -> BitMatrix {
        debug_assert_eq!(self.rows % 3, 0);
        let third = self.rows / 3;
        match part {
            0 => self.split_v_at(third).0,
            1 => {
                let (_, rest) = self.split_v_at(third);
                rest.split_v_at(third).0
            }
            _ => {
                let (_, rest) = self.split_v_at(2 * third);
                rest
            }
        }
    }

    /// Column block `part` (0 or 1) of an even horizontal split in half.
    pub fn split_h2(&self, part: usize) -> BitMatrix {
        debug_assert_eq!(self.cols % 2, 0);
        let half = self.cols / 2;
        let (left, right) = self.split_h_at(half);
        if part == 0 {
            left
        } else {
            right
        }
    }

    /// Blits `m`'s rows into `self` starting at `row_offset`, in place.
    pub fn set_submatrix(&mut self, row_offset: usize, m: &BitMatrix) {
        debug_assert_eq!(m.cols, self.cols);
        debug_assert!(row_offset + m.rows <= self.rows);
        for i in 0..m.rows {
            self.set_row(row_offset + i, m.row(i));
        }
    }

    /// Gauss-Jordan elimination of `self` (square, n x n) augmented with
    /// `extra` extra columns, reducing the left n columns to the identity
    /// in place. Returns `false` if `self` is singular (left as a partial
    /// reduction in that case).
    fn reduce_to_identity(&mut self, n: usize) -> bool {
        debug_assert_eq!(self.rows, n);
        for col in 0..n {
            let pivot = (col..n).find(|&r| self.get(r, col));
            let pivot = match pivot {
                Some(p) => p,
                None => return false,
            };
            if pivot != col {
                self.swap_rows(col, pivot);
            }
            for r in 0..n {
                if r != col && self.get(r, col) {
                    self.xor_row_into(r, col);
                }
            }
        }
        true
    }

    /// The inverse of this (square) matrix, or `None` if it is singular.
    pub fn try_inverse(&self) -> Option<BitMatrix> {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let id = BitMatrix::identity(n);
        let mut aug = BitMatrix::aug_h(&[self, &id]);
        if aug.reduce_to_identity(n) {
            Some(aug.split_h_at(n).1)
        } else {
            None
        }
    }

    /// The inverse of this (square) matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is singular. Every matrix this crate inverts is
    /// sampled invertible by construction (see [`crate::util::random_invertible`]),
    /// so this is never expected to trigger outside a programming error.
    pub fn inverse(&self) -> BitMatrix {
        self.try_inverse().expect("matrix is not invertible")
    }

    /// Solves `self * x = y` for `x`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is singular, for the same reason [`Self::inverse`] does.
    pub fn solve(&self, y: &BitVector) -> BitVector {
        debug_assert_eq!(self.rows, self.cols);
        debug_assert_eq!(self.rows, y.len());
        let n = self.rows;
        let mut rhs = BitMatrix::zero(n, 1);
        for i in 0..n {
            rhs.set(i, 0, y.get(i));
        }
        let mut aug = BitMatrix::aug_h(&[self, &rhs]);
        let solved = aug.reduce_to_identity(n);
        assert!(solved, "matrix is not invertible");
        let (_, x_col) = aug.split_h_at(n);
        x_col.column(0)
    }

    /// Extracts column `j` as its own vector.
    pub fn column(&self, j: usize) -> BitVector {
        let mut out = BitVector::zero(self.rows);
        for i in 0..self.rows {
            out.set(i, self.get(i, j));
        }
        out
    }
}

impl Mul<&BitVector> for &BitMatrix {
    type Output = BitVector;

    fn mul(self, rhs: &BitVector) -> BitVector {
        self.mul_vec(rhs)
    }
}

impl Mul<&BitMatrix> for &BitMatrix {
    type Output = BitMatrix;

    fn mul(self, rhs: &BitMatrix) -> BitMatrix {
        self.mul_mat(rhs)
    }
}
