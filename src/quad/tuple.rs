use rand::{CryptoRng, RngCore};

use crate::linalg::{BitMatrix, BitVector};

/// Number of coefficients in the strictly-upper-triangular (including the
/// diagonal) coefficient table of a homogeneous quadratic form in `n`
/// variables over GF(2).
#[inline]
pub fn triangle_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// The packed index of coefficient `(i, j)`, `i <= j < n`, in a row-major
/// enumeration of the upper triangle: row `i` contributes `n - i` entries,
/// columns `i..n`.
#[inline]
pub fn triangle_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i <= j && j < n);
    // Sum of row lengths n, n-1, .., n-i+1 for rows before `i`.
    let rows_before = i * n - (i * (i - 1)) / 2;
    rows_before + (j - i)
}

/// A tuple of `output` homogeneous degree-2 forms in `input` variables over
/// GF(2). Each form is stored as a row of `coeffs` (shape `output x
/// triangle_len(input)`), packed by [`triangle_index`]. `constant` holds a
/// per-coordinate constant offset XORed into the result after evaluation;
/// every tuple this crate samples at random leaves it zero, but
/// [`MultiQuadTuple::from_contributions`] accepts one explicitly to mirror
/// the source construction's `setContributions(contrib, constant)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiQuadTuple {
    input: usize,
    output: usize,
    coeffs: BitMatrix,
    constant: BitVector,
}

impl MultiQuadTuple {
    /// A tuple of `output` independently uniform random homogeneous
    /// quadratic forms in `input` variables.
    pub fn random<R: RngCore + CryptoRng>(input: usize, output: usize, rng: &mut R) -> Self {
        let coeffs = BitMatrix::random(output, triangle_len(input), rng);
        MultiQuadTuple {
            input,
            output,
            coeffs,
            constant: BitVector::zero(output),
        }
    }

    /// Builds a tuple directly from a packed contribution matrix, shaped
    /// `triangle_len(input) x output` (one column per output coordinate,
    /// the layout the AND gate's `z` assembly produces), plus a constant
    /// offset.
    pub fn from_contributions(input: usize, contrib: &BitMatrix, constant: BitVector) -> Self {
        let output = contrib.cols();
        debug_assert_eq!(contrib.rows(), triangle_len(input));
        debug_assert_eq!(constant.len(), output);
        MultiQuadTuple {
            input,
            output,
            coeffs: contrib.transpose(),
            constant,
        }
    }

    pub fn input_len(&self) -> usize {
        self.input
    }

    pub fn output_len(&self) -> usize {
        self.output
    }

    /// Evaluates every coordinate's quadratic form at `v`.
    pub fn eval(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(v.len(), self.input);
        let mut out = BitVector::zero(self.output);
        for k in 0..self.output {
            let mut acc = false;
            for i in 0..self.input {
                let vi = v.get(i);
                for j in i..self.input {
                    let idx = triangle_index(self.input, i, j);
                    if vi && v.get(j) && self.coeffs.get(k, idx) {
                        acc = !acc;
                    }
                }
            }
            out.set(k, acc ^ self.constant.get(k));
        }
        out
    }

    /// Post-composes with a linear map: `mat` must be `output' x output`,
    /// and the result computes `mat * self(v)` for every `v`. This is the
    /// `aug.rMult(C)` step of the bridge-key derivation.
    pub fn rmult(&self, mat: &BitMatrix) -> MultiQuadTuple {
        debug_assert_eq!(mat.cols(), self.output);
        MultiQuadTuple {
            input: self.input,
            output: mat.rows(),
            coeffs: mat.mul_mat(&self.coeffs),
            constant: mat.mul_vec(&self.constant),
        }
    }

    /// Pre-composes with a linear map: `mat` must have `self.input` rows,
    /// and the result computes `self(mat * v)` for every `v` of length
    /// `mat.cols()`. Spelled `f * mat` in the bridge-key derivation.
    pub fn precompose(&self, mat: &BitMatrix) -> MultiQuadTuple {
        debug_assert_eq!(mat.rows(), self.input);
        let new_input = mat.cols();
        let mat_t = mat.transpose();
        let mut new_coeffs = BitMatrix::zero(self.output, triangle_len(new_input));
        for k in 0..self.output {
            let a = self.expand_dense(k);
            let sandwiched = mat_t.mul_mat(&a).mul_mat(mat);
            new_coeffs.set_row(k, &Self::fold_dense(&sandwiched));
        }
        MultiQuadTuple {
            input: new_input,
            output: self.output,
            coeffs: new_coeffs,
            constant: self.constant.clone(),
        }
    }

    /// Vertically stacks tuples that share an input width, concatenating
    /// their outputs.
    pub fn aug_v(tuples: &[&MultiQuadTuple]) -> MultiQuadTuple {
        let input = tuples[0].input;
        debug_assert!(tuples.iter().all(|t| t.input == input));
        let coeff_rows: Vec<&BitMatrix> = tuples.iter().map(|t| &t.coeffs).collect();
        let coeffs = BitMatrix::aug_v(&coeff_rows);
        let mut constant = BitVector::zero(0);
        for t in tuples {
            constant = constant.vcat(&t.constant);
        }
        MultiQuadTuple {
            input,
            output: coeffs.rows(),
            coeffs,
            constant,
        }
    }

    /// Expands quadratic form `k`'s packed triangular coefficients into a
    /// dense `input x input` upper-triangular matrix, for use in the
    /// `mat^T * A * mat` sandwich that implements [`Self::precompose`].
    fn expand_dense(&self, k: usize) -> BitMatrix {
        let n = self.input;
        let mut a = BitMatrix::zero(n, n);
        for i in 0..n {
            for j in i..n {
                let idx = triangle_index(n, i, j);
                if self.coeffs.get(k, idx) {
                    a.set(i, j, true);
                }
            }
        }
        a
    }

    /// Folds a dense `n x n` matrix `d` back into packed upper-triangular
    /// form: the diagonal carries linear terms (`v_l^2 = v_l` in GF(2)),
    /// off-diagonal pairs `(l, m)` combine both `d[l][m]` and `d[m][l]`
    /// since a substituted quadratic form is symmetric before folding.
    fn fold_dense(d: &BitMatrix) -> BitVector {
        let n = d.rows();
        let mut out = BitVector::zero(triangle_len(n));
        for i in 0..n {
            for j in i..n {
                let value = if i == j {
                    d.get(i, i)
                } else {
                    d.get(i, j) ^ d.get(j, i)
                };
                out.set(triangle_index(n, i, j), value);
            }
        }
        out
    }
}

impl core::ops::Mul<&BitMatrix> for &MultiQuadTuple {
    type Output = MultiQuadTuple;

    fn mul(self, mat: &BitMatrix) -> MultiQuadTuple {
        self.precompose(mat)
    }
}
