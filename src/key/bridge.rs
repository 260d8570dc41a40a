use rand::{CryptoRng, RngCore};

use super::and_evaluator::AndEvaluator;
use super::private::PrivateKey;
use super::xor_evaluator::XorEvaluator;
use crate::linalg::BitMatrix;
use crate::quad::{triangle_len, MultiQuadTuple};
use crate::util;

/// Derives homomorphic-gate material from a [`PrivateKey`]. Holds a fixed
/// random invertible `R` (used only by LMM) and caches the four inverse
/// matrices and the two unary obfuscation tuples, none of which depend on
/// the per-call `Rx`/`Ry` resampled for binary gates.
///
/// Not thread-safe in the sense that [`BridgeKey::xor`] and
/// [`BridgeKey::and`] each draw their own fresh `Rx`, `Ry` from the caller's
/// RNG rather than mutating shared state — construct one `BridgeKey` per
/// thread (from the same `PrivateKey`) for concurrent derivation, per the
/// re-randomize-into-a-local-frame design.
#[derive(Debug)]
pub struct BridgeKey<'pk> {
    pk: &'pk PrivateKey,
    n: usize,
    r: BitMatrix,
    m_inv: BitMatrix,
    cu1_inv: BitMatrix,
    cu2_inv: BitMatrix,
    cb1_inv: BitMatrix,
    cb2_inv: BitMatrix,
    g_u1: MultiQuadTuple,
    g_u2: MultiQuadTuple,
}

impl<'pk> BridgeKey<'pk> {
    pub fn new<R: RngCore + CryptoRng>(pk: &'pk PrivateKey, rng: &mut R) -> Self {
        let n = pk.n();
        let m_inv = pk.m().inverse();
        let cu1_inv = pk.cu1().inverse();
        let cu2_inv = pk.cu2().inverse();
        let cb1_inv = pk.cb1().inverse();
        let cb2_inv = pk.cb2().inverse();
        let r = util::random_invertible(n, rng);

        let g_u1 = unary_g1(pk, &m_inv, &r);
        let g_u2 = unary_g2(pk, &cu1_inv);

        BridgeKey {
            pk,
            n,
            r,
            m_inv,
            cu1_inv,
            cu2_inv,
            cb1_inv,
            cb2_inv,
            g_u1,
            g_u2,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub(crate) fn g_u1(&self) -> &MultiQuadTuple {
        &self.g_u1
    }

    pub(crate) fn g_u2(&self) -> &MultiQuadTuple {
        &self.g_u2
    }

    /// `Z = augH(X, Y)`, the matrix pair parameterizing homomorphic
    /// left-multiplication by `k`.
    pub fn lmm_z(&self, k: &BitMatrix) -> BitMatrix {
        let n = self.n;
        debug_assert_eq!(k.rows(), n);
        debug_assert_eq!(k.cols(), n);
        let pk = self.pk;
        let zero_n = BitMatrix::zero(n, n);

        let x_top = BitMatrix::aug_h(&[k, &zero_n]);
        let x_bot = BitMatrix::aug_h(&[&zero_n, &self.r]);
        let x = pk.m().mul_mat(&BitMatrix::aug_v(&[&x_top, &x_bot]).mul_mat(&self.m_inv));

        let id_n = BitMatrix::identity(n);
        let y_top = BitMatrix::aug_h(&[k, &id_n]);
        let y_bot = BitMatrix::aug_h(&[&zero_n, &zero_n]);
        let y = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&y_top, &y_bot]).mul_mat(&self.cu2_inv));

        BitMatrix::aug_h(&[&x, &y])
    }

    pub fn left_shift(&self) -> BitMatrix {
        self.lmm_z(&BitMatrix::left_shift(self.n))
    }

    pub fn right_shift(&self) -> BitMatrix {
        self.lmm_z(&BitMatrix::right_shift(self.n))
    }

    /// `lmmZ` of the all-ones projector onto column 0: homomorphically
    /// broadcasts plaintext bit 0 across every output coordinate.
    pub fn left_column(&self) -> BitMatrix {
        self.lmm_z(&BitMatrix::column_projector(self.n, 0))
    }

    /// `lmmZ` of the all-ones projector onto column `N-1`.
    pub fn right_column(&self) -> BitMatrix {
        self.lmm_z(&BitMatrix::column_projector(self.n, self.n - 1))
    }

    /// Resamples fresh `Rx`, `Ry` and assembles an [`XorEvaluator`]. Two
    /// calls never share `Rx`/`Ry`.
    pub fn xor<R: RngCore + CryptoRng>(&self, rng: &mut R) -> XorEvaluator {
        let n = self.n;
        let pk = self.pk;
        let rx = util::random_invertible(n, rng);
        let ry = util::random_invertible(n, rng);

        let id_n = BitMatrix::identity(n);
        let zero_n = BitMatrix::zero(n, n);

        let xx_top = BitMatrix::aug_h(&[&id_n, &zero_n]);
        let xx_bot = BitMatrix::aug_h(&[&zero_n, &rx]);
        let xx = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&xx_top, &xx_bot]).mul_mat(&self.m_inv));

        let xy_top = BitMatrix::aug_h(&[&id_n, &zero_n]);
        let xy_bot = BitMatrix::aug_h(&[&zero_n, &ry]);
        let xy = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&xy_top, &xy_bot]).mul_mat(&self.m_inv));

        let y_top = BitMatrix::aug_h(&[&id_n, &id_n, &id_n]);
        let y_bot = BitMatrix::zero(n, 3 * n);
        let y = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&y_top, &y_bot]).mul_mat(&self.cb2_inv));

        let g_b1 = self.binary_g1(&rx, &ry);
        let g_b2 = self.binary_g2();

        XorEvaluator::new(xx, xy, y, g_b1, g_b2)
    }

    /// Resamples fresh `Rx`, `Ry` and assembles an [`AndEvaluator`].
    pub fn and<R: RngCore + CryptoRng>(&self, rng: &mut R) -> AndEvaluator {
        let n = self.n;
        let pk = self.pk;
        let rx = util::random_invertible(n, rng);
        let ry = util::random_invertible(n, rng);

        let mb = pk.m().split_h2(0);

        let zero_n3 = BitMatrix::zero(n, 3 * n);
        let my3 = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&self.cb2_inv.split_v3(2), &zero_n3]));

        let id_zero = BitMatrix::aug_h(&[&BitMatrix::identity(n), &BitMatrix::zero(n, n)]);
        let x = id_zero.mul_mat(&self.m_inv);
        let y1 = self.cb2_inv.split_v3(0);
        let y2 = self.cb2_inv.split_v3(1);
        let contrib = assemble_and_contrib(n, &x, &y1, &y2);
        let z = MultiQuadTuple::from_contributions(
            7 * n,
            &contrib,
            crate::linalg::BitVector::zero(n),
        );

        let m2 = self.m_inv.split_v2(1);
        let zero_n2 = BitMatrix::zero(n, 2 * n);
        let z1 = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&zero_n2, &rx.mul_mat(&m2)]));
        let z2 = pk
            .m()
            .mul_mat(&BitMatrix::aug_v(&[&zero_n2, &ry.mul_mat(&m2)]));

        let g_b1 = self.binary_g1(&rx, &ry);
        let g_b2 = self.binary_g2();

        AndEvaluator::new(mb, my3, z, z1, z2, g_b1, g_b2)
    }

    fn binary_g1(&self, rx: &BitMatrix, ry: &BitMatrix) -> MultiQuadTuple {
        let n = self.n;
        let f0 = self.pk.f().get(0);
        let m2 = self.m_inv.split_v2(1);
        let zero_n2 = BitMatrix::zero(n, 2 * n);

        let mat_top = BitMatrix::aug_h(&[&m2, &zero_n2]);
        let mat_mid = BitMatrix::aug_h(&[&zero_n2, &m2]);
        let mat_bot = &rx.mul_mat(&mat_top) ^ &ry.mul_mat(&mat_mid);

        let top = f0 * &mat_top;
        let mid = f0 * &mat_mid;
        let bot = f0 * &mat_bot;
        MultiQuadTuple::aug_v(&[&top, &mid, &bot]).rmult(self.pk.cb1())
    }

    fn binary_g2(&self) -> MultiQuadTuple {
        let f1 = self.pk.f().get(1);
        let top = self.cb1_inv.split_v3(0);
        let mid = self.cb1_inv.split_v3(1);
        let bot = self.cb1_inv.split_v3(2);

        let top = f1 * &top;
        let mid = f1 * &mid;
        let bot = f1 * &bot;
        MultiQuadTuple::aug_v(&[&top, &mid, &bot]).rmult(self.pk.cb2())
    }
}

fn unary_g1(pk: &PrivateKey, m_inv: &BitMatrix, r: &BitMatrix) -> MultiQuadTuple {
    let f0 = pk.f().get(0);
    let mat_top = m_inv.split_v2(1);
    let mat_bot = r.mul_mat(&mat_top);

    let top = f0 * &mat_top;
    let bot = f0 * &mat_bot;
    MultiQuadTuple::aug_v(&[&top, &bot]).rmult(pk.cu1())
}

fn unary_g2(pk: &PrivateKey, cu1_inv: &BitMatrix) -> MultiQuadTuple {
    let f1 = pk.f().get(1);
    let mat_top = cu1_inv.split_v2(0);
    let mat_bot = cu1_inv.split_v2(1);

    let top = f1 * &mat_top;
    let bot = f1 * &mat_bot;
    MultiQuadTuple::aug_v(&[&top, &bot]).rmult(pk.cu2())
}

/// Streams the `(7N(7N+1)/2) x N` triangular coefficient table for the
/// AND gate's `z` tuple directly into one matrix, block by block, rather
/// than materializing the three `P`/`Q`/`S` chunks described algebraically.
/// `x` is `augH(I_N, 0) . M^-1`; `y1`, `y2` are the first two thirds of
/// `Cb2^-1`.
fn assemble_and_contrib(n: usize, x: &BitMatrix, y1: &BitMatrix, y2: &BitMatrix) -> BitMatrix {
    let two_n = 2 * n;
    let three_n = 3 * n;
    let seven_n = 7 * n;
    let mut contrib = BitMatrix::zero(triangle_len(seven_n), n);
    let mut count = 0usize;

    // Block P: cross terms between encX (levels 0..2N) and encY / t.
    for level in 0..two_n {
        let mid_offset = count + (two_n - level);
        for j in 0..n {
            if x.get(j, level) {
                for i in 0..two_n {
                    contrib.set(mid_offset + i, j, x.get(j, i));
                }
            }
        }
        let bot_offset = mid_offset + two_n;
        for j in 0..n {
            if x.get(j, level) {
                for i in 0..three_n {
                    contrib.set(bot_offset + i, j, y2.get(j, i));
                }
            }
        }
        count += seven_n - level;
    }

    // Block Q: cross terms between encY (levels 0..2N, offset 2N) and t.
    for level in 0..two_n {
        let bot_offset = count + (two_n - level);
        for j in 0..n {
            if x.get(j, level) {
                for i in 0..three_n {
                    contrib.set(bot_offset + i, j, y1.get(j, i));
                }
            }
        }
        count += 5 * n - level;
    }

    // Block S: cross terms within t (levels 0..3N, offset 4N).
    for level in 0..three_n {
        for j in 0..n {
            let prod = y1.get(j, level) && y2.get(j, level);
            contrib.set(count, j, prod);
            if y1.get(j, level) {
                for i in 1..(three_n - level) {
                    contrib.set(count + i, j, y2.get(j, level + i));
                }
            }
            if y2.get(j, level) {
                for i in 1..(three_n - level) {
                    let cur = contrib.get(count + i, j);
                    contrib.set(count + i, j, cur ^ y1.get(j, level + i));
                }
            }
        }
        count += three_n - level;
    }

    contrib
}
