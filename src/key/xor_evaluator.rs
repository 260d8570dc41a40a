use crate::linalg::{BitMatrix, BitVector};
use crate::quad::MultiQuadTuple;

/// An immutable, reusable evaluator for homomorphic XOR, derived from a
/// [`crate::key::BridgeKey`]. Produced fresh (with fresh `Rx`, `Ry`) by
/// [`crate::key::BridgeKey::xor`]; safe to share and apply repeatedly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorEvaluator {
    xx: BitMatrix,
    xy: BitMatrix,
    y: BitMatrix,
    g_b1: MultiQuadTuple,
    g_b2: MultiQuadTuple,
}

impl XorEvaluator {
    pub(crate) fn new(
        xx: BitMatrix,
        xy: BitMatrix,
        y: BitMatrix,
        g_b1: MultiQuadTuple,
        g_b2: MultiQuadTuple,
    ) -> Self {
        XorEvaluator {
            xx,
            xy,
            y,
            g_b1,
            g_b2,
        }
    }

    pub fn xx(&self) -> &BitMatrix {
        &self.xx
    }

    pub fn xy(&self) -> &BitMatrix {
        &self.xy
    }

    /// `Xx . x xor Xy . y xor Y . g_b2(g_b1(concat(x, y)))`.
    pub fn apply(&self, x: &BitVector, y: &BitVector) -> BitVector {
        let concat = x.vcat(y);
        let t = self.g_b2.eval(&self.g_b1.eval(&concat));
        &(&self.xx.mul_vec(x) ^ &self.xy.mul_vec(y)) ^ &self.y.mul_vec(&t)
    }
}
