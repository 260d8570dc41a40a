use crate::linalg::{BitMatrix, BitVector};
use crate::quad::MultiQuadTuple;

/// An immutable, reusable evaluator for homomorphic AND, derived from a
/// [`crate::key::BridgeKey`]. `z` is the degree-2 tuple, over the expanded
/// 7N-bit coordinate `concat(x, y, t)`, that reconstructs the bit-level
/// cross terms plaintext AND needs under the scheme's obfuscations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AndEvaluator {
    mb: BitMatrix,
    my3: BitMatrix,
    z: MultiQuadTuple,
    z1: BitMatrix,
    z2: BitMatrix,
    g_b1: MultiQuadTuple,
    g_b2: MultiQuadTuple,
}

impl AndEvaluator {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        mb: BitMatrix,
        my3: BitMatrix,
        z: MultiQuadTuple,
        z1: BitMatrix,
        z2: BitMatrix,
        g_b1: MultiQuadTuple,
        g_b2: MultiQuadTuple,
    ) -> Self {
        AndEvaluator {
            mb,
            my3,
            z,
            z1,
            z2,
            g_b1,
            g_b2,
        }
    }

    /// `MB . z(concat(x, y, t)) xor MY3 . t xor Z1 . x xor Z2 . y`, where
    /// `t = g_b2(g_b1(concat(x, y)))`.
    pub fn apply(&self, x: &BitVector, y: &BitVector) -> BitVector {
        let concat_xy = x.vcat(y);
        let t = self.g_b2.eval(&self.g_b1.eval(&concat_xy));
        let coords = BitVector::vcat3(x, y, &t);
        &(&self.mb.mul_vec(&self.z.eval(&coords)) ^ &self.my3.mul_vec(&t))
            ^ &(&self.z1.mul_vec(x) ^ &self.z2.mul_vec(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{BridgeKey, PrivateKey};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn homomorphic_and_matches_plaintext_and() {
        let mut rng = StdRng::seed_from_u64(400);
        let pk = PrivateKey::new(1, &mut rng);
        let bk = BridgeKey::new(&pk, &mut rng);
        let and = bk.and(&mut rng);

        for _ in 0..100 {
            let m1 = BitVector::random(64, &mut rng);
            let m2 = BitVector::random(64, &mut rng);
            let c1 = pk.encrypt(&m1, &mut rng);
            let c2 = pk.encrypt(&m2, &mut rng);
            let out = and.apply(&c1, &c2);
            let mut expected = BitVector::zero(64);
            for i in 0..64 {
                expected.set(i, m1.get(i) && m2.get(i));
            }
            assert_eq!(pk.decrypt(&out), expected);
        }
    }

    #[test]
    fn concrete_scenario_four() {
        let mut rng = StdRng::seed_from_u64(401);
        let pk = PrivateKey::new(1, &mut rng);
        let bk = BridgeKey::new(&pk, &mut rng);
        let and = bk.and(&mut rng);

        let m1 = BitVector::from_u64(0xFF00_FF00_FF00_FF00u64);
        let m2 = BitVector::from_u64(0x0F0F_0F0F_0F0F_0F0Fu64);
        let c1 = pk.encrypt(&m1, &mut rng);
        let c2 = pk.encrypt(&m2, &mut rng);
        let out = and.apply(&c1, &c2);
        assert_eq!(
            pk.decrypt(&out),
            BitVector::from_u64(0x0F00_0F00_0F00_0F00u64)
        );
    }
}
