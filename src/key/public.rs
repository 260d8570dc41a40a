use rand::{CryptoRng, RngCore};

use super::and_evaluator::AndEvaluator;
use super::bridge::BridgeKey;
use super::xor_evaluator::XorEvaluator;
use crate::linalg::{BitMatrix, BitVector};

/// The untrusted-facing half of the key layer: a thin wrapper around a
/// [`BridgeKey`] that exposes only the homomorphic-gate surface. A
/// `PublicKey` cannot reach `M`, `f`, or any `Cu`/`Cb` matrix — it can only
/// ask the `BridgeKey` to derive gate material, the same thing any other
/// holder of the `BridgeKey` could do.
#[derive(Debug)]
pub struct PublicKey<'bk, 'pk> {
    bridge: &'bk BridgeKey<'pk>,
}

impl<'bk, 'pk> PublicKey<'bk, 'pk> {
    pub fn new(bridge: &'bk BridgeKey<'pk>) -> Self {
        PublicKey { bridge }
    }

    /// `BridgeKey::lmmZ(k)`, the matrix pair parameterizing homomorphic
    /// left-multiplication by `k`.
    pub fn lmm_z(&self, k: &BitMatrix) -> BitMatrix {
        self.bridge.lmm_z(k)
    }

    pub fn left_shift(&self) -> BitMatrix {
        self.bridge.left_shift()
    }

    pub fn right_shift(&self) -> BitMatrix {
        self.bridge.right_shift()
    }

    pub fn left_column(&self) -> BitMatrix {
        self.bridge.left_column()
    }

    pub fn right_column(&self) -> BitMatrix {
        self.bridge.right_column()
    }

    pub fn xor<R: RngCore + CryptoRng>(&self, rng: &mut R) -> XorEvaluator {
        self.bridge.xor(rng)
    }

    pub fn and<R: RngCore + CryptoRng>(&self, rng: &mut R) -> AndEvaluator {
        self.bridge.and(rng)
    }

    /// Applies `z` (as produced by [`Self::lmm_z`] or one of the shift/
    /// column specializations) to a ciphertext: `X . enc_x xor Y .
    /// g_u2(g_u1(enc_x))`, where `Z = augH(X, Y)`.
    pub fn homomorphic_lmm(&self, z: &BitMatrix, enc_x: &BitVector) -> BitVector {
        let x = z.split_h2(0);
        let y = z.split_h2(1);
        let obfuscated = self.bridge.g_u2().eval(&self.bridge.g_u1().eval(enc_x));
        &x.mul_vec(enc_x) ^ &y.mul_vec(&obfuscated)
    }

    /// Derives a fresh [`XorEvaluator`] and applies it once.
    pub fn homomorphic_xor<R: RngCore + CryptoRng>(
        &self,
        enc_x: &BitVector,
        enc_y: &BitVector,
        rng: &mut R,
    ) -> BitVector {
        self.xor(rng).apply(enc_x, enc_y)
    }

    /// Derives a fresh [`AndEvaluator`] and applies it once.
    pub fn homomorphic_and<R: RngCore + CryptoRng>(
        &self,
        enc_x: &BitVector,
        enc_y: &BitVector,
        rng: &mut R,
    ) -> BitVector {
        self.and(rng).apply(enc_x, enc_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::PrivateKey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn homomorphic_lmm_via_public_key_matches_plaintext_multiplication() {
        let mut rng = StdRng::seed_from_u64(500);
        let pk = PrivateKey::new(1, &mut rng);
        let bk = BridgeKey::new(&pk, &mut rng);
        let public = PublicKey::new(&bk);

        let k = BitMatrix::identity(pk.n());
        let m = BitVector::from_u64(0xDEAD_BEEF_CAFE_BABEu64);
        let ct = pk.encrypt(&m, &mut rng);
        let z = public.lmm_z(&k);
        let out = public.homomorphic_lmm(&z, &ct);
        assert_eq!(pk.decrypt(&out), m);
    }

    #[test]
    fn right_shift_via_public_key_matches_concrete_scenario_six() {
        let mut rng = StdRng::seed_from_u64(501);
        let pk = PrivateKey::new(1, &mut rng);
        let bk = BridgeKey::new(&pk, &mut rng);
        let public = PublicKey::new(&bk);

        let m = BitVector::from_u64(0x8000_0000_0000_0000u64);
        let ct = pk.encrypt(&m, &mut rng);
        let z = public.right_shift();
        let out = public.homomorphic_lmm(&z, &ct);
        assert_eq!(pk.decrypt(&out), BitVector::from_u64(0x4000_0000_0000_0000u64));
    }

    #[test]
    fn compositionality_and_of_xor_with_a_third_plaintext() {
        let mut rng = StdRng::seed_from_u64(502);
        let pk = PrivateKey::new(1, &mut rng);
        let bk = BridgeKey::new(&pk, &mut rng);
        let public = PublicKey::new(&bk);

        let m1 = BitVector::random(64, &mut rng);
        let m2 = BitVector::random(64, &mut rng);
        let m3 = BitVector::random(64, &mut rng);
        let e1 = pk.encrypt(&m1, &mut rng);
        let e2 = pk.encrypt(&m2, &mut rng);
        let e3 = pk.encrypt(&m3, &mut rng);

        let xor_out = public.homomorphic_xor(&e1, &e2, &mut rng);
        let and_out = public.homomorphic_and(&xor_out, &e3, &mut rng);

        let mut expected = BitVector::zero(64);
        for i in 0..64 {
            expected.set(i, (m1.get(i) ^ m2.get(i)) && m3.get(i));
        }
        assert_eq!(pk.decrypt(&and_out), expected);
    }
}
