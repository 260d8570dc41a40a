use rand::{CryptoRng, RngCore};

use crate::linalg::{BitMatrix, BitVector};
use crate::quad::MultiQuadTupleChain;
use crate::util::{self, bits};

/// The secret key of the scheme: a random invertible mixing matrix, a random
/// quadratic obfuscation chain, and four independent random invertible
/// "unary"/"binary" obfuscation matrices. `words` fixes the plaintext width
/// in 64-bit words; every other dimension in the scheme is a fixed multiple
/// of `bits(words)`.
///
/// Only [`crate::key::BridgeKey`] reads `m`, `f`, `cu1`, `cu2`, `cb1`, `cb2`
/// directly (via crate-private accessors) — callers outside this crate see
/// only [`PrivateKey::encrypt`] and [`PrivateKey::decrypt`].
#[derive(Clone, Debug)]
pub struct PrivateKey {
    words: usize,
    m: BitMatrix,
    f: MultiQuadTupleChain,
    cu1: BitMatrix,
    cu2: BitMatrix,
    cb1: BitMatrix,
    cb2: BitMatrix,
}

impl PrivateKey {
    /// Samples a fresh private key for a `words`-word (i.e. `64 * words`
    /// bit) plaintext width.
    pub fn new<R: RngCore + CryptoRng>(words: usize, rng: &mut R) -> Self {
        let n = bits(words);
        PrivateKey {
            words,
            m: util::random_invertible(2 * n, rng),
            f: MultiQuadTupleChain::random(n, 2, rng),
            cu1: util::random_invertible(2 * n, rng),
            cu2: util::random_invertible(2 * n, rng),
            cb1: util::random_invertible(3 * n, rng),
            cb2: util::random_invertible(3 * n, rng),
        }
    }

    /// The plaintext width, in 64-bit words.
    pub fn words(&self) -> usize {
        self.words
    }

    /// The plaintext width, in bits (`N` in the scheme's notation).
    pub fn n(&self) -> usize {
        bits(self.words)
    }

    /// `M . concat(m xor f(r), r)` for a fresh uniform `r`.
    pub fn encrypt<R: RngCore + CryptoRng>(&self, m: &BitVector, rng: &mut R) -> BitVector {
        debug_assert_eq!(m.len(), self.n());
        let r = BitVector::random(self.n(), rng);
        let masked = m ^ &self.f.eval(&r);
        let y = masked.vcat(&r);
        self.m.mul_vec(&y)
    }

    /// Solves `M . y = x`, splits `y` into halves `(y1, y2)`, and returns
    /// `y1 xor f(y2)`.
    pub fn decrypt(&self, x: &BitVector) -> BitVector {
        debug_assert_eq!(x.len(), 2 * self.n());
        let y = self.m.solve(x);
        let (y1, y2) = y.split2();
        &y1 ^ &self.f.eval(&y2)
    }

    pub(crate) fn m(&self) -> &BitMatrix {
        &self.m
    }

    pub(crate) fn f(&self) -> &MultiQuadTupleChain {
        &self.f
    }

    pub(crate) fn cu1(&self) -> &BitMatrix {
        &self.cu1
    }

    pub(crate) fn cu2(&self) -> &BitMatrix {
        &self.cu2
    }

    pub(crate) fn cb1(&self) -> &BitMatrix {
        &self.cb1
    }

    pub(crate) fn cb2(&self) -> &BitMatrix {
        &self.cb2
    }
}
