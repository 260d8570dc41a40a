//! Small shared constants and random-sampling helpers used across the crate.

use rand::{CryptoRng, RngCore};

use crate::linalg::BitMatrix;

/// Number of bits in one plaintext "word". The key layer's width parameter
/// `N` is measured in words: `N = 1` is a 64-bit plaintext.
pub const WORD_BITS: usize = 64;

/// Raw bit width corresponding to `words` plaintext words.
#[inline(always)]
pub const fn bits(words: usize) -> usize {
    words * WORD_BITS
}

/// Draws a uniformly random invertible square `BitMatrix` of the given
/// dimension by rejection sampling: draw a random matrix, check it is
/// invertible via Gaussian elimination, retry on failure.
pub fn random_invertible<R: RngCore + CryptoRng>(n: usize, rng: &mut R) -> BitMatrix {
    loop {
        let candidate = BitMatrix::random(n, n, rng);
        if let Some(inv) = candidate.try_inverse() {
            // `inv` is discarded; what matters here is that it exists.
            let _ = inv;
            return candidate;
        }
    }
}
