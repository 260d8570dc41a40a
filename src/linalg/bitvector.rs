use alloc::vec;
use alloc::vec::Vec;
use core::ops::BitXor;

use rand::{CryptoRng, RngCore};

const LIMB_BITS: usize = 64;

/// A dense vector over GF(2), indexed 0..len-1, packed into 64-bit limbs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    len: usize,
    limbs: Vec<u64>,
}

fn limbs_for(len: usize) -> usize {
    (len + LIMB_BITS - 1) / LIMB_BITS
}

impl BitVector {
    /// The all-zero vector of the given length.
    pub fn zero(len: usize) -> Self {
        BitVector {
            len,
            limbs: vec![0u64; limbs_for(len)],
        }
    }

    /// A 64-bit vector holding `value`'s bits, least-significant bit first.
    /// Convenient for the scheme's `N = 1` (one 64-bit word) test scenarios.
    pub fn from_u64(value: u64) -> Self {
        BitVector {
            len: LIMB_BITS,
            limbs: vec![value],
        }
    }

    /// A uniformly random vector of the given length.
    pub fn random<R: RngCore + CryptoRng>(len: usize, rng: &mut R) -> Self {
        let mut limbs = vec![0u64; limbs_for(len)];
        for limb in limbs.iter_mut() {
            *limb = rng.next_u64();
        }
        let mut v = BitVector { len, limbs };
        v.mask_tail();
        v
    }

    /// Number of bits in this vector.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears any bits in the final limb beyond `len`, so that equality and
    /// whole-limb XOR stay well-defined regardless of how a vector was built.
    fn mask_tail(&mut self) {
        let used = self.len % LIMB_BITS;
        if used != 0 {
            if let Some(last) = self.limbs.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit index out of range");
        (self.limbs[i / LIMB_BITS] >> (i % LIMB_BITS)) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        debug_assert!(i < self.len, "bit index out of range");
        let limb = &mut self.limbs[i / LIMB_BITS];
        let mask = 1u64 << (i % LIMB_BITS);
        if value {
            *limb |= mask;
        } else {
            *limb &= !mask;
        }
    }

    /// Vertical concatenation: stacks `self` over `other`.
    pub fn vcat(&self, other: &BitVector) -> BitVector {
        let mut out = BitVector::zero(self.len + other.len);
        for i in 0..self.len {
            out.set(i, self.get(i));
        }
        for i in 0..other.len {
            out.set(self.len + i, other.get(i));
        }
        out
    }

    /// Concatenates three vectors in order.
    pub fn vcat3(a: &BitVector, b: &BitVector, c: &BitVector) -> BitVector {
        a.vcat(b).vcat(c)
    }

    /// Splits this vector into two equal halves.
    pub fn split2(&self) -> (BitVector, BitVector) {
        debug_assert_eq!(self.len % 2, 0);
        let half = self.len / 2;
        (self.slice(0, half), self.slice(half, self.len))
    }

    /// Extracts the bits in `[start, end)` as their own vector.
    pub fn slice(&self, start: usize, end: usize) -> BitVector {
        let mut out = BitVector::zero(end - start);
        for i in start..end {
            out.set(i - start, self.get(i));
        }
        out
    }

    /// GF(2) dot product: parity of the bitwise AND.
    pub fn dot(&self, other: &BitVector) -> bool {
        debug_assert_eq!(self.len, other.len);
        let mut parity = 0u64;
        for (a, b) in self.limbs.iter().zip(other.limbs.iter()) {
            parity ^= (a & b).count_ones() as u64 & 1;
        }
        parity & 1 != 0
    }

    pub(crate) fn limbs(&self) -> &[u64] {
        &self.limbs
    }
}

impl BitXor for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: &BitVector) -> BitVector {
        debug_assert_eq!(self.len, rhs.len);
        let limbs = self
            .limbs
            .iter()
            .zip(rhs.limbs.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        BitVector {
            len: self.len,
            limbs,
        }
    }
}

impl BitXor for BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: BitVector) -> BitVector {
        &self ^ &rhs
    }
}
