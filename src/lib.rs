//! A symmetric, somewhat-homomorphic encryption scheme over GF(2).
//!
//! The scheme encrypts fixed-width bit vectors and exposes three gates that
//! can be evaluated directly on ciphertexts, without decryption: left
//! multiplication by a plaintext bit matrix ([`key::BridgeKey::lmm_z`] /
//! [`key::PublicKey::homomorphic_lmm`]), bitwise XOR
//! ([`key::XorEvaluator`]), and bitwise AND ([`key::AndEvaluator`]). Left
//! and right bit-shift and single-column-broadcast operators fall out of
//! LMM as specializations.
//!
//! The [`key`] module is the entry point: [`key::PrivateKey`] generates
//! secret key material and offers `encrypt`/`decrypt`; [`key::BridgeKey`]
//! derives, from a `PrivateKey`, the algebraic objects each gate needs;
//! [`key::PublicKey`] is the untrusted-facing wrapper that exposes only the
//! gates. [`linalg`] and [`quad`] are the dense GF(2) linear-algebra and
//! multi-quadratic-tuple libraries the key layer is built from.
//!
//! # Example
//!
//! ```
//! use gf2she::key::{BridgeKey, PrivateKey, PublicKey};
//! use gf2she::linalg::BitVector;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let private = PrivateKey::new(1, &mut rng); // N = 1 word = 64 bits
//! let bridge = BridgeKey::new(&private, &mut rng);
//! let public = PublicKey::new(&bridge);
//!
//! let m1 = BitVector::from_u64(0xFFFF_FFFF_FFFF_FFFF);
//! let m2 = BitVector::from_u64(0x5555_5555_5555_5555);
//! let e1 = private.encrypt(&m1, &mut rng);
//! let e2 = private.encrypt(&m2, &mut rng);
//!
//! let xored = public.homomorphic_xor(&e1, &e2, &mut rng);
//! assert_eq!(private.decrypt(&xored), BitVector::from_u64(0xAAAA_AAAA_AAAA_AAAA));
//! ```

#![no_std]
#![deny(missing_debug_implementations, rust_2018_idioms)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod key;
pub mod linalg;
pub mod quad;
mod util;
