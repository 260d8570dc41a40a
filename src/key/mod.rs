//! The key layer: [`PrivateKey`] generates secret randomness and offers
//! encrypt/decrypt; [`BridgeKey`] derives homomorphic-gate material from a
//! `PrivateKey`; [`PublicKey`] is a thin untrusted-facing wrapper over a
//! `BridgeKey` that exposes only the gates.

mod and_evaluator;
mod bridge;
mod private;
mod public;
#[cfg(test)]
mod test_support;
mod xor_evaluator;

pub use and_evaluator::AndEvaluator;
pub use bridge::BridgeKey;
pub use private::PrivateKey;
pub use public::PublicKey;
pub use xor_evaluator::XorEvaluator;
