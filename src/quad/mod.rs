//! Multi-quadratic-tuple algebra: tuples of homogeneous degree-2 forms over
//! GF(2), the building block the key layer uses to obfuscate plaintexts and
//! to describe homomorphic gates.

mod chain;
mod tuple;

pub use chain::MultiQuadTupleChain;
pub use tuple::{triangle_index, triangle_len, MultiQuadTuple};
