use rand::{CryptoRng, RngCore};

use super::tuple::MultiQuadTuple;
use crate::linalg::BitVector;

/// An ordered composition of `n -> n` [`MultiQuadTuple`] layers. Evaluating
/// the chain applies each layer in turn, so a chain of `L` layers computes a
/// function of algebraic degree `2^L` in its input even though every single
/// layer is itself only quadratic.
#[derive(Clone, Debug)]
pub struct MultiQuadTupleChain {
    width: usize,
    layers: Vec<MultiQuadTuple>,
}

impl MultiQuadTupleChain {
    /// Samples `layers` independent random `width -> width` quadratic
    /// tuples and chains them in sampled order.
    pub fn random<R: RngCore + CryptoRng>(width: usize, layers: usize, rng: &mut R) -> Self {
        let layers = (0..layers)
            .map(|_| MultiQuadTuple::random(width, width, rng))
            .collect();
        MultiQuadTupleChain { width, layers }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, i: usize) -> &MultiQuadTuple {
        &self.layers[i]
    }

    /// Evaluates the full composition `layers[last] . .. . layers[0]` at `v`.
    pub fn eval(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(v.len(), self.width);
        let mut cur = v.clone();
        for layer in &self.layers {
            cur = layer.eval(&cur);
        }
        cur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn eval_matches_manual_layer_composition() {
        let mut rng = StdRng::seed_from_u64(30);
        let chain = MultiQuadTupleChain::random(8, 2, &mut rng);
        let v = BitVector::random(8, &mut rng);
        let manual = chain.get(1).eval(&chain.get(0).eval(&v));
        assert_eq!(chain.eval(&v), manual);
    }

    #[test]
    fn chain_is_deterministic_given_sampled_layers() {
        let mut rng = StdRng::seed_from_u64(31);
        let chain = MultiQuadTupleChain::random(8, 2, &mut rng);
        let v = BitVector::random(8, &mut rng);
        assert_eq!(chain.eval(&v), chain.eval(&v));
    }
}
