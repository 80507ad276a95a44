//! Fixed-length bitstring genomes and their genetic operators.
//!
//! A genome has one bit per feature of the search space; a set bit marks an
//! active feature. Bits are packed into `u64` blocks, and every operator
//! preserves the genome length.

use rand::Rng;

const BLOCK_BITS: usize = u64::BITS as usize;

/// A fixed-length bitstring.
///
/// Bits past `len` in the last block are always zero, so equality and
/// popcounts are plain block operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    blocks: Vec<u64>,
    len: usize,
}

impl Genome {
    /// A genome of `len` zero bits.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Genome {
            blocks: vec![0; len.div_ceil(BLOCK_BITS)],
            len,
        }
    }

    /// A genome with exactly one uniformly random bit set.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    #[must_use]
    pub fn random_single_bit<R>(len: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut genome = Genome::zeroed(len);
        genome.set(rng.random_range(0..len), true);
        genome
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index out of range");
        self.blocks[index / BLOCK_BITS] & (1 << (index % BLOCK_BITS)) != 0
    }

    /// Sets the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index out of range");
        let mask = 1 << (index % BLOCK_BITS);
        if value {
            self.blocks[index / BLOCK_BITS] |= mask;
        } else {
            self.blocks[index / BLOCK_BITS] &= !mask;
        }
    }

    /// Flips the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn flip(&mut self, index: usize) {
        assert!(index < self.len, "bit index out of range");
        self.blocks[index / BLOCK_BITS] ^= 1 << (index % BLOCK_BITS);
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterates the indices of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(bi, &block)| {
            let mut bits = block;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let index = bi * BLOCK_BITS + bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(index)
            })
        })
    }
}

/// Two-point segment exchange: bits in `start..end` come from `inner`, all
/// others from `outer`.
///
/// The genome length is invariant: the child has the parents' length.
///
/// # Panics
///
/// Panics if the parents' lengths differ or the cut points are not ordered
/// within the genome.
#[must_use]
pub fn splice(outer: &Genome, inner: &Genome, start: usize, end: usize) -> Genome {
    assert_eq!(outer.len(), inner.len(), "parent lengths must match");
    assert!(start <= end && end <= outer.len(), "cut points out of order");

    let mut child = outer.clone();
    for index in start..end {
        child.set(index, inner.get(index));
    }
    child
}

/// Flips every bit independently with probability `rate`.
pub fn mutate<R>(genome: &mut Genome, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for index in 0..genome.len() {
        if rng.random_bool(rate) {
            genome.flip(index);
        }
    }
}
