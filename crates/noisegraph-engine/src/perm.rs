//! Seeded permutation table shared by all lattice noise primitives.

use crate::error::ConfigError;
use crate::rng::DeterministicRng;

/// Default permutation table size.
pub const DEFAULT_TABLE_SIZE: usize = 256;

const MIN_TABLE_SIZE: usize = 4;
const MAX_TABLE_SIZE: usize = 65536;

/// A pseudo-random permutation of `[0, N)` built deterministically from a
/// seed via a Fisher-Yates shuffle.
///
/// The table is the unique source of randomness for gradient selection,
/// lattice hashing, and feature-point placement: two tables built from equal
/// seeds are bit-identical, and the table is read-only after construction.
///
/// The size must be a power of two so lattice coordinates can be masked
/// instead of reduced modulo N. The table is stored doubled (length `2N`),
/// so nested lookups like `table[masked(x) + table[masked(y)]]` stay in
/// bounds without a second masking step.
#[derive(Clone)]
pub struct PermutationTable {
    table: Vec<u16>,
    mask: i64,
    size: usize,
}

impl PermutationTable {
    /// Build a table of the given size using draws from `rng`.
    ///
    /// Fails with [`ConfigError::InvalidTableSize`] unless `size` is a power
    /// of two in `[4, 65536]`.
    pub fn new(rng: &mut DeterministicRng, size: usize) -> Result<Self, ConfigError> {
        if !size.is_power_of_two() || !(MIN_TABLE_SIZE..=MAX_TABLE_SIZE).contains(&size) {
            return Err(ConfigError::InvalidTableSize(size));
        }

        let mut source: Vec<u16> = (0..size).map(|v| v as u16).collect();

        // Fisher-Yates shuffle
        for i in (1..size).rev() {
            let j = rng.gen_range(0..=i);
            source.swap(i, j);
        }

        // Double the table for overflow-free nested lookups
        let mut table = Vec::with_capacity(size * 2);
        table.extend_from_slice(&source);
        table.extend_from_slice(&source);

        Ok(Self {
            table,
            mask: (size - 1) as i64,
            size,
        })
    }

    /// Build a default-size (256 entry) table from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&mut DeterministicRng::new(seed), DEFAULT_TABLE_SIZE)
            .expect("default table size is a valid power of two")
    }

    /// Number of distinct values in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn masked(&self, v: i64) -> usize {
        (v & self.mask) as usize
    }

    #[inline]
    fn at(&self, index: usize) -> usize {
        self.table[index] as usize
    }

    /// Hash a 1D lattice coordinate.
    #[inline]
    pub fn hash1(&self, x: i64) -> usize {
        self.at(self.masked(x))
    }

    /// Hash a 2D lattice coordinate.
    #[inline]
    pub fn hash2(&self, x: i64, y: i64) -> usize {
        self.at(self.masked(x) + self.hash1(y))
    }

    /// Hash a 3D lattice coordinate.
    #[inline]
    pub fn hash3(&self, x: i64, y: i64, z: i64) -> usize {
        self.at(self.masked(x) + self.hash2(y, z))
    }

    /// Hash a 4D lattice coordinate.
    #[inline]
    pub fn hash4(&self, x: i64, y: i64, z: i64, w: i64) -> usize {
        self.at(self.masked(x) + self.hash3(y, z, w))
    }

    /// Map a hash to a scalar in `[0, 1)`.
    #[inline]
    pub fn unit(&self, hash: usize) -> f64 {
        hash as f64 / self.size as f64
    }

    /// Map a hash to a scalar in `[-1, 1]`.
    #[inline]
    pub fn signed_unit(&self, hash: usize) -> f64 {
        (hash as f64 / (self.size - 1) as f64) * 2.0 - 1.0
    }
}
