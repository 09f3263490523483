#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost parameters used when hashing a password.
///
/// `Params::default()` carries the values new hashes are created with:
///
/// * Iterations: 3
/// * Memory Cost: 65536 kibibytes (64 MiB)
/// * Parallelism: 2 lanes
/// * Hash Length: 32 bytes
/// * Salt Length: 16 bytes
///
/// Hashes parsed from a hash string keep the parameters embedded in the string, so raising
/// these defaults never breaks verification of hashes that were stored earlier.
///
/// Lower-cost parameters are useful in tests, where the default memory cost makes every
/// hash take a noticeable amount of time:
///
/// ```rust
/// use argon2_hash::{Hasher, Params};
///
/// let params = Params::default().with_iterations(1).with_memory_cost_kib(64);
/// let hash = Hasher::with_params(params).hash("password").unwrap();
/// assert!(hash.verify("password"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Params {
    /// Number of passes over memory (`t` in a hash string)
    pub iterations: u32,
    /// Memory cost in kibibytes (`m` in a hash string)
    pub memory_cost_kib: u32,
    /// Number of lanes (`p` in a hash string)
    pub parallelism: u32,
    /// Length of the derived key, in bytes
    pub hash_length: u32,
    /// Length of freshly generated salts, in bytes
    pub salt_length: u32,
}

impl Params {
    /// Default number of iterations for new hashes
    pub const DEFAULT_ITERATIONS: u32 = 3;
    /// Default memory cost for new hashes, in kibibytes
    pub const DEFAULT_MEMORY_COST_KIB: u32 = 64 * 1024;
    /// Default parallelism for new hashes
    pub const DEFAULT_PARALLELISM: u32 = 2;
    /// Default derived key length, in bytes
    pub const DEFAULT_HASH_LENGTH: u32 = 32;
    /// Default salt length, in bytes
    pub const DEFAULT_SALT_LENGTH: u32 = 16;
    /// Largest memory cost accepted from a parsed hash string, in kibibytes (4 GiB)
    pub const MAX_MEMORY_COST_KIB: u32 = 4 * 1024 * 1024;

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the memory cost, in kibibytes.
    pub fn with_memory_cost_kib(mut self, cost: u32) -> Self {
        self.memory_cost_kib = cost;
        self
    }

    /// Sets the number of lanes.
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets the derived key length, in bytes.
    pub fn with_hash_length(mut self, hash_len: u32) -> Self {
        self.hash_length = hash_len;
        self
    }

    /// Sets the length of generated salts, in bytes.
    pub fn with_salt_length(mut self, salt_len: u32) -> Self {
        self.salt_length = salt_len;
        self
    }

    pub(crate) fn to_argon2(self) -> Result<argon2::Params, argon2::Error> {
        let output_len =
            usize::try_from(self.hash_length).map_err(|_| argon2::Error::OutputTooLong)?;

        argon2::Params::new(
            self.memory_cost_kib,
            self.iterations,
            self.parallelism,
            Some(output_len),
        )
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            memory_cost_kib: Self::DEFAULT_MEMORY_COST_KIB,
            parallelism: Self::DEFAULT_PARALLELISM,
            hash_length: Self::DEFAULT_HASH_LENGTH,
            salt_length: Self::DEFAULT_SALT_LENGTH,
        }
    }
}
