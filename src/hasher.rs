use crate::error::{Argon2Error, DecodeCause};
use crate::lexer::TokenizedHash;
use crate::params::Params;
use crate::random::random_bytes_from;

use argon2::{Algorithm, Argon2, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD as b64_stdnopad;
use base64::Engine;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// The Argon2 version this crate hashes with. Hash strings carrying any other version are
/// rejected with [`Argon2Error::IncompatibleVersion`].
pub const VERSION: u32 = Version::V0x13 as u32;

// Shortest salt the Argon2 primitive accepts
const MIN_SALT_LEN: usize = 8;

/// A builder for a hash. Starts out with [`Params::default()`].
#[derive(Clone, Debug, Default)]
pub struct Hasher<'a> {
    params: Params,
    custom_salt: Option<&'a [u8]>,
}

impl<'a> Hasher<'a> {
    /// Create a new `Hasher` with the default parameters (see [`Params`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new `Hasher` that uses the given parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            custom_salt: None,
        }
    }

    /// When left unspecified, a salt is generated using a cryptographically-secure random
    /// number generator. Only use this function if a hash must be generated
    /// deterministically with a known salt.
    ///
    /// The length of the provided salt overrides the configured salt length.
    pub fn custom_salt<SLT>(mut self, salt: &'a SLT) -> Self
    where
        SLT: AsRef<[u8]> + ?Sized,
    {
        self.custom_salt = Some(salt.as_ref());
        self
    }

    /// The length of generated salts, in bytes.
    pub fn salt_length(mut self, salt_len: u32) -> Self {
        self.params.salt_length = salt_len;
        self
    }

    /// The length of the resulting hash, in bytes.
    pub fn hash_length(mut self, hash_len: u32) -> Self {
        self.params.hash_length = hash_len;
        self
    }

    /// The number of passes over memory.
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.params.iterations = iterations;
        self
    }

    /// The amount of memory required to compute a hash, in kibibytes.
    pub fn memory_cost_kib(mut self, cost: u32) -> Self {
        self.params.memory_cost_kib = cost;
        self
    }

    /// The number of lanes used to compute a hash.
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.params.parallelism = parallelism;
        self
    }

    /// Consumes the `Hasher` and returns a hash, salted with bytes from the operating
    /// system's random number generator.
    ///
    /// This is an expensive operation by design. Callers on an async runtime should move it
    /// to a blocking thread.
    pub fn hash<P>(self, password: &P) -> Result<Hash, Argon2Error>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        self.hash_with_rng(password, &mut OsRng)
    }

    /// Same as [`Hasher::hash()`], drawing the salt from `rng` instead.
    pub fn hash_with_rng<P, R>(self, password: &P, rng: &mut R) -> Result<Hash, Argon2Error>
    where
        P: AsRef<[u8]> + ?Sized,
        R: RngCore + CryptoRng + ?Sized,
    {
        let salt = match self.custom_salt {
            Some(s) => s.to_vec(),
            None => {
                let salt_len = usize::try_from(self.params.salt_length)
                    .map_err(|_| Argon2Error::InvalidParameter("Salt length is too big"))?;

                random_bytes_from(salt_len, rng)?
            }
        };

        // Careful not to use the configured salt length here; a custom salt overrides it
        let salt_length = u32::try_from(salt.len())
            .map_err(|_| Argon2Error::InvalidParameter("Salt length is too big"))?;

        let params = Params {
            salt_length,
            ..self.params
        };

        let hash = derive(password.as_ref(), &salt, params)?;

        Ok(Hash {
            params,
            salt,
            hash,
            is_valid: true,
        })
    }
}

fn derive(password: &[u8], salt: &[u8], params: Params) -> Result<Vec<u8>, argon2::Error> {
    let _span = tracing::trace_span!(
        "argon2id",
        m = params.memory_cost_kib,
        t = params.iterations,
        p = params.parallelism
    )
    .entered();

    let ctx = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

    let mut hash = vec![0u8; params.hash_length as usize];
    ctx.hash_password_into(password, salt, &mut hash)?;

    Ok(hash)
}

/// A container for an Argon2id hash, the corresponding salt, and the parameters used for
/// hashing.
///
/// `Hash::default()` is the zero value: it holds no salt or hash, renders to an empty string
/// and never verifies any password.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "diesel",
    derive(diesel::deserialize::FromSqlRow, diesel::expression::AsExpression),
    diesel(sql_type = diesel::sql_types::Text)
)]
pub struct Hash {
    params: Params,
    salt: Vec<u8>,
    hash: Vec<u8>,
    is_valid: bool,
}

impl Hash {
    /// Hashes `password` with the default parameters and a fresh random salt.
    pub fn new<P>(password: &P) -> Result<Self, Argon2Error>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        Hasher::default().hash(password)
    }

    /// Builds a hash from its raw parts, as an alternative to parsing a hash string.
    pub fn from_parts(
        hash: &[u8],
        salt: &[u8],
        mem_cost_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Self {
        Self {
            params: Params {
                iterations,
                memory_cost_kib: mem_cost_kib,
                parallelism,
                hash_length: u32::try_from(hash.len()).unwrap_or(u32::MAX),
                salt_length: u32::try_from(salt.len()).unwrap_or(u32::MAX),
            },
            salt: Vec::from(salt),
            hash: Vec::from(hash),
            is_valid: true,
        }
    }

    /// Returns a reference to a byte slice of the computed hash/key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Returns a reference to a byte slice of the salt used to generate the hash.
    pub fn salt_bytes(&self) -> &[u8] {
        &self.salt
    }

    /// The parameters the hash was computed with. For a parsed hash these are the ones found
    /// in the hash string, which need not match the current defaults.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Returns `false` for the zero value.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Checks if the hash matches the provided password.
    ///
    /// The password is re-hashed with this hash's own salt and parameters, then the two
    /// hashes are compared in constant time. Any failure to re-hash counts as a mismatch.
    pub fn verify<P>(&self, password: &P) -> bool
    where
        P: AsRef<[u8]> + ?Sized,
    {
        if !self.is_valid || self.hash.is_empty() {
            return false;
        }

        let hash_length: u32 = match self.hash.len().try_into() {
            Ok(l) => l,
            Err(_) => return false,
        };

        let params = Params {
            hash_length,
            ..self.params
        };

        let hashed_password = match derive(password.as_ref(), &self.salt, params) {
            Ok(h) => Zeroizing::new(h),
            Err(_) => return false,
        };

        if hashed_password.len() != self.hash.len() {
            return false;
        }

        hashed_password.ct_eq(self.hash.as_slice()).into()
    }
}

impl fmt::Display for Hash {
    /// Writes the hash string. Aside from the hash, the hash string includes the salt and
    /// parameters used to generate the hash, making it easy to store in a database:
    ///
    /// _$argon2id$v=19$m=65536,t=3,p=2$WDlCUU15WlF4OFNGd3d6OA$0nJpNUfEq3ELzeoGwcd+cG4er9wu3DgYCBJb2w3nnI8_
    ///
    /// The zero value writes nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid {
            return Ok(());
        }

        write!(
            f,
            "$argon2id$v={}$m={},t={},p={}${}${}",
            VERSION,
            self.params.memory_cost_kib,
            self.params.iterations,
            self.params.parallelism,
            b64_stdnopad.encode(&self.salt),
            b64_stdnopad.encode(&self.hash),
        )
    }
}

impl FromStr for Hash {
    type Err = Argon2Error;

    /// Deserializes a hash string into parts (the hash, the salt, parameters) that can be
    /// used for verification. The length of the hash is taken from the decoded hash itself.
    ///
    /// Only `argon2id` hash strings are accepted; `$argon2i$` and `$argon2d$` strings fail
    /// with [`Argon2Error::InvalidFormat`] rather than being verified as Argon2id.
    ///
    /// Values that decode but could never be verified fail with [`Argon2Error::Decode`]
    /// naming the field: salts shorter than 8 bytes, hashes shorter than 4 bytes, a memory
    /// cost below `8 * p` or above [`Params::MAX_MEMORY_COST_KIB`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokenized_hash = TokenizedHash::tokenize(s)?;

        let decoded_salt = b64_stdnopad
            .decode(tokenized_hash.b64_salt)
            .map_err(|e| Argon2Error::decode("salt", e))?;

        let decoded_hash = b64_stdnopad
            .decode(tokenized_hash.b64_hash)
            .map_err(|e| Argon2Error::decode("hash", e))?;

        if decoded_salt.is_empty() {
            return Err(Argon2Error::decode("salt", DecodeCause::Syntax("empty")));
        }

        if decoded_hash.is_empty() {
            return Err(Argon2Error::decode("hash", DecodeCause::Syntax("empty")));
        }

        let hash_length = u32::try_from(decoded_hash.len())
            .map_err(|_| Argon2Error::decode("hash", DecodeCause::Syntax("too long")))?;
        let salt_length = u32::try_from(decoded_salt.len())
            .map_err(|_| Argon2Error::decode("salt", DecodeCause::Syntax("too long")))?;

        if decoded_salt.len() < MIN_SALT_LEN {
            return Err(Argon2Error::decode("salt", argon2::Error::SaltTooShort));
        }

        let params = Params {
            iterations: tokenized_hash.iterations,
            memory_cost_kib: tokenized_hash.mem_cost_kib,
            parallelism: tokenized_hash.threads,
            hash_length,
            salt_length,
        };

        if params.memory_cost_kib > Params::MAX_MEMORY_COST_KIB {
            return Err(Argon2Error::decode(
                "memory cost",
                DecodeCause::TooLarge {
                    max: Params::MAX_MEMORY_COST_KIB,
                },
            ));
        }

        params.to_argon2().map_err(|e| {
            let field = rejected_field(&e);
            Argon2Error::decode(field, e)
        })?;

        Ok(Self {
            params,
            salt: decoded_salt,
            hash: decoded_hash,
            is_valid: true,
        })
    }
}

/// Names the hash string field the primitive objected to.
fn rejected_field(err: &argon2::Error) -> &'static str {
    match err {
        argon2::Error::MemoryTooLittle | argon2::Error::MemoryTooMuch => "memory cost",
        argon2::Error::TimeTooSmall => "iterations",
        argon2::Error::ThreadsTooFew | argon2::Error::ThreadsTooMany => "parallelism",
        argon2::Error::OutputTooShort | argon2::Error::OutputTooLong => "hash",
        _ => "parameters",
    }
}

impl TryFrom<&str> for Hash {
    type Error = Argon2Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_str(s)
    }
}

impl PartialEq for Hash {
    fn eq(&self, other: &Self) -> bool {
        self.is_valid == other.is_valid
            && self.params == other.params
            && self.salt == other.salt
            && bool::from(self.hash.as_slice().ct_eq(other.hash.as_slice()))
    }
}

impl Eq for Hash {}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Hash;

    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Hash {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Hash {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;

            if s.is_empty() {
                return Ok(Hash::default());
            }

            Hash::from_str(&s).map_err(de::Error::custom)
        }
    }
}
