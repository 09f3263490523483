use std::num::ParseIntError;

use thiserror::Error;

/// Errors that may occur when using this crate
#[derive(Debug, Error)]
pub enum Argon2Error {
    /// Indicates that the user of a type or function has specified an invalid parameter or
    /// set of parameters
    #[error("Argon2Error: Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The secure random source could not supply the bytes needed for a salt
    #[error("Argon2Error: Failed to generate random bytes: {0}")]
    RandomSource(#[from] rand::Error),

    /// The hash string does not have the shape of an Argon2id hash string
    #[error("Argon2Error: Invalid hash format: {0}")]
    InvalidFormat(&'static str),

    /// The hash string was produced by a version of Argon2 this crate does not verify
    #[error("Argon2Error: Incompatible version {found} (supported: {supported})")]
    IncompatibleVersion {
        /// Version found in the hash string
        found: u32,
        /// The only version this crate produces and accepts
        supported: u32,
    },

    /// A field of the hash string is present but could not be decoded
    #[error("Argon2Error: Failed to decode {field}: {source}")]
    Decode {
        /// Name of the offending field
        field: &'static str,
        /// What went wrong with it
        #[source]
        source: DecodeCause,
    },

    /// A storage value that is neither null nor text was handed to the storage adapter
    #[error("Argon2Error: Cannot scan the given value: expected text, found {found}")]
    ScanTypeMismatch {
        /// Kind of the value that was received
        found: &'static str,
    },

    /// The Argon2 primitive rejected the parameters
    #[error("Argon2Error: Key derivation failed: {0}")]
    Kdf(#[from] argon2::Error),
}

/// The reason a hash string field failed to decode
#[derive(Debug, Error)]
pub enum DecodeCause {
    /// The field does not have the expected `key=value` layout
    #[error("{0}")]
    Syntax(&'static str),

    /// A numeric value could not be parsed
    #[error("invalid number: {0}")]
    Number(#[from] ParseIntError),

    /// A cost parameter was zero
    #[error("value must be greater than zero")]
    Zero,

    /// Base64 payload is not valid unpadded standard base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The value decodes but the Argon2 primitive can never hash with it
    #[error("unusable value: {0}")]
    Unusable(#[from] argon2::Error),

    /// A cost parameter exceeds what this crate is willing to allocate
    #[error("value must not exceed {max}")]
    TooLarge {
        /// Largest accepted value
        max: u32,
    },
}

impl Argon2Error {
    pub(crate) fn decode(field: &'static str, source: impl Into<DecodeCause>) -> Self {
        Argon2Error::Decode {
            field,
            source: source.into(),
        }
    }
}
