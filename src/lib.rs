#![deny(missing_docs)]

//! A password hash value type built on [Argon2id](https://en.wikipedia.org/wiki/Argon2).
//! Argon2 is a memory-hard [key derivation function](https://en.wikipedia.org/wiki/Key_derivation_function)
//! and was the winner of the [Password Hashing Competition](https://www.password-hashing.net).
//!
//! A [`Hash`] holds the derived key together with the salt and cost parameters it was
//! computed with. It renders to, and parses from, the standard hash string format:
//!
//! _$argon2id$v=19$m=65536,t=3,p=2$WDlCUU15WlF4OFNGd3d6OA$0nJpNUfEq3ELzeoGwcd+cG4er9wu3DgYCBJb2w3nnI8_
//!
//! Because the parameters travel with the hash, hashes stored under older parameters keep
//! verifying after the defaults in [`Params`] are raised. Only version 19 (0x13) of Argon2 is
//! accepted; hash strings with any other version fail with
//! [`Argon2Error::IncompatibleVersion`].
//!
//! # Usage
//!
//! To use argon2-hash, add the following to your Cargo.toml:
//!
//! ```toml
//! [dependencies]
//! argon2-hash = "0.1"
//! ```
//!
//! The `serde` feature serializes a `Hash` as its hash string and makes [`Params`]
//! deserializable from application config. The `diesel` feature lets a `Hash` be stored
//! directly in a Postgres `TEXT` column (see [`storage`]).
//!
//! # Examples
//!
//! Hash a password, then verify the hash:
//!
//! ```rust
//! use argon2_hash::Hash;
//!
//! let hash = Hash::new("password").unwrap();
//! assert!(hash.verify("password"));
//! assert!(!hash.verify("wrong"));
//! ```
//!
//! Verify a hash from a hash string:
//!
//! ```rust
//! use argon2_hash::Hash;
//! use std::str::FromStr;
//!
//! let hash_string = "$argon2id$v=19$m=128,t=2,p=1$VnZ3ZFNhZkc$djHLRc+4K/DqQL0f8DMAQQ";
//!
//! let hash = Hash::from_str(hash_string).unwrap();
//! assert!(hash.verify("password"));
//! ```
//!
//! Change the parameters used for hashing:
//!
//! ```rust
//! use argon2_hash::Hasher;
//!
//! let hash = Hasher::new()
//!         .hash_length(42)
//!         .iterations(2)
//!         .memory_cost_kib(1024)
//!         .parallelism(1)
//!         .hash("password")
//!         .unwrap();
//!
//! assert!(hash.verify("password"));
//! assert_eq!(hash.as_bytes().len(), 42);
//! assert_eq!(hash.salt_bytes().len(), 16);
//! ```
//!
//! Generate a hash string and parse it back:
//!
//! ```rust
//! use argon2_hash::{Hash, Hasher};
//! use std::str::FromStr;
//!
//! let hash = Hasher::new().memory_cost_kib(1024).hash("password").unwrap();
//! let hash_string = hash.to_string();
//!
//! assert!(Hash::from_str(&hash_string).unwrap().verify("password"));
//! ```
//!
//! Verify a hash from bytes:
//!
//! ```rust
//! use argon2_hash::Hash;
//!
//! let salt = b"testsalt";
//! let hash_bytes = [155, 147, 76, 205, 220, 49, 114, 102];
//!
//! let hash = Hash::from_parts(
//!     &hash_bytes,
//!     salt,
//!     16, // memory cost in kibibytes
//!     1, // iterations
//!     1, // parallelism
//! );
//!
//! assert!(hash.verify(b"password"));
//! ```

mod error;
mod hasher;
mod lexer;
mod params;
mod random;
pub mod storage;

pub use error::{Argon2Error, DecodeCause};
pub use hasher::{Hash, Hasher, VERSION};
pub use params::Params;
pub use random::random_bytes;
