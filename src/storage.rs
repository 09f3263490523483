//! Storing a [`Hash`] in a database column.
//!
//! A hash is stored as its hash string in a nullable text column. The zero value maps to
//! `NULL` and `NULL` maps back to the zero value, so an optional credential needs no
//! `Option<Hash>` wrapper.
//!
//! [`read`] and [`write`] work on [`Scalar`], a driver-agnostic column value. With the
//! `diesel` feature enabled, `Hash` can also be used directly as a Postgres `Text` or
//! `Nullable<Text>` field.

use crate::error::Argon2Error;
use crate::hasher::Hash;

use std::str::FromStr;

/// A single column value as handed over by a database driver
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// SQL `NULL`
    Null,
    /// A text value
    Text(String),
    /// A binary value
    Bytes(Vec<u8>),
    /// An integer value
    Integer(i64),
    /// A floating-point value
    Float(f64),
    /// A boolean value
    Bool(bool),
}

impl Scalar {
    fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Text(_) => "text",
            Scalar::Bytes(_) => "bytes",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "bool",
        }
    }
}

impl From<Option<String>> for Scalar {
    fn from(value: Option<String>) -> Self {
        value.map_or(Scalar::Null, Scalar::Text)
    }
}

/// Reads a hash from a column value. `NULL` yields the zero value.
///
/// ```rust
/// use argon2_hash::storage::{self, Scalar};
///
/// let hash = storage::read(Scalar::Null).unwrap();
/// assert!(!hash.is_valid());
///
/// assert!(storage::read(Scalar::Integer(7)).is_err());
/// ```
pub fn read(raw: Scalar) -> Result<Hash, Argon2Error> {
    match raw {
        Scalar::Null => Ok(Hash::default()),
        Scalar::Text(s) => Hash::from_str(&s),
        other => Err(Argon2Error::ScanTypeMismatch {
            found: other.kind(),
        }),
    }
}

/// Writes a hash as a column value. The zero value yields `NULL`.
pub fn write(hash: &Hash) -> Scalar {
    if !hash.is_valid() {
        return Scalar::Null;
    }

    Scalar::Text(hash.to_string())
}

#[cfg(feature = "diesel")]
mod diesel_impl {
    use super::*;

    use diesel::{
        deserialize::{self, FromSql},
        pg::{Pg, PgValue},
        serialize::{self, IsNull, Output, ToSql},
        sql_types::{Nullable, Text},
    };
    use std::io::Write;

    impl ToSql<Text, Pg> for Hash {
        fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
            match write(self) {
                Scalar::Text(s) => {
                    out.write_all(s.as_bytes())?;
                    Ok(IsNull::No)
                }
                _ => Ok(IsNull::Yes),
            }
        }
    }

    impl FromSql<Text, Pg> for Hash {
        fn from_sql(bytes: PgValue) -> deserialize::Result<Self> {
            let s = std::str::from_utf8(bytes.as_bytes())?;
            Ok(read(Scalar::Text(s.to_owned()))?)
        }
    }

    impl FromSql<Nullable<Text>, Pg> for Hash {
        fn from_sql(bytes: PgValue) -> deserialize::Result<Self> {
            <Self as FromSql<Text, Pg>>::from_sql(bytes)
        }

        fn from_nullable_sql(bytes: Option<PgValue>) -> deserialize::Result<Self> {
            match bytes {
                Some(bytes) => <Self as FromSql<Text, Pg>>::from_sql(bytes),
                None => Ok(read(Scalar::Null)?),
            }
        }
    }
}
