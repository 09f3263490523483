use crate::error::{Argon2Error, DecodeCause};
use crate::hasher::VERSION;

use std::str::FromStr;

const ALGORITHM: &str = "argon2id";

/// The fields of a hash string, split apart but not yet base64-decoded
#[derive(Debug)]
pub struct TokenizedHash<'a> {
    pub mem_cost_kib: u32,
    pub iterations: u32,
    pub threads: u32,
    pub b64_salt: &'a str,
    pub b64_hash: &'a str,
}

impl<'a> TokenizedHash<'a> {
    /// Splits `$argon2id$v=<v>$m=<m>,t=<t>,p=<p>$<salt>$<hash>` into its fields.
    ///
    /// The version is checked before anything after it is looked at, so a hash string from an
    /// unsupported version is reported as such even if its parameters use a different layout.
    pub fn tokenize(s: &'a str) -> Result<Self, Argon2Error> {
        let fields: Vec<&str> = s.split('$').collect();

        let [prefix, alg, version, costs, b64_salt, b64_hash] = fields[..] else {
            return Err(Argon2Error::InvalidFormat(
                "Hash string must consist of six '$'-delimited fields",
            ));
        };

        if !prefix.is_empty() {
            return Err(Argon2Error::InvalidFormat("Must begin with $argon2id"));
        }

        if alg != ALGORITHM {
            return Err(Argon2Error::InvalidFormat("Must begin with $argon2id"));
        }

        let v = key_value(version, "v", "version")?;
        if v != VERSION {
            return Err(Argon2Error::IncompatibleVersion {
                found: v,
                supported: VERSION,
            });
        }

        let mut params = costs.split(',');
        let mut next_param =
            |key: &'static str, field: &'static str| -> Result<u32, Argon2Error> {
                let pair = params
                    .next()
                    .ok_or_else(|| Argon2Error::decode(field, DecodeCause::Syntax("missing")))?;

                let value = key_value(pair, key, field)?;
                if value == 0 {
                    return Err(Argon2Error::decode(field, DecodeCause::Zero));
                }

                Ok(value)
            };

        let mem_cost_kib = next_param("m", "memory cost")?;
        let iterations = next_param("t", "iterations")?;
        let threads = next_param("p", "parallelism")?;

        if params.next().is_some() {
            return Err(Argon2Error::decode(
                "parameters",
                DecodeCause::Syntax("unexpected trailing parameter"),
            ));
        }

        Ok(Self {
            mem_cost_kib,
            iterations,
            threads,
            b64_salt,
            b64_hash,
        })
    }
}

/// Parses `<key>=<u32>`, requiring the literal key.
fn key_value(pair: &str, key: &str, field: &'static str) -> Result<u32, Argon2Error> {
    let value = pair
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| {
            Argon2Error::decode(field, DecodeCause::Syntax("unexpected key or missing '='"))
        })?;

    // u32::from_str tolerates a leading '+', which never appears in a canonical hash string
    if value.starts_with('+') {
        return Err(Argon2Error::decode(field, DecodeCause::Syntax("unexpected sign")));
    }

    u32::from_str(value).map_err(|e| Argon2Error::decode(field, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str =
        "$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc";

    fn decode_field(s: &str) -> &'static str {
        match TokenizedHash::tokenize(s) {
            Err(Argon2Error::Decode { field, .. }) => field,
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize() {
        let tokens = TokenizedHash::tokenize(HASH).unwrap();

        assert_eq!(tokens.mem_cost_kib, 128);
        assert_eq!(tokens.iterations, 3);
        assert_eq!(tokens.threads, 2);
        assert_eq!(tokens.b64_salt, "AQIDBAUGBwg");
        assert_eq!(tokens.b64_hash, "7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc");
    }

    #[test]
    fn test_incompatible_version() {
        for s in [
            "$argon2id$v=16$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
            "$argon2id$v=1$m=65536,t=3,p=2$WDlCUU15WlF4OFNGd3d6OA$0nJpNUfEq3ELzeoGwcd+cG4er9wu3DgYCBJb2w3nnI8",
            "$argon2id$v=18$t=3;m=128$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
        ] {
            assert!(
                matches!(
                    TokenizedHash::tokenize(s),
                    Err(Argon2Error::IncompatibleVersion {
                        supported: 19,
                        ..
                    })
                ),
                "{s}"
            );
        }
    }

    #[test]
    fn test_wrong_field_count() {
        for s in [
            "",
            "$argon2id$v=19$m=65536,t=3,p=2$salt",
            "$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc$",
            "$argon2id$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
            "$argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
        ] {
            assert!(
                matches!(
                    TokenizedHash::tokenize(s),
                    Err(Argon2Error::InvalidFormat(_))
                ),
                "{s}"
            );
        }
    }

    #[test]
    fn test_wrong_prefix_or_algorithm() {
        for s in [
            "argon2id$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc$x",
            "$argon2i$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
            "$argon2$v=19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWeisxk1VVjNeXqtQ8ZM/Oc",
        ] {
            assert!(
                matches!(
                    TokenizedHash::tokenize(s),
                    Err(Argon2Error::InvalidFormat(_))
                ),
                "{s}"
            );
        }
    }

    #[test]
    fn test_malformed_version() {
        assert_eq!(
            decode_field("$argon2id$19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "version"
        );
        assert_eq!(
            decode_field("$argon2id$v=x$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "version"
        );
        assert_eq!(
            decode_field("$argon2id$v=-19$m=128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "version"
        );
    }

    #[test]
    fn test_parameters_must_be_in_order() {
        assert_eq!(
            decode_field("$argon2id$v=19$t=3,m=128,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "memory cost"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=128,p=2,t=3$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "iterations"
        );
    }

    #[test]
    fn test_malformed_parameters() {
        assert_eq!(
            decode_field("$argon2id$v=19$m=128,t3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "iterations"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=128,t=3$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "parallelism"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=128,t=3,p=2,$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "parameters"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=128,t=3,p=2,m=128$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "parameters"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "memory cost"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=+128,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "memory cost"
        );
        assert_eq!(
            decode_field("$argon2id$v=19$m=99999999999,t=3,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe"),
            "memory cost"
        );
    }

    #[test]
    fn test_zero_parameters() {
        let err = TokenizedHash::tokenize(
            "$argon2id$v=19$m=128,t=0,p=2$AQIDBAUGBwg$7OU7S/azjYpnXXySR52cFWe",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Argon2Error::Decode {
                field: "iterations",
                source: DecodeCause::Zero
            }
        ));
    }
}
