use crate::error::Argon2Error;

use rand::{rngs::OsRng, CryptoRng, Fill, RngCore};

/// Generates `len` bytes using the operating system's cryptographically-secure random number
/// generator.
///
/// ```rust
/// let salt = argon2_hash::random_bytes(16).unwrap();
/// assert_eq!(salt.len(), 16);
/// ```
pub fn random_bytes(len: usize) -> Result<Vec<u8>, Argon2Error> {
    random_bytes_from(len, &mut OsRng)
}

pub(crate) fn random_bytes_from<R>(len: usize, rng: &mut R) -> Result<Vec<u8>, Argon2Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = vec![0u8; len];
    buf.as_mut_slice().try_fill(rng)?;

    Ok(buf)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// An RNG whose entropy source is permanently unavailable
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other(
                "entropy source unavailable",
            )))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_random_bytes() {
        let a = random_bytes(16).unwrap();
        let b = random_bytes(16).unwrap();

        assert_eq!(a.len(), 16);
        assert_eq!(b.len(), 16);
        assert_ne!(a, b);

        assert!(random_bytes(0).unwrap().is_empty());
    }

    #[test]
    fn test_random_source_failure() {
        let err = random_bytes_from(16, &mut FailingRng).unwrap_err();

        assert!(matches!(err, Argon2Error::RandomSource(_)));
        assert!(err.to_string().contains("entropy source unavailable"));
    }
}
