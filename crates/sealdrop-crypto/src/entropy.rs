//! Injectable randomness provider
//!
//! Key generation and nonce sampling go through an explicit [`EntropySource`]
//! rather than a global RNG, so deterministic fakes can drive tests.

use rand::rngs::OsRng;

/// Source of cryptographically secure random bytes
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes
    fn fill(&self, dest: &mut [u8]);
}

/// Default entropy source backed by the operating system RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) {
        rand::RngCore::fill_bytes(&mut OsRng, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_entropy_fills() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsEntropy.fill(&mut a);
        OsEntropy.fill(&mut b);
        assert_ne!(a, b);
    }
}
