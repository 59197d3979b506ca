//! Secure random bytes from the operating system.
//!
//! Every key and nonce in pasta comes from here. A failing OS source is
//! reported as `EntropySource`; there is no fallback generator.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{PastaError, Result};

/// Fill a fresh buffer of `size` bytes from the OS CSPRNG.
pub fn generate_bytes(size: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; size];
    fill(&mut bytes)?;
    Ok(bytes)
}

/// Like [`generate_bytes`] but for a fixed-size array.
pub fn generate_array<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    fill(&mut bytes)?;
    Ok(bytes)
}

fn fill(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| PastaError::EntropySource(e.to_string()))
}
