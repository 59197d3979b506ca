//! Asymmetric signatures: ECDSA over NIST P-256 with SHA-256.
//!
//! ECDSA P-256 is the best compromise between cryptographic concerns and
//! support in the wider ecosystem (JOSE / RFC 7518 ES256 among others).
//!
//! Signing is hedged: the per-signature nonce mixes fresh OS randomness
//! into the RFC 6979 derivation, so a weak RNG alone does not leak the key.
//! All randomness is drawn through `random`, so an entropy failure is an
//! `EntropySource` error rather than a panic.
//!
//! Private keys read from PEM may sit on another NIST curve. They are
//! represented so that `sign` can refuse them instead of producing a
//! signature under the wrong parameters.

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::FieldBytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zeroize::Zeroizing;

use super::hash::hash_sha256;
use super::random;
use crate::errors::{PastaError, Result};

/// Bit size of the only curve `sign` accepts.
pub const ECDSA_BIT_SIZE: usize = 256;

/// Width of one P-256 scalar in bytes.
pub const SCALAR_SIZE: usize = ECDSA_BIT_SIZE / 8;

/// Named curves pasta can load keys for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    P256,
    P384,
}

impl EcCurve {
    pub fn bit_size(self) -> usize {
        match self {
            EcCurve::P256 => 256,
            EcCurve::P384 => 384,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
        }
    }
}

/// An elliptic-curve private key.
#[derive(Debug, Clone)]
pub enum EcPrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
}

impl EcPrivateKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            EcPrivateKey::P256(_) => EcCurve::P256,
            EcPrivateKey::P384(_) => EcCurve::P384,
        }
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcPrivateKey::P256(k) => EcPublicKey::P256(k.public_key()),
            EcPrivateKey::P384(k) => EcPublicKey::P384(k.public_key()),
        }
    }
}

/// An elliptic-curve public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcPublicKey {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
}

impl EcPublicKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            EcPublicKey::P256(_) => EcCurve::P256,
            EcPublicKey::P384(_) => EcCurve::P384,
        }
    }

    /// Uncompressed SEC1 point (`0x04 || X || Y`).
    pub fn to_uncompressed_point(&self) -> Vec<u8> {
        match self {
            EcPublicKey::P256(k) => k.to_encoded_point(false).as_bytes().to_vec(),
            EcPublicKey::P384(k) => k.to_encoded_point(false).as_bytes().to_vec(),
        }
    }
}

/// An ECDSA signature as its two integers.
///
/// `r` and `s` are big-endian with leading zero bytes stripped, so zero is
/// the empty slice and two equal integers always compare equal. How the
/// pair goes over the wire is up to `marshal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl EcdsaSignature {
    /// Build a signature from big-endian integers of any width.
    pub fn from_be_bytes(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: strip_leading_zeros(r).to_vec(),
            s: strip_leading_zeros(s).to_vec(),
        }
    }

    pub fn r(&self) -> &[u8] {
        &self.r
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }

    fn to_p256(&self) -> Option<Signature> {
        let r = left_pad(&self.r)?;
        let s = left_pad(&self.s)?;
        Signature::from_scalars(
            FieldBytes::clone_from_slice(&r),
            FieldBytes::clone_from_slice(&s),
        )
        .ok()
    }
}

/// Generate a fresh P-256 signing key from the OS RNG.
pub fn generate_signing_key() -> Result<EcPrivateKey> {
    tracing::debug!("generating P-256 signing key");
    loop {
        let candidate = Zeroizing::new(random::generate_array::<SCALAR_SIZE>()?);
        // Zero and values >= n are rejected; draw again.
        if let Ok(secret) = p256::SecretKey::from_slice(&candidate[..]) {
            return Ok(EcPrivateKey::P256(secret));
        }
    }
}

/// Sign `data` with ECDSA P-256 / SHA-256.
///
/// Keys on any other curve fail with `InvalidCurveParams`.
pub fn sign(data: &[u8], key: &EcPrivateKey) -> Result<EcdsaSignature> {
    // sanity check
    if key.curve().bit_size() != ECDSA_BIT_SIZE {
        tracing::debug!(curve = key.curve().name(), "refusing to sign");
        return Err(PastaError::InvalidCurveParams);
    }
    let EcPrivateKey::P256(secret) = key else {
        return Err(PastaError::InvalidCurveParams);
    };

    let digest = hash_sha256(data);

    // Hedging entropy is drawn up front so a failing OS RNG surfaces here.
    let seed = Zeroizing::new(random::generate_array::<32>()?);
    let mut rng = StdRng::from_seed(*seed);

    let signing_key = SigningKey::from(secret);
    let signature: Signature = signing_key
        .sign_prehash_with_rng(&mut rng, &digest)
        .map_err(|_| PastaError::SigningFailed)?;

    let (r, s) = signature.split_bytes();
    Ok(EcdsaSignature::from_be_bytes(&r, &s))
}

/// Verify an ECDSA P-256 / SHA-256 signature.
///
/// Any failure, including a non-P-256 key or out-of-range integers, is
/// simply `false`.
pub fn verify(data: &[u8], signature: &EcdsaSignature, public_key: &EcPublicKey) -> bool {
    let EcPublicKey::P256(public_key) = public_key else {
        return false;
    };
    let Some(signature) = signature.to_p256() else {
        return false;
    };

    let digest = hash_sha256(data);
    VerifyingKey::from(public_key)
        .verify_prehash(&digest, &signature)
        .is_ok()
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Left-pad a big-endian integer to one scalar width.
///
/// Returns `None` if it does not fit.
pub(crate) fn left_pad(bytes: &[u8]) -> Option<[u8; SCALAR_SIZE]> {
    let bytes = strip_leading_zeros(bytes);
    if bytes.len() > SCALAR_SIZE {
        return None;
    }
    let mut out = [0u8; SCALAR_SIZE];
    out[SCALAR_SIZE - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}
