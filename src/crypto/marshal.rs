//! Wire encodings for signatures and keys.
//!
//! Signatures:
//! - ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }` (X9.62, RFC 3279)
//! - compact `base64url(r || s)` with fixed-width halves (RFC 7515 A.3.1)
//!
//! Keys:
//! - public keys as PKIX SubjectPublicKeyInfo in a `PUBLIC KEY` PEM block
//! - private keys as SEC1 in an `EC PRIVATE KEY` PEM block

use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL;
use base64::Engine;
use der::asn1::{ObjectIdentifier, UintRef};
use der::{Decode, Encode, Sequence};
use p256::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use zeroize::Zeroizing;

use super::signing::{left_pad, EcPrivateKey, EcPublicKey, EcdsaSignature, SCALAR_SIZE};
use crate::errors::{PastaError, Result};

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub const PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// `openssl ecparam -genkey` writes this block ahead of the key.
const EC_PARAMETERS_LABEL: &str = "EC PARAMETERS";

/// id-ecPublicKey (RFC 5480).
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
/// secp256r1 / prime256v1.
const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
/// secp384r1.
const P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_DASHES: &str = "-----";

#[derive(Sequence)]
struct DerSignature<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Encode a signature as an ASN.1 DER sequence.
pub fn encode_signature_der(sig: &EcdsaSignature) -> Result<Vec<u8>> {
    let der_sig = DerSignature {
        r: der_uint(sig.r())?,
        s: der_uint(sig.s())?,
    };
    der_sig
        .to_der()
        .map_err(|e| PastaError::InvalidEncoding(format!("DER encoding failed: {e}")))
}

/// Decode an ASN.1 DER signature.
///
/// Negative integers, trailing bytes and any structural fault are
/// `MalformedSignature`.
pub fn decode_signature_der(bytes: &[u8]) -> Result<EcdsaSignature> {
    let der_sig = DerSignature::from_der(bytes).map_err(|_| PastaError::MalformedSignature)?;
    Ok(EcdsaSignature::from_be_bytes(
        der_sig.r.as_bytes(),
        der_sig.s.as_bytes(),
    ))
}

/// Encode a signature per RFC 7515 Appendix A.3.1.
///
/// Each integer is left-padded to 32 bytes, so the output always decodes
/// to 64 bytes.
pub fn encode_signature_compact(sig: &EcdsaSignature) -> Result<String> {
    let r = left_pad(sig.r()).ok_or_else(|| oversize("r"))?;
    let s = left_pad(sig.s()).ok_or_else(|| oversize("s"))?;

    let mut combined = Vec::with_capacity(2 * SCALAR_SIZE);
    combined.extend_from_slice(&r);
    combined.extend_from_slice(&s);
    Ok(BASE64URL.encode(combined))
}

/// Decode a compact RFC 7515 signature.
pub fn decode_signature_compact(encoded: &str) -> Result<EcdsaSignature> {
    let combined = BASE64URL
        .decode(encoded)
        .map_err(|e| PastaError::InvalidEncoding(format!("bad base64url: {e}")))?;

    if combined.len() != 2 * SCALAR_SIZE {
        return Err(PastaError::InvalidEncoding(format!(
            "expected {} bytes, got {}",
            2 * SCALAR_SIZE,
            combined.len()
        )));
    }

    let (r, s) = combined.split_at(SCALAR_SIZE);
    Ok(EcdsaSignature::from_be_bytes(r, s))
}

/// UintRef encodes an empty slice as a zero-length INTEGER, which DER forbids.
fn der_uint(bytes: &[u8]) -> Result<UintRef<'_>> {
    let bytes = if bytes.is_empty() { &[0u8][..] } else { bytes };
    UintRef::new(bytes).map_err(|e| PastaError::InvalidEncoding(format!("bad integer: {e}")))
}

fn oversize(name: &str) -> PastaError {
    PastaError::InvalidEncoding(format!("{name} does not fit in {SCALAR_SIZE} bytes"))
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Encode a public key as a PKIX `PUBLIC KEY` PEM block.
pub fn encode_public_key_pem(key: &EcPublicKey) -> Result<String> {
    let pem = match key {
        EcPublicKey::P256(k) => k.to_public_key_pem(LineEnding::LF),
        EcPublicKey::P384(k) => k.to_public_key_pem(LineEnding::LF),
    };
    pem.map_err(|e| PastaError::MalformedKey(format!("PKIX encoding failed: {e}")))
}

/// Decode a PEM `PUBLIC KEY` block holding an EC public key.
pub fn decode_public_key_pem(encoded: &[u8]) -> Result<EcPublicKey> {
    let (label, der_bytes) = read_pem_block(encoded, &[])?;
    if label != PUBLIC_KEY_LABEL {
        return Err(PastaError::WrongPemType(label));
    }

    let info = spki::SubjectPublicKeyInfoRef::try_from(der_bytes.as_slice())
        .map_err(|e| PastaError::MalformedKey(format!("bad PKIX structure: {e}")))?;
    if info.algorithm.oid != EC_PUBLIC_KEY_OID {
        return Err(PastaError::NotEcKey);
    }
    let curve = info
        .algorithm
        .parameters_oid()
        .map_err(|_| PastaError::UnsupportedCurve)?;

    tracing::debug!(%curve, "decoding EC public key");
    if curve == P256_OID {
        p256::PublicKey::from_public_key_der(&der_bytes)
            .map(EcPublicKey::P256)
            .map_err(|e| PastaError::MalformedKey(e.to_string()))
    } else if curve == P384_OID {
        p384::PublicKey::from_public_key_der(&der_bytes)
            .map(EcPublicKey::P384)
            .map_err(|e| PastaError::MalformedKey(e.to_string()))
    } else {
        Err(PastaError::UnsupportedCurve)
    }
}

/// Encode a private key as a SEC1 `EC PRIVATE KEY` PEM block.
///
/// The block carries the named curve and the public point.
pub fn encode_private_key_pem(key: &EcPrivateKey) -> Result<Zeroizing<String>> {
    let (curve, scalar) = match key {
        EcPrivateKey::P256(k) => (P256_OID, Zeroizing::new(k.to_bytes().to_vec())),
        EcPrivateKey::P384(k) => (P384_OID, Zeroizing::new(k.to_bytes().to_vec())),
    };
    let point = key.public_key().to_uncompressed_point();

    let ec_key = sec1::EcPrivateKey {
        private_key: &scalar[..],
        parameters: Some(sec1::EcParameters::NamedCurve(curve)),
        public_key: Some(point.as_slice()),
    };
    let der_bytes = Zeroizing::new(
        ec_key
            .to_der()
            .map_err(|e| PastaError::MalformedKey(format!("SEC1 encoding failed: {e}")))?,
    );

    pem_rfc7468::encode_string(PRIVATE_KEY_LABEL, LineEnding::LF, &der_bytes)
        .map(Zeroizing::new)
        .map_err(|e| PastaError::MalformedKey(format!("PEM encoding failed: {e}")))
}

/// Decode a PEM `EC PRIVATE KEY` block.
///
/// Leading `EC PARAMETERS` blocks are skipped.
pub fn decode_private_key_pem(encoded: &[u8]) -> Result<EcPrivateKey> {
    let (label, der_bytes) = read_pem_block(encoded, &[EC_PARAMETERS_LABEL])?;
    if label != PRIVATE_KEY_LABEL {
        return Err(PastaError::WrongPemType(label));
    }
    let der_bytes = Zeroizing::new(der_bytes);

    let ec_key = sec1::EcPrivateKey::try_from(der_bytes.as_slice())
        .map_err(|e| PastaError::MalformedKey(format!("bad SEC1 structure: {e}")))?;
    let curve = ec_key
        .parameters
        .and_then(|p| p.named_curve())
        .ok_or(PastaError::UnsupportedCurve)?;

    if curve == P256_OID {
        p256::SecretKey::from_sec1_der(&der_bytes)
            .map(EcPrivateKey::P256)
            .map_err(|_| PastaError::MalformedKey("invalid P-256 scalar".into()))
    } else if curve == P384_OID {
        p384::SecretKey::from_sec1_der(&der_bytes)
            .map(EcPrivateKey::P384)
            .map_err(|_| PastaError::MalformedKey("invalid P-384 scalar".into()))
    } else {
        Err(PastaError::UnsupportedCurve)
    }
}

/// Find the first PEM block whose label is not in `skip` and decode it.
fn read_pem_block(encoded: &[u8], skip: &[&str]) -> Result<(String, Vec<u8>)> {
    let text = std::str::from_utf8(encoded)
        .map_err(|_| PastaError::WrongPemType("<binary data>".into()))?;

    for block in pem_blocks(text) {
        let label = pem_rfc7468::decode_label(block.as_bytes())
            .map_err(|e| PastaError::MalformedKey(format!("bad PEM framing: {e}")))?;
        if skip.contains(&label) {
            continue;
        }

        let (label, der_bytes) = pem_rfc7468::decode_vec(block.as_bytes())
            .map_err(|e| PastaError::MalformedKey(format!("bad PEM body: {e}")))?;
        return Ok((label.to_string(), der_bytes));
    }

    Err(PastaError::WrongPemType("<none>".into()))
}

/// Split concatenated PEM text into individual `BEGIN`..`END` blocks.
fn pem_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(PEM_BEGIN) {
        let tail = &rest[start..];
        let Some(end) = tail.find(PEM_END) else {
            break;
        };
        let after_end = end + PEM_END.len();
        let Some(close) = tail[after_end..].find(PEM_DASHES) else {
            break;
        };
        let block_len = after_end + close + PEM_DASHES.len();
        blocks.push(&tail[..block_len]);
        rest = &tail[block_len..];
    }

    blocks
}
