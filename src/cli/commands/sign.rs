//! `pasta signing-key`, `pasta sign`, `pasta verify`.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, read_input, read_pem_file, Cli};
use crate::config::Settings;
use crate::crypto::{
    decode_private_key_pem, decode_public_key_pem, decode_signature_compact,
    decode_signature_der, encode_private_key_pem, encode_public_key_pem,
    encode_signature_compact, encode_signature_der, generate_signing_key, sign, verify,
    EcdsaSignature,
};
use crate::errors::{PastaError, Result};

/// How a signature is written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignatureFormat {
    /// RFC 7515 base64url `r || s`.
    Compact,
    /// ASN.1 DER, printed in the configured encoding.
    Der,
}

fn parse_format(name: &str) -> Result<SignatureFormat> {
    match name.to_lowercase().as_str() {
        "compact" | "jwt" | "jose" => Ok(SignatureFormat::Compact),
        "der" | "asn1" => Ok(SignatureFormat::Der),
        other => Err(PastaError::CommandFailed(format!(
            "unknown signature format '{other}' — supported: compact, der"
        ))),
    }
}

/// Execute the `signing-key` command.
///
/// Writes `<name>.pem` (private, owner-only on Unix) and `<name>.pub.pem`.
pub fn execute_generate(out_dir: &str, name: &str, force: bool) -> Result<()> {
    let dir = Path::new(out_dir);
    let private_path = dir.join(format!("{name}.pem"));
    let public_path = dir.join(format!("{name}.pub.pem"));

    if !force {
        for path in [&private_path, &public_path] {
            if path.exists() {
                return Err(PastaError::CommandFailed(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
        }
    }

    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let key = generate_signing_key()?;
    let private_pem = encode_private_key_pem(&key)?;
    let public_pem = encode_public_key_pem(&key.public_key())?;

    write_private_file(&private_path, private_pem.as_bytes())?;
    fs::write(&public_path, public_pem.as_bytes())?;

    output::success(&format!(
        "Wrote {} and {}",
        private_path.display(),
        public_path.display()
    ));
    Ok(())
}

/// Write key material so it is never readable by others, even briefly.
fn write_private_file(path: &Path, bytes: &[u8]) -> Result<()> {
    // A pre-existing file keeps its mode through `open`, so drop it first.
    if path.exists() {
        fs::remove_file(path)?;
    }

    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

/// Execute the `sign` command.
pub fn execute_sign(cli: &Cli, key_path: &str, format: &str, input: Option<&str>) -> Result<()> {
    let settings = load_settings(cli)?;
    let format = parse_format(format)?;

    let key = decode_private_key_pem(&read_pem_file(key_path)?)?;
    let data = read_input(input)?;

    let signature = sign(&data, &key)?;
    println!("{}", render_signature(&settings, format, &signature)?);
    Ok(())
}

/// Execute the `verify` command.
pub fn execute_verify(
    cli: &Cli,
    public_key_path: &str,
    signature: &str,
    format: &str,
    input: Option<&str>,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let format = parse_format(format)?;

    let public_key = decode_public_key_pem(&read_pem_file(public_key_path)?)?;
    let signature = parse_signature(&settings, format, signature)?;
    let data = read_input(input)?;

    if !verify(&data, &signature, &public_key) {
        return Err(PastaError::CommandFailed("signature verification failed".into()));
    }

    output::success("Signature is valid");
    Ok(())
}

fn render_signature(
    settings: &Settings,
    format: SignatureFormat,
    signature: &EcdsaSignature,
) -> Result<String> {
    match format {
        SignatureFormat::Compact => encode_signature_compact(signature),
        SignatureFormat::Der => Ok(settings.encoding.encode(&encode_signature_der(signature)?)),
    }
}

fn parse_signature(
    settings: &Settings,
    format: SignatureFormat,
    text: &str,
) -> Result<EcdsaSignature> {
    match format {
        SignatureFormat::Compact => decode_signature_compact(text.trim()),
        SignatureFormat::Der => decode_signature_der(&settings.encoding.decode(text)?),
    }
}
