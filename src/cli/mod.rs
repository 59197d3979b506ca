//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{Read, Write};
use std::path::Path;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{OutputEncoding, Settings};
use crate::crypto::CipherKind;
use crate::errors::{PastaError, Result};

/// pasta CLI: recommended cryptography recipes.
#[derive(Parser)]
#[command(
    name = "pasta",
    about = "Recommended cryptography recipes: encrypt, hash, MAC and sign",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Cipher for encrypt/decrypt: aes-gcm or secretbox (overrides .pasta.toml)
    #[arg(long, global = true)]
    pub cipher: Option<String>,

    /// Text encoding for keys, envelopes and tags: hex or base64
    #[arg(long, global = true)]
    pub encoding: Option<String>,

    /// Directory holding .pasta.toml (default: current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a random 256-bit key
    Keygen {
        /// Key purpose: encryption (default) or hmac
        #[arg(long, default_value = "encryption")]
        kind: String,
    },

    /// Encrypt a file or stdin (nonce || ciphertext || tag)
    Encrypt {
        /// 32-byte key in the configured encoding
        #[arg(long, env = "PASTA_KEY", hide_env_values = true)]
        key: String,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
        /// Write the raw envelope here instead of printing it encoded
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decrypt a raw envelope file, or an encoded envelope on stdin
    Decrypt {
        /// 32-byte key in the configured encoding
        #[arg(long, env = "PASTA_KEY", hide_env_values = true)]
        key: String,
        /// Input file holding the raw envelope (reads encoded stdin if omitted)
        input: Option<String>,
        /// Write the plaintext here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Hash a file or stdin with SHA-512/256
    Hash {
        /// Use SHA-256 instead (compatibility only)
        #[arg(long)]
        sha256: bool,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
    },

    /// Hash a password with bcrypt
    HashPassword {
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Check a password against a bcrypt hash
    VerifyPassword {
        /// The bcrypt hash string ($2b$12$...)
        hash: String,
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Compute an HMAC-SHA512/256 tag
    Hmac {
        /// HMAC key in the configured encoding
        #[arg(long, env = "PASTA_HMAC_KEY", hide_env_values = true)]
        key: String,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
    },

    /// Verify an HMAC-SHA512/256 tag
    HmacVerify {
        /// HMAC key in the configured encoding
        #[arg(long, env = "PASTA_HMAC_KEY", hide_env_values = true)]
        key: String,
        /// Expected tag in the configured encoding
        #[arg(long)]
        tag: String,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
    },

    /// Generate a P-256 signing key pair as PEM files
    SigningKey {
        /// Directory to write the key files into
        #[arg(long, default_value = ".")]
        out_dir: String,
        /// Base file name: <name>.pem and <name>.pub.pem
        #[arg(long, default_value = "signing")]
        name: String,
        /// Overwrite existing key files
        #[arg(short, long)]
        force: bool,
    },

    /// Sign a file or stdin with ECDSA P-256 / SHA-256
    Sign {
        /// Path to an EC PRIVATE KEY PEM file
        #[arg(long)]
        key: String,
        /// Signature format: compact (default) or der
        #[arg(short, long, default_value = "compact")]
        format: String,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
    },

    /// Verify an ECDSA P-256 / SHA-256 signature
    Verify {
        /// Path to a PUBLIC KEY PEM file
        #[arg(long)]
        public_key: String,
        /// The signature (compact string, or DER in the configured encoding)
        #[arg(long)]
        signature: String,
        /// Signature format: compact (default) or der
        #[arg(short, long, default_value = "compact")]
        format: String,
        /// Input file (reads stdin if omitted)
        input: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.pasta.toml` and apply the global `--cipher` / `--encoding` flags.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let dir = match &cli.config_dir {
        Some(dir) => std::path::PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let mut settings = Settings::load(&dir)?;

    if let Some(cipher) = &cli.cipher {
        settings.cipher = cipher.parse::<CipherKind>()?;
    }
    if let Some(encoding) = &cli.encoding {
        settings.encoding = encoding.parse::<OutputEncoding>()?;
    }

    Ok(settings)
}

/// Decode a key passed on the command line.
///
/// Returns `Zeroizing<Vec<u8>>` so the key is wiped from memory on drop.
pub fn decode_key(settings: &Settings, text: &str) -> Result<Zeroizing<Vec<u8>>> {
    settings
        .encoding
        .decode(text)
        .map(Zeroizing::new)
        .map_err(|_| PastaError::CommandFailed(format!("key is not valid {}", settings.encoding)))
}

/// Read all bytes from a file, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p != "-" => Ok(std::fs::read(p)?),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write bytes to a file, or raw to stdout when `path` is `None`.
pub fn write_output(path: Option<&str>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, bytes)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Get a password, trying in order:
/// 1. `PASTA_PASSWORD` env var (CI/CD)
/// 2. The first line of stdin, if `from_stdin`
/// 3. Interactive prompt (with confirmation when `confirm`)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn read_password(from_stdin: bool, confirm: bool) -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first (CI/CD friendly).
    if let Ok(pw) = std::env::var("PASTA_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // 2. Read a single line from stdin.
    if from_stdin {
        let mut line = Zeroizing::new(String::new());
        std::io::stdin().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(trimmed.to_string()));
    }

    // 3. Fall back to interactive prompt.
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match, try again");
    }
    let pw = prompt
        .interact()
        .map_err(|e| PastaError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a PEM file, with a friendlier error when it is missing.
pub fn read_pem_file(path: &str) -> Result<Zeroizing<Vec<u8>>> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(PastaError::CommandFailed(format!(
            "key file not found at {}",
            p.display()
        )));
    }
    Ok(Zeroizing::new(std::fs::read(p)?))
}
