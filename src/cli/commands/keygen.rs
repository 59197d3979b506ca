//! `pasta keygen`: print a fresh random 256-bit key.

use crate::cli::{load_settings, Cli};
use crate::crypto::{generate_encryption_key, generate_hmac_key};
use crate::errors::{PastaError, Result};

/// Execute the `keygen` command.
pub fn execute(cli: &Cli, kind: &str) -> Result<()> {
    let settings = load_settings(cli)?;

    let key = match kind.to_lowercase().as_str() {
        "encryption" | "enc" => generate_encryption_key()?,
        "hmac" | "mac" => generate_hmac_key()?,
        other => {
            return Err(PastaError::CommandFailed(format!(
                "unknown key kind '{other}' — supported: encryption, hmac"
            )))
        }
    };

    println!("{}", settings.encoding.encode(&key[..]));
    Ok(())
}
