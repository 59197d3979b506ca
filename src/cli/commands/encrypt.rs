//! `pasta encrypt` / `pasta decrypt`: seal and open envelopes.
//!
//! Files hold raw envelopes; the terminal gets them in the configured
//! text encoding.

use crate::cli::output;
use crate::cli::{decode_key, load_settings, read_input, write_output, Cli};
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute_encrypt(
    cli: &Cli,
    key: &str,
    input: Option<&str>,
    out_path: Option<&str>,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let key = decode_key(&settings, key)?;
    let plaintext = read_input(input)?;

    let envelope = settings.cipher.encrypt(&plaintext, &key)?;

    match out_path {
        Some(path) => {
            write_output(Some(path), &envelope)?;
            output::success(&format!(
                "Encrypted {} bytes with {} into {path}",
                plaintext.len(),
                settings.cipher
            ));
        }
        None => println!("{}", settings.encoding.encode(&envelope)),
    }

    Ok(())
}

/// Execute the `decrypt` command.
pub fn execute_decrypt(
    cli: &Cli,
    key: &str,
    input: Option<&str>,
    out_path: Option<&str>,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let key = decode_key(&settings, key)?;

    let envelope = match input {
        Some(path) if path != "-" => read_input(Some(path))?,
        _ => {
            let text = read_input(None)?;
            settings.encoding.decode(&String::from_utf8_lossy(&text))?
        }
    };

    let plaintext = zeroize::Zeroizing::new(settings.cipher.decrypt(&envelope, &key)?);
    write_output(out_path, &plaintext)?;

    if let Some(path) = out_path {
        output::success(&format!("Decrypted into {path}"));
    }
    Ok(())
}
