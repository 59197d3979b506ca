use clap::Parser;
use pasta::cli::commands;
use pasta::cli::{Cli, Commands};

fn main() {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PASTA_LOG")
                .unwrap_or_else(|_| "pasta=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen { ref kind } => commands::keygen::execute(&cli, kind),
        Commands::Encrypt {
            ref key,
            ref input,
            ref output,
        } => commands::encrypt::execute_encrypt(&cli, key, input.as_deref(), output.as_deref()),
        Commands::Decrypt {
            ref key,
            ref input,
            ref output,
        } => commands::encrypt::execute_decrypt(&cli, key, input.as_deref(), output.as_deref()),
        Commands::Hash { sha256, ref input } => commands::hash::execute(sha256, input.as_deref()),
        Commands::HashPassword { password_stdin } => {
            commands::hash::execute_hash_password(password_stdin)
        }
        Commands::VerifyPassword {
            ref hash,
            password_stdin,
        } => commands::hash::execute_verify_password(hash, password_stdin),
        Commands::Hmac { ref key, ref input } => {
            commands::hmac::execute(&cli, key, input.as_deref())
        }
        Commands::HmacVerify {
            ref key,
            ref tag,
            ref input,
        } => commands::hmac::execute_verify(&cli, key, tag, input.as_deref()),
        Commands::SigningKey {
            ref out_dir,
            ref name,
            force,
        } => commands::sign::execute_generate(out_dir, name, force),
        Commands::Sign {
            ref key,
            ref format,
            ref input,
        } => commands::sign::execute_sign(&cli, key, format, input.as_deref()),
        Commands::Verify {
            ref public_key,
            ref signature,
            ref format,
            ref input,
        } => commands::sign::execute_verify(&cli, public_key, signature, format, input.as_deref()),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pasta::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
