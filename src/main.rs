// Entrypoint for the walkthrough binary.
// - Keeps `main` small: build the client from the environment and run
//   the step sequence.
// - A connection failure gets a dedicated hint, since "the vault is not
//   running" is by far the most common way this demo fails.

use pvault_getting_started::{api::ApiError, api::VaultClient, config::VaultConfig, walkthrough};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = VaultConfig::from_env()?;
    let vault = VaultClient::new(&config)?;

    if let Err(err) = walkthrough::run(&vault) {
        if let Some(api_err) = err.downcast_ref::<ApiError>() {
            if api_err.is_connect() {
                eprintln!(
                    "Unable to connect to the vault at {}. Is it up?",
                    config.base_url
                );
                std::process::exit(1);
            }
        }
        return Err(err);
    }
    Ok(())
}

/// Request-level logging goes to stderr under RUST_LOG control; the
/// walkthrough narration itself stays on stdout.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pvault_getting_started=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
