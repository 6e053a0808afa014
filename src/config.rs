// Configuration for the vault connection. Everything comes from
// environment variables so the walkthrough can run unchanged against a
// local docker instance or a remote one.

use anyhow::{Context, Result};

pub const DEFAULT_PVAULT_HOST: &str = "localhost";
pub const DEFAULT_PVAULT_PORT: u16 = 8123;
/// Default API key of a freshly started local Vault instance.
pub const DEFAULT_API_KEY: &str = "pvaultauth";

/// Connection settings for the vault: base URL and the bearer token used
/// on every request.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub base_url: String,
    pub api_key: String,
}

impl VaultConfig {
    /// Build a config from the environment:
    /// - `PVAULT_ADDR` sets the full base URL (e.g. `https://vault.internal:8123`),
    /// - otherwise `PVAULT_HOST` / `PVAULT_PORT` are combined, defaulting to
    ///   `http://localhost:8123`,
    /// - `PVAULT_API_KEY` overrides the default local-instance key.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var("PVAULT_ADDR").ok(),
            std::env::var("PVAULT_HOST").ok(),
            std::env::var("PVAULT_PORT").ok(),
            std::env::var("PVAULT_API_KEY").ok(),
        )
    }

    fn resolve(
        addr: Option<String>,
        host: Option<String>,
        port: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let base_url = match addr {
            Some(addr) => addr.trim_end_matches('/').to_string(),
            None => {
                let host = host.unwrap_or_else(|| DEFAULT_PVAULT_HOST.into());
                let port = match port {
                    Some(p) => p
                        .parse::<u16>()
                        .with_context(|| format!("PVAULT_PORT is not a valid port: {p:?}"))?,
                    None => DEFAULT_PVAULT_PORT,
                };
                format!("http://{host}:{port}")
            }
        };
        Ok(VaultConfig {
            base_url,
            api_key: api_key.unwrap_or_else(|| DEFAULT_API_KEY.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = VaultConfig::resolve(None, None, None, None).unwrap();
        assert_eq!(config.base_url, "http://localhost:8123");
        assert_eq!(config.api_key, "pvaultauth");
    }

    #[test]
    fn addr_wins_over_host_and_port() {
        let config = VaultConfig::resolve(
            Some("https://vault.internal:9999/".into()),
            Some("ignored".into()),
            Some("1234".into()),
            Some("secret".into()),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://vault.internal:9999");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn host_and_port_are_combined() {
        let config =
            VaultConfig::resolve(None, Some("vault.local".into()), Some("8200".into()), None)
                .unwrap();
        assert_eq!(config.base_url, "http://vault.local:8200");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = VaultConfig::resolve(None, None, Some("eight".into()), None).unwrap_err();
        assert!(err.to_string().contains("PVAULT_PORT"));
    }
}
