use reqwest::Method;

use super::error::ApiResult;
use super::models::Health;
use super::VaultClient;

/// Health endpoints of the vault's control and data planes.
pub struct SystemClient<'a> {
    pub(crate) vault: &'a VaultClient,
}

impl SystemClient<'_> {
    pub fn control_health(&self) -> ApiResult<Health> {
        self.vault
            .send(self.vault.request(Method::GET, "/ctl/info/health"))
    }

    pub fn data_health(&self) -> ApiResult<Health> {
        self.vault
            .send(self.vault.request(Method::GET, "/data/info/health"))
    }
}
