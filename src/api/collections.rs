use reqwest::Method;

use super::error::ApiResult;
use super::models::Collection;
use super::VaultClient;

/// Collection schemas are managed on the control plane. The vault also
/// speaks a PVSchema text format; this client uses JSON exclusively.
const FORMAT_JSON: (&str, &str) = ("format", "json");

pub struct CollectionsClient<'a> {
    pub(crate) vault: &'a VaultClient,
}

impl CollectionsClient<'_> {
    pub fn list_collections(&self) -> ApiResult<Vec<Collection>> {
        self.vault.send(
            self.vault
                .request(Method::GET, "/ctl/collections")
                .query(&[FORMAT_JSON]),
        )
    }

    /// Create a collection and return it as stored by the vault
    /// (creation time filled in).
    pub fn add_collection(&self, collection: &Collection) -> ApiResult<Collection> {
        self.vault.send_json(
            self.vault
                .request(Method::POST, "/ctl/collections")
                .query(&[FORMAT_JSON]),
            collection,
        )
    }

    pub fn get_collection(&self, name: &str) -> ApiResult<Collection> {
        self.vault.send(
            self.vault
                .request(Method::GET, &format!("/ctl/collections/{name}"))
                .query(&[FORMAT_JSON]),
        )
    }

    pub fn delete_collection(&self, name: &str) -> ApiResult<()> {
        self.vault.send_no_content(
            self.vault
                .request(Method::DELETE, &format!("/ctl/collections/{name}")),
        )
    }
}
