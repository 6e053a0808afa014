use reqwest::Method;
use serde::Serialize;

use super::error::ApiResult;
use super::models::{ObjectFields, ObjectFieldsPage, ObjectId, SearchQuery};
use super::VaultClient;

/// Listing option that returns every property of an object, including
/// ones normally hidden behind explicit projection.
pub const UNSAFE_OPTION: &str = "unsafe";

/// Query parameters of a `list objects` call. Unset fields are left off
/// the query string so the vault applies its defaults.
#[derive(Debug, Default)]
pub struct ListObjectsParams {
    page_size: Option<u32>,
    cursor: Option<String>,
    ids: Vec<String>,
    props: Vec<String>,
    options: Vec<String>,
}

impl ListObjectsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn cursor(mut self, cursor: &str) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn ids<I: IntoIterator<Item = S>, S: Into<String>>(mut self, ids: I) -> Self {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn props<I: IntoIterator<Item = S>, S: Into<String>>(mut self, props: I) -> Self {
        self.props = props.into_iter().map(Into::into).collect();
        self
    }

    /// Request all properties ("unsafe" listing option).
    pub fn all_props(mut self) -> Self {
        self.options.push(UNSAFE_OPTION.into());
        self
    }

    /// Render as repeated query pairs, e.g. `ids=a&ids=b&props=ssn`.
    fn to_query(&self, reason: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![("reason", reason.to_string())];
        if let Some(size) = self.page_size {
            query.push(("page_size", size.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        query.extend(self.ids.iter().map(|id| ("ids", id.clone())));
        query.extend(self.props.iter().map(|p| ("props", p.clone())));
        query.extend(self.options.iter().map(|o| ("options", o.clone())));
        query
    }
}

/// Object storage and retrieval on the data plane. Every call carries an
/// access reason, which the vault records in its audit log.
pub struct ObjectsClient<'a> {
    pub(crate) vault: &'a VaultClient,
}

impl ObjectsClient<'_> {
    /// Insert one object and return the id the vault assigned to it.
    pub fn add_object<T: Serialize>(
        &self,
        collection: &str,
        reason: &str,
        fields: &T,
    ) -> ApiResult<ObjectId> {
        self.vault.send_json(
            self.vault
                .request(Method::POST, &format!("/data/collections/{collection}/objects"))
                .query(&[("reason", reason)]),
            fields,
        )
    }

    pub fn list_objects(
        &self,
        collection: &str,
        reason: &str,
        params: &ListObjectsParams,
    ) -> ApiResult<ObjectFieldsPage> {
        self.vault.send(
            self.vault
                .request(Method::GET, &format!("/data/collections/{collection}/objects"))
                .query(&params.to_query(reason)),
        )
    }

    /// Search objects by property match, projecting the given props.
    pub fn search_objects(
        &self,
        collection: &str,
        reason: &str,
        query: &SearchQuery,
        props: &[&str],
    ) -> ApiResult<ObjectFieldsPage> {
        let mut pairs = vec![("reason", reason.to_string())];
        pairs.extend(props.iter().map(|p| ("props", p.to_string())));
        self.vault.send_json(
            self.vault
                .request(
                    Method::POST,
                    &format!("/data/collections/{collection}/query/objects"),
                )
                .query(&pairs),
            query,
        )
    }

    /// Fetch a single object by id. Fails with a 404 `ApiError` when the
    /// object does not exist.
    pub fn get_object_by_id(
        &self,
        collection: &str,
        reason: &str,
        id: &str,
        all_props: bool,
    ) -> ApiResult<ObjectFields> {
        let mut pairs = vec![("reason", reason)];
        if all_props {
            pairs.push(("options", UNSAFE_OPTION));
        }
        self.vault.send(
            self.vault
                .request(
                    Method::GET,
                    &format!("/data/collections/{collection}/objects/{id}"),
                )
                .query(&pairs),
        )
    }

    pub fn delete_object_by_id(&self, collection: &str, reason: &str, id: &str) -> ApiResult<()> {
        self.vault.send_no_content(
            self.vault
                .request(Method::DELETE, &format!("/data/collections/{collection}/objects"))
                .query(&[("reason", reason), ("id", id)]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_render_repeated_pairs() {
        let params = ListObjectsParams::new()
            .page_size(1)
            .ids(["a", "b"])
            .props(["ssn.mask"])
            .all_props();
        let query = params.to_query("AppFunctionality");
        assert_eq!(
            query,
            vec![
                ("reason", "AppFunctionality".to_string()),
                ("page_size", "1".to_string()),
                ("ids", "a".to_string()),
                ("ids", "b".to_string()),
                ("props", "ssn.mask".to_string()),
                ("options", "unsafe".to_string()),
            ]
        );
    }

    #[test]
    fn unset_fields_stay_off_the_query_string() {
        let query = ListObjectsParams::new().to_query("AppFunctionality");
        assert_eq!(query, vec![("reason", "AppFunctionality".to_string())]);
    }
}
