use reqwest::Method;

use super::error::ApiResult;
use super::models::{DetokenizedToken, QueryToken, TokenMetadata, TokenValue, TokenizeRequest};
use super::VaultClient;

/// Tokenization endpoints: mint tokens over object properties, resolve
/// them back, search and delete them.
pub struct TokensClient<'a> {
    pub(crate) vault: &'a VaultClient,
}

impl TokensClient<'_> {
    /// Mint one token per request entry; results come back in order.
    pub fn tokenize(
        &self,
        collection: &str,
        reason: &str,
        requests: &[TokenizeRequest],
    ) -> ApiResult<Vec<TokenValue>> {
        self.vault.send_json(
            self.vault
                .request(Method::POST, &format!("/data/collections/{collection}/tokens"))
                .query(&[("reason", reason)]),
            requests,
        )
    }

    /// Resolve tokens back to the fields they reference.
    pub fn detokenize(
        &self,
        collection: &str,
        reason: &str,
        token_ids: &[String],
    ) -> ApiResult<Vec<DetokenizedToken>> {
        let mut pairs = vec![("reason", reason.to_string())];
        pairs.extend(token_ids.iter().map(|id| ("token_ids", id.clone())));
        self.vault.send(
            self.vault
                .request(Method::GET, &format!("/data/collections/{collection}/tokens"))
                .query(&pairs),
        )
    }

    pub fn search_tokens(
        &self,
        collection: &str,
        reason: &str,
        query: &QueryToken,
    ) -> ApiResult<Vec<TokenMetadata>> {
        self.vault.send_json(
            self.vault
                .request(
                    Method::POST,
                    &format!("/data/collections/{collection}/query/tokens"),
                )
                .query(&[("reason", reason)]),
            query,
        )
    }

    pub fn delete_tokens(
        &self,
        collection: &str,
        reason: &str,
        token_ids: &[String],
    ) -> ApiResult<()> {
        let mut pairs = vec![("reason", reason.to_string())];
        pairs.extend(token_ids.iter().map(|id| ("token_ids", id.clone())));
        self.vault.send_no_content(
            self.vault
                .request(Method::DELETE, &format!("/data/collections/{collection}/tokens"))
                .query(&pairs),
        )
    }
}
