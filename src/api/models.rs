// Wire types for the vault API. Fields mirror the service's JSON contract;
// optional flags are omitted from request bodies when unset so the vault
// applies its own defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary object fields, keyed by property name. The vault defines the
/// value types through the collection schema, so JSON values are kept as-is.
pub type ObjectFields = Map<String, Value>;

/// Health report of a vault control/data plane.
#[derive(Deserialize, Debug)]
pub struct Health {
    pub status: String,
}

/// Status value reported by a healthy vault.
pub const HEALTH_PASS: &str = "pass";

/// A single typed property of a collection schema.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Property {
    pub name: String,
    pub data_type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_nullable: bool,
}

impl Property {
    pub fn new(name: &str, data_type_name: &str) -> Self {
        Property {
            name: name.into(),
            data_type_name: data_type_name.into(),
            description: None,
            is_unique: false,
            is_nullable: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollectionType {
    Persons,
    Data,
}

/// A named schema grouping typed properties for records stored in the vault.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Collection {
    pub name: String,
    #[serde(rename = "type")]
    pub collection_type: CollectionType,
    pub properties: Vec<Property>,
    /// Set by the vault; never sent on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
}

impl Collection {
    pub fn new(name: &str, collection_type: CollectionType, properties: Vec<Property>) -> Self {
        Collection {
            name: name.into(),
            collection_type,
            properties,
            creation_time: None,
        }
    }
}

/// Identifier assigned by the vault to a stored object.
#[derive(Deserialize, Debug, Clone)]
pub struct ObjectId {
    pub id: String,
}

/// Pagination details of an object listing.
#[derive(Deserialize, Debug, Default)]
pub struct Paging {
    #[serde(default)]
    pub cursor: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub remaining_count: u64,
}

/// One page of object fields, as returned by list and search calls.
#[derive(Deserialize, Debug)]
pub struct ObjectFieldsPage {
    pub results: Vec<ObjectFields>,
    #[serde(default)]
    pub paging: Paging,
}

/// Search filter for objects: exact match on the given property values.
#[derive(Serialize, Debug)]
pub struct SearchQuery {
    #[serde(rename = "match")]
    pub match_fields: ObjectFields,
}

/// Tokenization strategy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Token always resolves to the current value of the object's property.
    Pointer,
    Deterministic,
    Randomized,
}

/// Object reference inside a tokenize request.
#[derive(Serialize, Debug)]
pub struct InputObject {
    pub id: String,
}

#[derive(Serialize, Debug)]
pub struct TokenizeRequest {
    pub object: InputObject,
    pub props: Vec<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Token handle returned by a tokenize call.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenValue {
    pub token_id: String,
}

/// Token details returned by a token search.
#[derive(Deserialize, Debug)]
pub struct TokenMetadata {
    pub token_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A token resolved back to the fields it stands in for.
#[derive(Deserialize, Debug)]
pub struct DetokenizedToken {
    pub token_id: String,
    pub fields: ObjectFields,
}

/// Search filter for tokens by the objects they reference.
#[derive(Serialize, Debug, Default)]
pub struct QueryToken {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub object_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_serializes_to_the_wire_shape() {
        let collection = Collection::new(
            "customers",
            CollectionType::Persons,
            vec![
                Property::new("ssn", "SSN")
                    .unique()
                    .description("Social security number"),
                Property::new("email", "EMAIL"),
                Property::new("phone_number", "PHONE_NUMBER").nullable(),
            ],
        );
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "customers",
                "type": "PERSONS",
                "properties": [
                    {
                        "name": "ssn",
                        "data_type_name": "SSN",
                        "description": "Social security number",
                        "is_unique": true
                    },
                    { "name": "email", "data_type_name": "EMAIL" },
                    {
                        "name": "phone_number",
                        "data_type_name": "PHONE_NUMBER",
                        "is_nullable": true
                    }
                ]
            })
        );
    }

    #[test]
    fn token_type_uses_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&TokenType::Pointer).unwrap(),
            "\"pointer\""
        );
    }

    #[test]
    fn tokenize_request_omits_empty_tags() {
        let request = TokenizeRequest {
            object: InputObject { id: "abc".into() },
            props: vec!["email".into()],
            token_type: TokenType::Pointer,
            tags: vec![],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "object": { "id": "abc" },
                "props": ["email"],
                "type": "pointer"
            })
        );
    }

    #[test]
    fn paging_fields_default_when_absent() {
        let page: ObjectFieldsPage =
            serde_json::from_value(json!({ "results": [{ "id": "x" }] })).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.paging.cursor, "");
        assert_eq!(page.paging.remaining_count, 0);
    }
}
