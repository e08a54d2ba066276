//! Firestore REST client for the category collection
//!
//! Documents come back as typed values (`{"integerValue": "12"}`); they are
//! decoded into plain JSON so the model layer never sees the wire encoding.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use watchly_common::{GalleryError, GalleryResult, RawDocument};

use super::DocumentStore;

const USER_AGENT: &str = "Watchly/1.0";

/// Response of `GET .../documents/{collection}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    /// Absent for an empty collection
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

impl FirestoreDocument {
    /// Document id is the last segment of the resource name
    fn id(&self) -> String {
        let segment = self.name.rsplit('/').next().unwrap_or_default();
        urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string())
    }

    fn into_raw(self) -> RawDocument {
        let id = self.id();
        let fields: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), decode_value(value)))
            .collect();
        RawDocument { id, fields }
    }
}

/// Decode a Firestore typed value into plain JSON.
/// Unknown value kinds decode to `Null`.
pub(crate) fn decode_value(value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => inner.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        // int64 values are transmitted as strings
        "integerValue" => match inner {
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            Value::Number(n) => n.as_i64().map(Value::from).unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "doubleValue" => inner.as_f64().map(Value::from).unwrap_or(Value::Null),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.as_str().map(Value::from).unwrap_or(Value::Null)
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(|f| f.as_object())
                .map(|f| {
                    f.iter()
                        .map(|(k, v)| (k.clone(), decode_value(v)))
                        .collect::<Map<String, Value>>()
                })
                .unwrap_or_default();
            Value::Object(fields)
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(|v| v.as_array())
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default();
            Value::Array(values)
        }
        _ => Value::Null,
    }
}

/// Client for the Firestore REST API
pub struct FirestoreClient {
    client: Client,
    base_url: String,
    project_id: String,
}

impl FirestoreClient {
    pub fn new(base_url: &str, project_id: &str) -> Self {
        log::debug!("Creating Firestore client for project {}", project_id);
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.base_url,
            self.project_id,
            urlencoding::encode(collection)
        )
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn list_documents(&self, collection: &str) -> GalleryResult<Vec<RawDocument>> {
        let url = self.collection_url(collection);
        log::info!("Fetching collection {} from {}", collection, url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GalleryError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let list: ListDocumentsResponse = serde_json::from_str(&body)?;

        if list.next_page_token.is_some() {
            log::warn!(
                "Collection {} has more documents than one page; only the first page is used",
                collection
            );
        }

        log::debug!("Received {} documents", list.documents.len());
        Ok(list.documents.into_iter().map(|d| d.into_raw()).collect())
    }
}

#[cfg(test)]
#[path = "firestore_tests.rs"]
mod tests;
