//! Tests for the Firestore client.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{decode_value, FirestoreClient};
use crate::remote::DocumentStore;
use watchly_common::GalleryError;

const COLLECTION_PATH: &str = "/v1/projects/demo/databases/(default)/documents/WatchCollections";

fn firestore_doc(id: &str, is_premium: bool, items: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/demo/databases/(default)/documents/WatchCollections/{id}"),
        "fields": {
            "isPremium": { "booleanValue": is_premium },
            "itemsCount": { "integerValue": items }
        },
        "createTime": "2024-01-01T00:00:00.000000Z",
        "updateTime": "2024-01-01T00:00:00.000000Z"
    })
}

// ── decode_value ─────────────────────────────────────────────────────

#[test]
fn decode_scalar_values() {
    assert_eq!(decode_value(&json!({ "booleanValue": true })), json!(true));
    assert_eq!(decode_value(&json!({ "integerValue": "42" })), json!(42));
    assert_eq!(decode_value(&json!({ "integerValue": 7 })), json!(7));
    assert_eq!(decode_value(&json!({ "doubleValue": 1.5 })), json!(1.5));
    assert_eq!(decode_value(&json!({ "stringValue": "hi" })), json!("hi"));
    assert_eq!(
        decode_value(&json!({ "nullValue": "NULL_VALUE" })),
        serde_json::Value::Null
    );
}

#[test]
fn decode_bad_integer_is_null() {
    assert_eq!(
        decode_value(&json!({ "integerValue": "twelve" })),
        serde_json::Value::Null
    );
}

#[test]
fn decode_nested_values() {
    let value = json!({
        "mapValue": { "fields": {
            "tags": { "arrayValue": { "values": [
                { "stringValue": "dark" },
                { "integerValue": "3" }
            ]}}
        }}
    });
    assert_eq!(decode_value(&value), json!({ "tags": ["dark", 3] }));
    assert_eq!(decode_value(&json!({ "arrayValue": {} })), json!([]));
}

#[test]
fn decode_unknown_kind_is_null() {
    assert_eq!(
        decode_value(&json!({ "geoPointValue": { "latitude": 1.0 } })),
        serde_json::Value::Null
    );
    assert_eq!(decode_value(&json!("plain")), serde_json::Value::Null);
}

// ── list_documents ───────────────────────────────────────────────────

#[tokio::test]
async fn list_documents_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .and(header("User-Agent", "Watchly/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                firestore_doc("Abstract", false, "12"),
                firestore_doc("Cars", true, "5")
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FirestoreClient::new(&mock_server.uri(), "demo");
    let docs = client.list_documents("WatchCollections").await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "Abstract");
    assert_eq!(docs[0].fields.get("isPremium"), Some(&json!(false)));
    assert_eq!(docs[0].fields.get("itemsCount"), Some(&json!(12)));
    assert_eq!(docs[1].id, "Cars");
    assert_eq!(docs[1].fields.get("isPremium"), Some(&json!(true)));
}

#[tokio::test]
async fn list_documents_decodes_encoded_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [firestore_doc("Deep%20Space", false, "3")]
        })))
        .mount(&mock_server)
        .await;

    let client = FirestoreClient::new(&mock_server.uri(), "demo");
    let docs = client.list_documents("WatchCollections").await.unwrap();

    assert_eq!(docs[0].id, "Deep Space");
}

#[tokio::test]
async fn list_documents_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = FirestoreClient::new(&mock_server.uri(), "demo");
    let docs = client.list_documents("WatchCollections").await.unwrap();

    assert!(docs.is_empty());
}

#[tokio::test]
async fn list_documents_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = FirestoreClient::new(&mock_server.uri(), "demo");
    let result = client.list_documents("WatchCollections").await;

    match result {
        Err(GalleryError::HttpStatus(status)) => assert_eq!(status.as_u16(), 403),
        other => panic!("Expected GalleryError::HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn list_documents_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = FirestoreClient::new(&mock_server.uri(), "demo");
    let result = client.list_documents("WatchCollections").await;

    assert!(matches!(result, Err(GalleryError::Parse(_))));
}

#[tokio::test]
async fn base_url_trailing_slash_is_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/", mock_server.uri());
    let client = FirestoreClient::new(&base, "demo");
    assert!(client.list_documents("WatchCollections").await.is_ok());
}
