//! End-to-end tests for the asset cache against a mocked storage server.

use std::sync::Arc;
use tempfile::TempDir;
use watchly::{AssetCache, AssetKey, StorageClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAX_SIZE: usize = 1024 * 1024;

fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend((0..len.saturating_sub(4)).map(|i| (i % 256) as u8));
    bytes
}

fn create_cache(server: &MockServer) -> (AssetCache, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let remote = StorageClient::new(&server.uri(), "demo-bucket");
    let cache = AssetCache::new(temp_dir.path(), Arc::new(remote), MAX_SIZE);
    (cache, temp_dir)
}

#[tokio::test]
async fn test_second_resolve_served_from_disk() {
    let server = MockServer::start().await;
    let image = jpeg_bytes(2048);

    Mock::given(method("GET"))
        .and(path("/v0/b/demo-bucket/o/Abstract%2F1.jpg"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (cache, temp_dir) = create_cache(&server);
    let key = AssetKey::new("Abstract/1.jpg");

    let first = cache.resolve(&key).await.unwrap();
    let second = cache.resolve(&key).await.unwrap();

    assert_eq!(first, image);
    assert_eq!(first, second);
    assert_eq!(
        std::fs::read(temp_dir.path().join("Abstract_1.jpg")).unwrap(),
        image
    );
    // MockServer verifies the single fetch on drop
}

#[tokio::test]
async fn test_oversized_payload_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/b/demo-bucket/o/Huge%2F1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(jpeg_bytes(MAX_SIZE + 1)))
        .mount(&server)
        .await;

    let (cache, temp_dir) = create_cache(&server);
    let key = AssetKey::new("Huge/1.jpg");

    assert!(cache.resolve(&key).await.is_none());
    assert!(!temp_dir.path().join("Huge_1.jpg").exists());
}

#[tokio::test]
async fn test_missing_asset_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/b/demo-bucket/o/Nature%2F99.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let (cache, _temp_dir) = create_cache(&server);
    let key = AssetKey::new("Nature/99.jpg");

    // Failures are not remembered, each call asks once
    assert!(cache.resolve(&key).await.is_none());
    assert!(cache.resolve(&key).await.is_none());
}

#[tokio::test]
async fn test_bundled_asset_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(jpeg_bytes(16)))
        .expect(0)
        .mount(&server)
        .await;

    let (cache, _temp_dir) = create_cache(&server);
    assert!(cache.resolve(&AssetKey::new("header-image")).await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_return_same_bytes() {
    let server = MockServer::start().await;
    let image = jpeg_bytes(64 * 1024);

    Mock::given(method("GET"))
        .and(path("/v0/b/demo-bucket/o/Space%2F2.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
        .mount(&server)
        .await;

    let (cache, temp_dir) = create_cache(&server);
    let cache = Arc::new(cache);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.resolve(&AssetKey::new("Space/2.jpg")).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), image);
    }
    assert_eq!(
        std::fs::read(temp_dir.path().join("Space_2.jpg")).unwrap(),
        image
    );
}
