use std::sync::Arc;
use tokio::sync::mpsc;
use watchly_common::AssetKey;

use super::AssetCache;

/// Completion of one tile request
#[derive(Debug, Clone, PartialEq)]
pub struct TileResult {
    pub key: AssetKey,
    /// View generation the request was issued for
    pub generation: u64,
    /// `None` means "show the placeholder"
    pub bytes: Option<Vec<u8>>,
}

/// Fans tile requests out to independent tasks and funnels their
/// completions into a single receiver.
///
/// Requests are never cancelled. A consumer that moved on to a newer view
/// drops results carrying an older generation.
#[derive(Clone)]
pub struct TileLoader {
    cache: Arc<AssetCache>,
    tx: mpsc::UnboundedSender<TileResult>,
}

impl TileLoader {
    pub fn new(cache: Arc<AssetCache>) -> (Self, mpsc::UnboundedReceiver<TileResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { cache, tx }, rx)
    }

    /// Spawn a resolve for `key`. Must be called within a tokio runtime.
    pub fn request(&self, key: AssetKey, generation: u64) {
        let cache = Arc::clone(&self.cache);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let bytes = cache.resolve(&key).await;
            // Receiver gone means nobody is looking any more
            let _ = tx.send(TileResult {
                key,
                generation,
                bytes,
            });
        });
    }

    /// Request every key for the same generation
    pub fn request_all(&self, keys: impl IntoIterator<Item = AssetKey>, generation: u64) -> usize {
        let mut count = 0;
        for key in keys {
            self.request(key, generation);
            count += 1;
        }
        count
    }
}
