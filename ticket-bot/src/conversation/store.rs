//! Bounded per-chat conversation storage.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;

use super::machine::{ConversationState, Input, Transition};

/// One chat's state, locked while an input is applied.
type Entry = Arc<Mutex<ConversationState>>;

/// Configuration for the conversation store.
#[derive(Debug, Clone)]
pub struct ConversationStoreConfig {
    /// Chats untouched for this long are forgotten.
    pub idle_ttl: Duration,

    /// Maximum number of chats remembered at once.
    pub max_capacity: u64,
}

impl Default for ConversationStoreConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Conversation states keyed by chat id.
///
/// Entries are created on first use. An evicted chat simply starts over
/// from idle.
#[derive(Clone)]
pub struct ConversationStore {
    chats: MokaCache<i64, Entry>,
}

impl ConversationStore {
    /// Create a new store with the given configuration.
    pub fn new(config: &ConversationStoreConfig) -> Self {
        let chats = MokaCache::builder()
            .time_to_idle(config.idle_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { chats }
    }

    async fn entry(&self, chat_id: i64) -> Entry {
        self.chats
            .get_with(chat_id, async { Arc::new(Mutex::new(ConversationState::default())) })
            .await
    }

    /// Apply an input to a chat's state.
    ///
    /// Inputs for the same chat are serialised by the entry lock.
    pub async fn apply(&self, chat_id: i64, input: Input<'_>, today: NaiveDate) -> Transition {
        let entry = self.entry(chat_id).await;
        let mut state = entry.lock().await;
        state.apply(input, today)
    }

    /// Copy of a chat's state; idle if the chat is unknown.
    pub async fn snapshot(&self, chat_id: i64) -> ConversationState {
        match self.chats.get(&chat_id).await {
            Some(entry) => entry.lock().await.clone(),
            None => ConversationState::default(),
        }
    }

    /// Reset a chat to idle.
    pub async fn reset(&self, chat_id: i64) {
        if let Some(entry) = self.chats.get(&chat_id).await {
            entry.lock().await.reset();
        }
    }

    /// Approximate number of chats held (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.chats.entry_count()
    }

    /// Flush pending evictions so `entry_count` is exact.
    pub async fn run_pending_tasks(&self) {
        self.chats.run_pending_tasks().await;
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(&ConversationStoreConfig::default())
    }
}
