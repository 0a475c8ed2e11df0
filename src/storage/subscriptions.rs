use dashmap::DashMap;
use poise::serenity_prelude::ChannelId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{StoreError, read_json, write_json_atomic};

/// A conversation that receives the daily reminder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub channel_id: u64,
    /// Human-readable name captured when the conversation subscribed
    pub label: String,
}

/// Subscribed conversations, kept in memory and written through to a JSON file
#[derive(Clone)]
pub struct SubscriptionStore {
    path: PathBuf,
    /// Maps subscribed channel IDs to their display label
    channels: Arc<DashMap<ChannelId, String>>,
    write_lock: Arc<Mutex<()>>,
}

impl SubscriptionStore {
    /// Open the store, starting empty when the file cannot be read
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: path.into(),
            channels: Arc::new(DashMap::new()),
            write_lock: Arc::new(Mutex::new(())),
        };

        match read_json::<Vec<Subscription>>(&store.path).await {
            Ok(entries) => {
                for entry in entries.unwrap_or_default() {
                    if entry.channel_id == 0 {
                        warn!("Ignoring subscription with channel id 0");
                        continue;
                    }
                    store
                        .channels
                        .insert(ChannelId::new(entry.channel_id), entry.label);
                }
                info!(
                    "Loaded {} subscribed conversation(s) from {}",
                    store.channels.len(),
                    store.path.display()
                );
            }
            Err(e) => {
                warn!("Failed to load subscriptions, starting with none: {}", e);
            }
        }

        store
    }

    /// Subscribe a conversation. Returns false if it was already subscribed.
    ///
    /// Memory is only updated once the file holds the change.
    pub async fn subscribe(&self, channel_id: ChannelId, label: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let is_new = !self.channels.contains_key(&channel_id);
        let mut entries = self.snapshot_without(channel_id);
        entries.push(Subscription {
            channel_id: channel_id.get(),
            label: label.to_string(),
        });
        self.persist(entries).await?;

        self.channels.insert(channel_id, label.to_string());
        Ok(is_new)
    }

    /// Remove a conversation. Returns false if it was not subscribed.
    pub async fn unsubscribe(&self, channel_id: ChannelId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        if !self.channels.contains_key(&channel_id) {
            return Ok(false);
        }
        self.persist(self.snapshot_without(channel_id)).await?;

        self.channels.remove(&channel_id);
        Ok(true)
    }

    pub fn contains(&self, channel_id: ChannelId) -> bool {
        self.channels.contains_key(&channel_id)
    }

    /// Snapshot of subscribed conversations, ordered by id
    pub fn conversations(&self) -> Vec<ChannelId> {
        let mut ids: Vec<ChannelId> = self.channels.iter().map(|e| *e.key()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn snapshot_without(&self, channel_id: ChannelId) -> Vec<Subscription> {
        self.channels
            .iter()
            .filter(|e| *e.key() != channel_id)
            .map(|e| Subscription {
                channel_id: e.key().get(),
                label: e.value().clone(),
            })
            .collect()
    }

    /// Caller must hold `write_lock`
    async fn persist(&self, mut entries: Vec<Subscription>) -> Result<(), StoreError> {
        entries.sort_by_key(|s| s.channel_id);
        write_json_atomic(&self.path, &entries).await
    }
}
