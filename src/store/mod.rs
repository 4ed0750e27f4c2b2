mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use log::{ info, warn };
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cli::Args;
use crate::error::{ BotError, Result };
use crate::models::chat::{ Conversation, Message };

/// Key the transcript is persisted under, mirroring the site widget.
pub const STORAGE_KEY: &str = "limitless:faqchat:conversation:v1";

/// Injected persistence seam so tests can swap the backing store.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn load(&self) -> Result<Option<Vec<Message>>>;
    async fn save(&self, messages: &[Message]) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

pub fn create_storage(args: &Args) -> Result<Arc<dyn StoragePort>> {
    match args.storage_type.to_lowercase().as_str() {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "file" => Ok(Arc::new(FileStorage::new(&args.storage_dir)?)),
        other => Err(BotError::UnsupportedStorage(other.to_string())),
    }
}

pub fn initialize_storage(args: &Args) -> Result<Arc<dyn StoragePort>> {
    info!("Conversation will be stored in: {} ({})", args.storage_type, args.storage_dir);
    create_storage(args)
}

/// The in-memory transcript plus its persisted mirror.
///
/// Every mutation rewrites the full sequence through the port. Port failures
/// are logged and swallowed: the conversation just behaves as if it were not
/// persisted for that operation.
pub struct ConversationStore {
    storage: Arc<dyn StoragePort>,
    greeting: String,
    messages: Mutex<Vec<Message>>,
}

impl ConversationStore {
    /// Restores the persisted transcript if present and well-formed,
    /// otherwise starts from a single greeting message.
    pub async fn open(storage: Arc<dyn StoragePort>, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let restored = match storage.load().await {
            Ok(Some(messages)) if !messages.is_empty() => {
                info!("Restored {} persisted messages", messages.len());
                Some(messages)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Conversation restore failed, starting empty: {}", e);
                None
            }
        };

        let store = Self {
            storage,
            greeting,
            messages: Mutex::new(restored.unwrap_or_default()),
        };
        {
            let mut messages = store.messages.lock().await;
            if messages.is_empty() {
                messages.push(Message::bot(store.greeting.clone(), None));
                store.persist(&messages).await;
            }
        }
        store
    }

    async fn persist(&self, messages: &[Message]) {
        if let Err(e) = self.storage.save(messages).await {
            warn!("Conversation persist failed: {}", e);
        }
    }

    pub async fn append(&self, message: Message) {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        self.persist(&messages).await;
    }

    pub async fn conversation(&self) -> Conversation {
        Conversation {
            messages: self.messages.lock().await.clone(),
        }
    }

    /// Clears both copies and reseeds the greeting.
    pub async fn reset(&self) {
        let mut messages = self.messages.lock().await;
        if let Err(e) = self.storage.clear().await {
            warn!("Conversation clear failed: {}", e);
        }
        messages.clear();
        messages.push(Message::bot(self.greeting.clone(), None));
        self.persist(&messages).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_seeds_greeting_when_storage_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConversationStore::open(storage.clone(), "hello").await;
        let conversation = store.conversation().await;
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].text, "hello");
        assert!(!conversation.messages[0].is_user);

        // the greeting is mirrored into the port right away
        let persisted = storage.load().await.unwrap().unwrap();
        assert_eq!(persisted.len(), 1);
    }

    #[tokio::test]
    async fn append_mirrors_every_message() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConversationStore::open(storage.clone(), "hello").await;
        store.append(Message::user("one")).await;
        store.append(Message::user("two")).await;

        let persisted = storage.load().await.unwrap().unwrap();
        let in_memory = store.conversation().await.messages;
        assert_eq!(persisted.len(), 3);
        let persisted_ids: Vec<_> = persisted.iter().map(|m| m.id.clone()).collect();
        let memory_ids: Vec<_> = in_memory.iter().map(|m| m.id.clone()).collect();
        assert_eq!(persisted_ids, memory_ids);
    }

    #[tokio::test]
    async fn reset_leaves_exactly_the_greeting() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConversationStore::open(storage.clone(), "hello").await;
        store.append(Message::user("one")).await;
        store.reset().await;

        let conversation = store.conversation().await;
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].text, "hello");

        let persisted = storage.load().await.unwrap().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].text, "hello");
    }

    #[tokio::test]
    async fn reopen_restores_the_same_sequence() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let store = ConversationStore::open(storage.clone(), "hello").await;
            store.append(Message::user("persist me")).await;
        }
        let reopened = ConversationStore::open(storage.clone(), "hello").await;
        let conversation = reopened.conversation().await;
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].text, "persist me");
    }
}
