use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::chat::Message;
use crate::store::StoragePort;

/// Process-local port for tests and ephemeral runs.
pub struct MemoryStorage {
    slot: Mutex<Option<Vec<Message>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        *self.slot.lock().await = Some(messages.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
