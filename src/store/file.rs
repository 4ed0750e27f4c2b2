use async_trait::async_trait;
use log::warn;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::chat::Message;
use crate::store::{ StoragePort, STORAGE_KEY };

/// JSON-file port. The file name is the storage key with characters that are
/// unsafe in file names replaced.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: &str) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let file_name = format!("{}.json", STORAGE_KEY.replace(':', "_"));
        Ok(Self {
            path: PathBuf::from(dir).join(file_name),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl StoragePort for FileStorage {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(e) => {
                return Err(e.into());
            }
        };
        match serde_json::from_str::<Vec<Message>>(&content) {
            Ok(messages) => Ok(Some(messages)),
            Err(e) => {
                // a malformed transcript is discarded rather than surfaced
                warn!("Ignoring malformed transcript at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, messages: &[Message]) -> Result<()> {
        let json = serde_json::to_string(messages)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
