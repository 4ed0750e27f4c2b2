use std::fs;
use std::sync::Arc;

use limitless_faq::models::chat::Message;
use limitless_faq::store::{ ConversationStore, FileStorage, StoragePort };

fn temp_storage() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_str().unwrap()).unwrap();
    (dir, storage)
}

#[tokio::test]
async fn file_roundtrip_preserves_order_and_identity() {
    let (_dir, storage) = temp_storage();

    let written: Vec<Message> = (0..5)
        .map(|i| Message::user(format!("message {}", i)))
        .collect();
    storage.save(&written).await.unwrap();

    let restored = storage.load().await.unwrap().unwrap();
    assert_eq!(restored.len(), written.len());
    for (a, b) in written.iter().zip(&restored) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.text, b.text);
        assert_eq!(a.is_user, b.is_user);
        assert_eq!(a.timestamp, b.timestamp);
    }
}

#[tokio::test]
async fn metadata_survives_the_roundtrip() {
    use limitless_faq::models::chat::MessageMetadata;
    let (_dir, storage) = temp_storage();

    let reply = Message::bot("answer", Some(MessageMetadata {
        confidence: 1.0,
        topic: "pricing".to_string(),
    }));
    storage.save(std::slice::from_ref(&reply)).await.unwrap();

    let restored = storage.load().await.unwrap().unwrap();
    assert_eq!(restored[0].metadata, reply.metadata);
}

#[tokio::test]
async fn missing_file_loads_as_empty() {
    let (_dir, storage) = temp_storage();
    assert!(storage.load().await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_file_is_discarded_not_surfaced() {
    let (_dir, storage) = temp_storage();
    fs::write(storage.path(), "{not json").unwrap();
    assert!(storage.load().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_removes_the_file_and_is_idempotent() {
    let (_dir, storage) = temp_storage();
    storage.save(&[Message::user("bye")]).await.unwrap();
    storage.clear().await.unwrap();
    assert!(storage.load().await.unwrap().is_none());
    storage.clear().await.unwrap();
}

#[tokio::test]
async fn conversation_store_restores_across_opens() {
    let (_dir, storage) = temp_storage();
    let storage = Arc::new(storage);
    {
        let store = ConversationStore::open(storage.clone(), "welcome").await;
        store.append(Message::user("first visit")).await;
    }
    let reopened = ConversationStore::open(storage.clone(), "welcome").await;
    let messages = reopened.conversation().await.messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "welcome");
    assert_eq!(messages[1].text, "first visit");
}
