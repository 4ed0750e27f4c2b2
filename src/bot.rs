use log::info;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::cli::Args;
use crate::config::topics::{ self, TopicTable, DEFAULT_TOPICS, GREETING };
use crate::contact::{ ContactMailer, ContactRequest };
use crate::error::{ BotError, Result };
use crate::intent::{ self, responder };
use crate::models::chat::{ Conversation, Message, MessageMetadata };
use crate::store::{ initialize_storage, ConversationStore, StoragePort };
use crate::timing::{ self, CancelToken, ComposePhase, ComposeSchedule };

/// The FAQ engine: scores a query against the topic table, picks the canned
/// answer, simulates the compose delay and appends both sides of the exchange
/// to the persisted transcript.
pub struct FaqBot {
    topics: TopicTable,
    store: ConversationStore,
    mailer: Option<ContactMailer>,
    simulate_typing: bool,
    phases: Option<mpsc::Sender<ComposePhase>>,
}

impl FaqBot {
    pub async fn new(args: &Args) -> Result<Self> {
        let table = match &args.topics_path {
            Some(path) => topics::load_topics(path)?,
            None => DEFAULT_TOPICS.clone(),
        };
        info!("Topic table ready with {} topics", table.topics.len());

        let storage = initialize_storage(args)?;
        let mailer = ContactMailer::from_args(args);
        if mailer.is_none() {
            info!("Contact mailer not configured, /contact is disabled");
        }

        Ok(Self::with_storage(table, storage, !args.no_typing, mailer).await)
    }

    pub async fn with_storage(
        topics: TopicTable,
        storage: Arc<dyn StoragePort>,
        simulate_typing: bool,
        mailer: Option<ContactMailer>
    ) -> Self {
        let store = ConversationStore::open(storage, GREETING).await;
        Self {
            topics,
            store,
            mailer,
            simulate_typing,
            phases: None,
        }
    }

    /// Registers an observer for the typing/thinking indicator.
    pub fn subscribe_phases(&mut self) -> mpsc::Receiver<ComposePhase> {
        let (tx, rx) = mpsc::channel(16);
        self.phases = Some(tx);
        rx
    }

    /// Appends the user message, selects a reply and, after the simulated
    /// compose delay, appends the bot message. Concurrent calls are not
    /// serialized; overlapping sends may land their replies out of order.
    pub async fn send(&self, text: &str) -> Message {
        self.store.append(Message::user(text)).await;

        let ranked = intent::score_query(&self.topics, text);
        let reply = responder::select_response(&self.topics, &ranked);

        if self.simulate_typing {
            let schedule = ComposeSchedule::for_response(&reply.text);
            timing::run_schedule(schedule, CancelToken::never(), self.phases.as_ref()).await;
        }

        let metadata = reply.topic.map(|topic| MessageMetadata {
            confidence: reply.confidence,
            topic,
        });
        let message = Message::bot(reply.text, metadata);
        self.store.append(message.clone()).await;
        message
    }

    pub async fn conversation(&self) -> Conversation {
        self.store.conversation().await
    }

    pub async fn reset(&self) {
        self.store.reset().await;
    }

    /// Hands a contact message off to the configured email provider and
    /// reports the outcome, so the caller can show success or failure.
    pub async fn contact(&self, request: &ContactRequest) -> Result<()> {
        match &self.mailer {
            Some(mailer) => mailer.send(request).await,
            None => Err(BotError::ContactNotConfigured),
        }
    }
}
