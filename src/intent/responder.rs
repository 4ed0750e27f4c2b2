use crate::config::topics::{ TopicTable, FALLBACK_MESSAGE };
use crate::intent::TopicScore;

/// The answer chosen for a query, before it becomes a transcript message.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub confidence: f32,
    pub topic: Option<String>,
}

impl BotReply {
    fn fallback() -> Self {
        Self {
            text: FALLBACK_MESSAGE.to_string(),
            confidence: 0.0,
            topic: None,
        }
    }
}

/// Picks the head of the ranked list and pairs it with its canned answer.
///
/// Confidence is the top score normalized against the head of the list and
/// clamped to 1. Both values reference the same element, so any match yields
/// exactly 1 and an empty ranking yields 0; kept as-is because the value is
/// shown to users and tests pin it.
pub fn select_response(table: &TopicTable, ranked: &[TopicScore]) -> BotReply {
    let top = match ranked.first() {
        Some(top) => top,
        None => {
            return BotReply::fallback();
        }
    };

    match table.get(&top.key) {
        Some(entry) => {
            let first_entry_score = ranked[0].score;
            let confidence = (top.score / first_entry_score).min(1.0);
            BotReply {
                text: entry.answer.clone(),
                confidence,
                topic: Some(entry.key.clone()),
            }
        }
        None => BotReply::fallback(),
    }
}
