use log::info;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;

use crate::error::{ BotError, Result };

/// One canned-answer category plus the synonym substrings used to score it.
#[derive(Deserialize, Debug, Clone)]
pub struct TopicEntry {
    pub key: String,
    pub answer: String,
    pub keywords: Vec<String>,
}

/// Ordered topic list. The order is part of the contract: ranking ties are
/// resolved by position in this table.
#[derive(Deserialize, Debug, Clone)]
pub struct TopicTable {
    pub topics: Vec<TopicEntry>,
}

impl TopicTable {
    pub fn get(&self, key: &str) -> Option<&TopicEntry> {
        self.topics.iter().find(|entry| entry.key == key)
    }

    pub fn validate(&self) -> Result<()> {
        if self.topics.is_empty() {
            return Err(BotError::InvalidTopics("topic table is empty".to_string()));
        }
        for entry in &self.topics {
            if entry.key.trim().is_empty() {
                return Err(BotError::InvalidTopics("topic with empty key".to_string()));
            }
            if entry.answer.trim().is_empty() {
                return Err(
                    BotError::InvalidTopics(format!("topic '{}' has an empty answer", entry.key))
                );
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(
                    BotError::InvalidTopics(
                        format!("topic '{}' has an empty keyword", entry.key)
                    )
                );
            }
        }
        Ok(())
    }
}

pub fn load_topics(path: &str) -> Result<TopicTable> {
    let file_content = fs
        ::read_to_string(path)
        .map_err(|e| BotError::InvalidTopics(format!("failed to read '{}': {}", path, e)))?;
    let mut table: TopicTable = serde_json
        ::from_str(&file_content)
        .map_err(|e| BotError::InvalidTopics(format!("failed to parse '{}': {}", path, e)))?;
    // scoring compares against a lowercased query, so the table must be
    // lowercase too
    for entry in &mut table.topics {
        entry.key = entry.key.to_lowercase();
        for keyword in &mut entry.keywords {
            *keyword = keyword.to_lowercase();
        }
    }
    table.validate()?;
    info!("Loaded {} topics from: {}", table.topics.len(), path);
    Ok(table)
}

fn entry(key: &str, answer: &str, keywords: &[&str]) -> TopicEntry {
    TopicEntry {
        key: key.to_string(),
        answer: answer.to_string(),
        keywords: keywords
            .iter()
            .map(|k| k.to_string())
            .collect(),
    }
}

/// Built-in table for the Limitless studio site. Read-only at runtime.
pub static DEFAULT_TOPICS: Lazy<TopicTable> = Lazy::new(|| {
    let table = TopicTable {
        topics: vec![
            entry(
                "services",
                "We cover the full product journey: brand identity, UI/UX design, web and \
                 mobile development, and ongoing growth support. Most clients start with a \
                 discovery call so we can scope the right mix for them.",
                &["service", "offer", "do you", "capabilities", "design", "development", "branding", "help with"]
            ),
            entry(
                "pricing",
                "Project pricing depends on scope, but most engagements land between $5k and \
                 $50k. Share a few details through the contact form and we'll send a tailored \
                 quote within two business days.",
                &["cost", "price", "how much", "budget", "quote", "rates", "payment", "expensive"]
            ),
            entry(
                "timeline",
                "A typical project runs 4 to 12 weeks depending on scope. We share a detailed \
                 schedule after the discovery phase, with weekly checkpoints along the way.",
                &["how long", "timeline", "duration", "deadline", "turnaround", "launch date", "weeks"]
            ),
            entry(
                "process",
                "Our process has four stages: discovery, design, build, and launch. You get a \
                 dedicated point of contact and weekly demos, so there are no surprises at \
                 handoff.",
                &["process", "how do you work", "workflow", "steps", "approach", "methodology", "stages"]
            ),
            entry(
                "portfolio",
                "You can browse selected case studies on our Work page. If you want something \
                 closer to your industry, ask and we'll pull together relevant examples.",
                &["portfolio", "work", "projects", "examples", "case stud", "clients", "previous"]
            ),
            entry(
                "contact",
                "The quickest way to reach us is the contact form, or book a call straight into \
                 our calendar. We reply to every message within one business day.",
                &["contact", "reach", "email", "call", "talk", "get in touch", "meeting", "book"]
            ),
            entry(
                "about",
                "Limitless is a digital studio of designers and engineers building brands and \
                 products for ambitious teams. We work remotely with clients worldwide.",
                &["who are you", "about", "team", "studio", "company", "location", "where are you"]
            )
        ],
    };
    table.validate().expect("built-in topic table is well-formed");
    table
});

/// Seeded as the first transcript entry and restored after a reset.
pub const GREETING: &str =
    "Hi, I'm the Limitless assistant. Ask me about our services, pricing, timelines, or \
     anything else about working with the studio.";

/// Returned when no topic or keyword matches the query.
pub const FALLBACK_MESSAGE: &str =
    "I don't have an exact answer for that one. Try asking about our services, pricing, or \
     timelines, or reach the team directly through the contact form.";
