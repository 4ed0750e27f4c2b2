pub mod responder;

use crate::config::topics::TopicTable;

const SYNONYM_WEIGHT_DIVISOR: f32 = 6.0;
const KEY_MATCH_BONUS: f32 = 1.0;
const SECONDARY_PASS_SCORE: f32 = 0.7;

/// One ranked candidate produced by [`score_query`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopicScore {
    pub key: String,
    pub score: f32,
    pub matched_synonyms: Vec<String>,
}

/// Ranks every topic in the table against a free-text query.
///
/// Each keyword found as a substring of the lowercased query contributes
/// `keyword length / 6` so that longer, more specific keywords outweigh short
/// ones, and a topic whose key appears verbatim in the query gets a flat
/// bonus. When nothing scores, a secondary pass over the raw keys assigns a
/// fixed 0.7. The sort is stable, so equal scores keep table order.
pub fn score_query(table: &TopicTable, query: &str) -> Vec<TopicScore> {
    let query = query.to_lowercase();
    let mut ranked: Vec<TopicScore> = Vec::new();

    for entry in &table.topics {
        let mut score = 0.0_f32;
        let mut matched_synonyms = Vec::new();
        for keyword in &entry.keywords {
            if query.contains(keyword.as_str()) {
                score += (keyword.len() as f32) / SYNONYM_WEIGHT_DIVISOR;
                matched_synonyms.push(keyword.clone());
            }
        }
        if query.contains(entry.key.as_str()) {
            score += KEY_MATCH_BONUS;
        }
        if score > 0.0 {
            ranked.push(TopicScore {
                key: entry.key.clone(),
                score,
                matched_synonyms,
            });
        }
    }

    if ranked.is_empty() {
        for entry in &table.topics {
            if query.contains(entry.key.as_str()) {
                ranked.push(TopicScore {
                    key: entry.key.clone(),
                    score: SECONDARY_PASS_SCORE,
                    matched_synonyms: Vec::new(),
                });
            }
        }
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
