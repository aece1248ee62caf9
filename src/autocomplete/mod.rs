use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub phrase: String,
    pub matched_prefix: String,
    pub remainder: String,
}

impl Suggestion {
    // splits by chars, so multi-byte phrases are safe
    pub fn split(phrase: &str, prefix_len: usize) -> Self {
        let cut = phrase
            .char_indices()
            .nth(prefix_len)
            .map(|(i, _)| i)
            .unwrap_or(phrase.len());
        let (matched_prefix, remainder) = phrase.split_at(cut);
        Self {
            phrase: phrase.to_string(),
            matched_prefix: matched_prefix.to_string(),
            remainder: remainder.to_string(),
        }
    }
}

pub fn split_suggestions(prefix: &str, candidates: &[String]) -> Vec<Suggestion> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Vec::new();
    }
    let prefix_len = prefix.chars().count();
    candidates
        .iter()
        .map(|c| Suggestion::split(c, prefix_len))
        .collect()
}
