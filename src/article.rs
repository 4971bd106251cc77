use serde::{Deserialize, Deserializer, Serialize};

/// A single news item as supplied by the corpus loader.
///
/// The core treats articles as read-only. Optional metadata is tolerated
/// rather than rejected: missing tags become an empty list, missing view
/// counts become zero, and a missing reading time is treated as
/// [`DEFAULT_READING_TIME`] minutes wherever the value is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO-8601-like timestamp string; ordered lexicographically.
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub views: u64,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Reading time assumed for articles that do not declare one.
pub const DEFAULT_READING_TIME: u32 = 5;

impl Article {
    pub fn reading_time_or_default(&self) -> u32 {
        self.reading_time.unwrap_or(DEFAULT_READING_TIME)
    }

    /// Text blob used for similarity features: title, summary, category and
    /// the space-joined tags.
    pub fn feature_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.summary.len() + self.category.len() + 32,
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.summary);
        text.push(' ');
        text.push_str(&self.category);
        text.push(' ');
        text.push_str(&self.tags.join(" "));
        text
    }
}

/// Corpus files in the wild carry both string and integer ids; accept either
/// and normalize to a string.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_missing_optional_fields() {
        let article: Article = serde_json::from_str(
            r#"{"id": 7, "title": "Quantum leap"}"#,
        )
        .unwrap();

        assert_eq!(article.id, "7");
        assert!(article.tags.is_empty());
        assert_eq!(article.views, 0);
        assert_eq!(article.reading_time_or_default(), DEFAULT_READING_TIME);
        assert!(article.url.is_none());
    }

    #[test]
    fn feature_text_joins_title_summary_category_tags() {
        let article: Article = serde_json::from_str(
            r#"{
                "id": "a1",
                "title": "AI breakthrough",
                "summary": "Models keep improving",
                "category": "Technology",
                "tags": ["AI", "ML"]
            }"#,
        )
        .unwrap();

        let text = article.feature_text();
        assert!(text.contains("AI breakthrough"));
        assert!(text.contains("Models keep improving"));
        assert!(text.contains("Technology"));
        assert!(text.contains("AI ML"));
    }
}
