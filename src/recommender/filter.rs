use crate::article::Article;
use crate::profile::UserProfile;

/// Narrow a candidate collection by the user's declared preferences.
///
/// Stages apply in order, each on the output of the previous: followed
/// topics, muted topics, preferred sources, reading-time window. A stage
/// whose predicate set is empty is skipped rather than eliminating
/// everything. The output is always a subset of the input in the input's
/// relative order; nothing is mutated.
pub fn filter_by_preferences(articles: &[Article], profile: &UserProfile) -> Vec<Article> {
    if articles.is_empty() {
        return Vec::new();
    }

    let mut filtered: Vec<Article> = articles.to_vec();

    // Keep articles matching any followed topic
    if !profile.followed_topics().is_empty() {
        filtered.retain(|a| {
            profile
                .followed_topics()
                .iter()
                .any(|topic| matches_topic(a, topic))
        });
    }

    // Drop articles matching any muted topic. Applied after the follow
    // stage so a mute always wins over a follow match.
    if !profile.muted_topics().is_empty() {
        filtered.retain(|a| {
            !profile
                .muted_topics()
                .iter()
                .any(|topic| matches_topic(a, topic))
        });
    }

    // Keep articles from preferred sources
    let preferences = profile.preferences();
    if !preferences.sources.is_empty() {
        let preferred: Vec<String> = preferences
            .sources
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        filtered.retain(|a| preferred.contains(&a.source.to_lowercase()));
    }

    // Keep articles inside the reading-time window (inclusive)
    filtered.retain(|a| {
        let minutes = a.reading_time_or_default();
        preferences.min_reading_time <= minutes && minutes <= preferences.max_reading_time
    });

    filtered
}

/// Case-insensitive substring match against the article's title or joined
/// tag text.
fn matches_topic(article: &Article, topic: &str) -> bool {
    let topic = topic.to_lowercase();
    article.title.to_lowercase().contains(&topic)
        || article.tags.join(" ").to_lowercase().contains(&topic)
}
