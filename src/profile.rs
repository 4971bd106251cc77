use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, Result};

/// Reading history never grows past this many entries; oldest drop first.
const HISTORY_CAP: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub interests: Vec<String>,
    pub sources: Vec<String>,
    pub min_reading_time: u32,
    pub max_reading_time: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            sources: Vec::new(),
            min_reading_time: 1,
            max_reading_time: 10,
        }
    }
}

/// Partial preference update: only fields that are present overwrite the
/// stored values. Unrecognized keys in the incoming JSON are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PreferenceUpdate {
    pub interests: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub min_reading_time: Option<u32>,
    pub max_reading_time: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub article_id: String,
    pub timestamp: DateTime<Utc>,
}

/// One user's state: preferences, the set of viewed articles, a capped
/// time-ordered reading history, and followed/muted topic sets.
///
/// Every mutation writes the whole record back to disk before returning, so
/// the on-disk file is always the current truth. A topic is never in both
/// the followed and muted sets at once.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    preferences: Preferences,
    #[serde(default)]
    viewed_articles: HashSet<String>,
    #[serde(default)]
    reading_history: Vec<HistoryEntry>,
    #[serde(default)]
    followed_topics: HashSet<String>,
    #[serde(default)]
    muted_topics: HashSet<String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl UserProfile {
    /// Load the profile from `path`, falling back to a default profile when
    /// the file is missing or unreadable. Load failure is never fatal.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut profile = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<UserProfile>(&contents) {
                Ok(profile) => profile,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed user profile, starting fresh");
                    UserProfile::default()
                }
            },
            Err(_) => UserProfile::default(),
        };
        profile.path = Some(path.to_path_buf());
        profile
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn viewed_articles(&self) -> &HashSet<String> {
        &self.viewed_articles
    }

    pub fn followed_topics(&self) -> &HashSet<String> {
        &self.followed_topics
    }

    pub fn muted_topics(&self) -> &HashSet<String> {
        &self.muted_topics
    }

    pub fn history_len(&self) -> usize {
        self.reading_history.len()
    }

    pub fn has_history(&self) -> bool {
        !self.reading_history.is_empty()
    }

    /// Overwrite only the preference fields present in `update`.
    pub fn update_preferences(&mut self, update: PreferenceUpdate) -> Result<()> {
        if let Some(interests) = update.interests {
            self.preferences.interests = interests;
        }
        if let Some(sources) = update.sources {
            self.preferences.sources = sources;
        }
        if let Some(min) = update.min_reading_time {
            self.preferences.min_reading_time = min;
        }
        if let Some(max) = update.max_reading_time {
            self.preferences.max_reading_time = max;
        }
        self.save()
    }

    /// Record that the user has viewed an article. Re-viewing an already
    /// seen article is a no-op, so a second call with the same id changes
    /// nothing.
    pub fn track_view(&mut self, article_id: &str) -> Result<()> {
        if self.viewed_articles.contains(article_id) {
            return Ok(());
        }
        self.viewed_articles.insert(article_id.to_string());
        self.reading_history.push(HistoryEntry {
            article_id: article_id.to_string(),
            timestamp: Utc::now(),
        });
        if self.reading_history.len() > HISTORY_CAP {
            let excess = self.reading_history.len() - HISTORY_CAP;
            self.reading_history.drain(..excess);
        }
        self.save()
    }

    /// Follow a topic, removing it from the muted set if present.
    pub fn follow_topic(&mut self, topic: &str) -> Result<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(());
        }
        self.muted_topics.remove(topic);
        self.followed_topics.insert(topic.to_string());
        self.save()
    }

    pub fn unfollow_topic(&mut self, topic: &str) -> Result<()> {
        self.followed_topics.remove(topic.trim());
        self.save()
    }

    /// Mute a topic, removing it from the followed set if present.
    pub fn mute_topic(&mut self, topic: &str) -> Result<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(());
        }
        self.followed_topics.remove(topic);
        self.muted_topics.insert(topic.to_string());
        self.save()
    }

    /// Up to the last `n` viewed article ids, most recent first.
    pub fn recently_viewed(&self, n: usize) -> Vec<String> {
        self.reading_history
            .iter()
            .rev()
            .take(n)
            .map(|entry| entry.article_id.clone())
            .collect()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            // Detached profile (tests, in-memory use): nothing to persist.
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_view_is_idempotent_per_id() {
        let mut profile = UserProfile::default();
        profile.track_view("a1").unwrap();
        profile.track_view("a1").unwrap();

        assert_eq!(profile.viewed_articles().len(), 1);
        assert_eq!(profile.history_len(), 1);
    }

    #[test]
    fn follow_and_mute_are_mutually_exclusive() {
        let mut profile = UserProfile::default();
        profile.follow_topic("AI").unwrap();
        profile.mute_topic("AI").unwrap();
        assert!(!profile.followed_topics().contains("AI"));
        assert!(profile.muted_topics().contains("AI"));

        profile.follow_topic("AI").unwrap();
        assert!(profile.followed_topics().contains("AI"));
        assert!(!profile.muted_topics().contains("AI"));
    }

    #[test]
    fn history_is_capped_at_most_recent_entries() {
        let mut profile = UserProfile::default();
        for i in 0..1005 {
            profile.track_view(&format!("article-{}", i)).unwrap();
        }

        assert_eq!(profile.history_len(), 1000);
        // Oldest five dropped; order of the remainder preserved.
        let recent = profile.recently_viewed(1);
        assert_eq!(recent, vec!["article-1004".to_string()]);
        let oldest_kept = profile.recently_viewed(1000).pop().unwrap();
        assert_eq!(oldest_kept, "article-5");
    }

    #[test]
    fn recently_viewed_is_most_recent_first() {
        let mut profile = UserProfile::default();
        profile.track_view("a").unwrap();
        profile.track_view("b").unwrap();
        profile.track_view("c").unwrap();

        assert_eq!(profile.recently_viewed(2), vec!["c", "b"]);
        assert_eq!(profile.recently_viewed(10).len(), 3);
    }

    #[test]
    fn partial_update_leaves_other_fields_alone() {
        let mut profile = UserProfile::default();
        profile
            .update_preferences(PreferenceUpdate {
                sources: Some(vec!["BBC".to_string()]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(profile.preferences().sources, vec!["BBC"]);
        assert_eq!(profile.preferences().min_reading_time, 1);
        assert_eq!(profile.preferences().max_reading_time, 10);
        assert!(profile.preferences().interests.is_empty());
    }

    #[test]
    fn persists_and_reloads_full_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let mut profile = UserProfile::load(&path);
        profile.track_view("a1").unwrap();
        profile.follow_topic("Space").unwrap();
        profile.mute_topic("Crypto").unwrap();
        profile
            .update_preferences(PreferenceUpdate {
                min_reading_time: Some(2),
                ..Default::default()
            })
            .unwrap();

        let reloaded = UserProfile::load(&path);
        assert!(reloaded.viewed_articles().contains("a1"));
        assert!(reloaded.followed_topics().contains("Space"));
        assert!(reloaded.muted_topics().contains("Crypto"));
        assert_eq!(reloaded.preferences().min_reading_time, 2);
        assert_eq!(reloaded.history_len(), 1);
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{not json at all").unwrap();

        let profile = UserProfile::load(&path);
        assert!(profile.viewed_articles().is_empty());
        assert_eq!(profile.preferences(), &Preferences::default());
    }
}
