use serde::{Deserialize, Serialize};

use crate::article::Article;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    #[default]
    ForYou,
    Recent,
    Trending,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub filter: FeedFilter,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub articles: Vec<Article>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub preferences: crate::profile::Preferences,
    pub followed_topics: Vec<String>,
    pub muted_topics: Vec<String>,
    pub viewed_count: usize,
    pub history_len: usize,
}
