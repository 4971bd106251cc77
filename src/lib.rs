pub mod api;
pub mod article;
pub mod config;
pub mod corpus;
pub mod error;
pub mod profile;
pub mod recommender;

use std::sync::{Arc, Mutex};

use article::Article;
use config::Config;
use profile::UserProfile;
use recommender::NewsRecommender;

/// Application state that will be shared across handlers.
///
/// The corpus is read-only after startup. The single user's profile and the
/// recommender (with its cached feature space) are mutex-guarded; each
/// request locks, runs to completion including the persistence write, and
/// unlocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub articles: Arc<Vec<Article>>,
    pub profile: Arc<Mutex<UserProfile>>,
    pub recommender: Arc<Mutex<NewsRecommender>>,
}
