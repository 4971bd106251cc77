use axum::{
    routing::{get, post, put},
    Router,
    extract::{Json, Path, Query, State},
    response::IntoResponse,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::models::{
    FeedFilter, FeedQuery, FeedResponse, ProfileResponse, RecommendationsQuery, TopicRequest,
};
use crate::api::response;
use crate::article::Article;
use crate::corpus;
use crate::error::{AppError, Result};
use crate::profile::PreferenceUpdate;
use crate::recommender::{DEFAULT_FEED_LIMIT, DEFAULT_RECOMMENDATION_LIMIT};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/feed", get(feed_handler))
        .route("/api/recommendations", get(recommendations_handler))
        .route("/api/articles/:id/view", post(view_handler))
        .route("/api/profile", get(profile_handler))
        .route("/api/preferences", put(update_preferences_handler))
        .route("/api/topics/follow", post(follow_topic_handler))
        .route("/api/topics/unfollow", post(unfollow_topic_handler))
        .route("/api/topics/mute", post(mute_topic_handler))
        .route("/api/categories", get(categories_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Main feed: optional category narrowing, then one of three orderings.
/// "for_you" runs the personalization pipeline; "recent" and "trending" are
/// plain sorts over the corpus.
async fn feed_handler(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);

    let mut articles: Vec<Article> = match &query.category {
        Some(category) => state
            .articles
            .iter()
            .filter(|a| a.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect(),
        None => state.articles.as_ref().clone(),
    };

    let articles = match query.filter {
        FeedFilter::Recent => {
            articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            articles.truncate(limit);
            articles
        }
        FeedFilter::Trending => {
            articles.sort_by(|a, b| b.views.cmp(&a.views));
            articles.truncate(limit);
            articles
        }
        FeedFilter::ForYou => {
            let profile = state.profile.lock().unwrap();
            let mut recommender = state.recommender.lock().unwrap();
            recommender.get_recommendations(&articles, &profile, limit)
        }
    };

    let total = articles.len();
    response::success(FeedResponse { articles, total })
}

/// Focused recommendations view over the whole corpus, default limit 5.
async fn recommendations_handler(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);

    let profile = state.profile.lock().unwrap();
    let mut recommender = state.recommender.lock().unwrap();
    let articles = recommender.get_recommendations(&state.articles, &profile, limit);

    let total = articles.len();
    response::success(FeedResponse { articles, total })
}

/// The UI reports an opened article here; this is the hook that updates the
/// viewed set, reading history and the auto-followed topic.
async fn view_handler(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<impl IntoResponse> {
    let article = state
        .articles
        .iter()
        .find(|a| a.id == article_id)
        .ok_or_else(|| AppError::NotFound(format!("No article with id {}", article_id)))?;

    let mut profile = state.profile.lock().unwrap();
    let recommender = state.recommender.lock().unwrap();
    recommender.record_interaction(article, &mut profile)?;

    info!(article_id = %article.id, "Recorded article view");
    Ok(response::ok_message("view recorded"))
}

async fn profile_handler(State(state): State<AppState>) -> impl IntoResponse {
    let profile = state.profile.lock().unwrap();

    let mut followed: Vec<String> = profile.followed_topics().iter().cloned().collect();
    followed.sort_unstable();
    let mut muted: Vec<String> = profile.muted_topics().iter().cloned().collect();
    muted.sort_unstable();

    response::success(ProfileResponse {
        preferences: profile.preferences().clone(),
        followed_topics: followed,
        muted_topics: muted,
        viewed_count: profile.viewed_articles().len(),
        history_len: profile.history_len(),
    })
}

/// Partial preference update; unrecognized keys in the body are ignored.
async fn update_preferences_handler(
    State(state): State<AppState>,
    Json(update): Json<PreferenceUpdate>,
) -> Result<impl IntoResponse> {
    let mut profile = state.profile.lock().unwrap();
    profile.update_preferences(update)?;
    Ok(response::ok_message("preferences updated"))
}

async fn follow_topic_handler(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<impl IntoResponse> {
    let mut profile = state.profile.lock().unwrap();
    profile.follow_topic(&req.topic)?;
    Ok(response::ok_message("topic followed"))
}

async fn unfollow_topic_handler(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<impl IntoResponse> {
    let mut profile = state.profile.lock().unwrap();
    profile.unfollow_topic(&req.topic)?;
    Ok(response::ok_message("topic unfollowed"))
}

async fn mute_topic_handler(
    State(state): State<AppState>,
    Json(req): Json<TopicRequest>,
) -> Result<impl IntoResponse> {
    let mut profile = state.profile.lock().unwrap();
    profile.mute_topic(&req.topic)?;
    Ok(response::ok_message("topic muted"))
}

async fn categories_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(corpus::categories(&state.articles))
}
