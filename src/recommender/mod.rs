pub mod filter;
pub mod popularity;
pub mod similarity;

use tracing::debug;

use crate::article::Article;
use crate::error::Result;
use crate::profile::UserProfile;
use similarity::{RankOutcome, SimilarityModel};

/// Default list length for the main feed view.
pub const DEFAULT_FEED_LIMIT: usize = 10;
/// Default list length for the focused recommendations view.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// How many recently viewed articles seed the similarity ranking.
const SIMILARITY_SEEDS: usize = 5;

/// The recommendation pipeline: candidate selection, preference filtering,
/// then similarity ranking with a popularity fallback.
///
/// Owns the cached similarity feature space and its rebuild policy; callers
/// pass the article collection and user state in and render whatever ordered
/// list comes back.
#[derive(Debug, Default)]
pub struct NewsRecommender {
    model: Option<SimilarityModel>,
}

impl NewsRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return up to `n` articles for this user, best first.
    ///
    /// Unviewed articles are preferred (the full set is used once everything
    /// has been viewed), the preference filter narrows them, and the result
    /// is ordered by content similarity to recently viewed articles when
    /// history exists, otherwise by popularity. Never errors: empty input
    /// yields an empty list and any ranking problem degrades to the
    /// popularity fallback.
    pub fn get_recommendations(
        &mut self,
        articles: &[Article],
        profile: &UserProfile,
        n: usize,
    ) -> Vec<Article> {
        if articles.is_empty() {
            return Vec::new();
        }

        // Prefer unviewed articles, but never starve a user who has read
        // everything.
        let unviewed: Vec<Article> = articles
            .iter()
            .filter(|a| !profile.viewed_articles().contains(&a.id))
            .cloned()
            .collect();
        let unviewed = if unviewed.is_empty() {
            articles.to_vec()
        } else {
            unviewed
        };

        let filtered = filter::filter_by_preferences(&unviewed, profile);

        let candidates: Vec<Article> = if filtered.is_empty() {
            unviewed
        } else if filtered.len() >= n {
            filtered
        } else {
            // Backfill with the rest of the unviewed set, filtered items
            // first, no duplicates.
            let mut candidates = filtered;
            for article in unviewed {
                if !candidates.iter().any(|c| c.id == article.id) {
                    candidates.push(article);
                }
            }
            candidates
        };

        if profile.has_history() && candidates.len() > 1 {
            let seeds = profile.recently_viewed(SIMILARITY_SEEDS);
            match self.rank_by_similarity(articles, &seeds, &candidates, n) {
                RankOutcome::Ranked(ranked) => return ranked,
                RankOutcome::Unavailable(reason) => {
                    debug!(reason, "Similarity ranking unavailable, using popularity fallback");
                }
            }
        }

        popularity::top_popular(&candidates, n)
    }

    /// Record that the user opened an article.
    ///
    /// Marks it viewed, then auto-follows the article's first tag when that
    /// tag is neither followed nor muted. The auto-follow is a heuristic
    /// interest signal inherited from user behavior, not a verified
    /// statement of intent; unfollowing remains one call away.
    pub fn record_interaction(&self, article: &Article, profile: &mut UserProfile) -> Result<()> {
        profile.track_view(&article.id)?;

        if let Some(first_tag) = article.tags.first() {
            let tag = first_tag.trim();
            if !tag.is_empty()
                && !profile.followed_topics().contains(tag)
                && !profile.muted_topics().contains(tag)
            {
                profile.follow_topic(tag)?;
            }
        }
        Ok(())
    }

    /// Refresh the shared feature space if needed, then rank. Rebuilds are
    /// inline and bounded by the corpus size.
    fn rank_by_similarity(
        &mut self,
        articles: &[Article],
        seed_ids: &[String],
        candidates: &[Article],
        n: usize,
    ) -> RankOutcome {
        let needs_rebuild = match &self.model {
            Some(model) => model.is_stale(articles),
            None => true,
        };
        if needs_rebuild {
            self.model = SimilarityModel::train(articles);
        }

        match &self.model {
            Some(model) => model.rank(seed_ids, candidates, n),
            None => RankOutcome::Unavailable("no usable vocabulary in corpus"),
        }
    }
}
