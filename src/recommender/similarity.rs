use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::article::Article;

// Process-wide English stopword set, built once.
static STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .collect()
});

/// Outcome of a similarity ranking attempt. `Unavailable` carries the reason
/// and tells the orchestrator to use the popularity fallback; it is never an
/// error surfaced to the caller.
#[derive(Debug)]
pub enum RankOutcome {
    Ranked(Vec<Article>),
    Unavailable(&'static str),
}

/// Shared TF-IDF feature space over the full article set.
///
/// Seeds and candidates are both resolved by index lookup into this one
/// space; vectorizing them independently would put them in incomparable
/// spaces. Document vectors are L2-normalized so cosine similarity is a
/// plain dot product.
#[derive(Debug)]
pub struct SimilarityModel {
    vectors: Vec<Vec<f32>>,
    index_by_id: HashMap<String, usize>,
    fingerprint: Vec<String>,
    trained_at: DateTime<Utc>,
}

impl SimilarityModel {
    /// Build the feature space from every supplied article. Returns `None`
    /// when no usable vocabulary survives tokenization (all-stopword or
    /// empty corpus).
    pub fn train(articles: &[Article]) -> Option<Self> {
        if articles.is_empty() {
            return None;
        }

        let documents: Vec<Vec<String>> = articles
            .iter()
            .map(|a| tokenize(&a.feature_text()))
            .collect();

        // Vocabulary and document frequencies
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        for tokens in &documents {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term.clone()).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                doc_freq[idx] += 1;
            }
        }

        if vocabulary.is_empty() {
            return None;
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        // TF-IDF document vectors, L2-normalized
        let vectors: Vec<Vec<f32>> = documents
            .iter()
            .map(|tokens| {
                let mut vector = vec![0.0_f32; vocabulary.len()];
                for term in tokens {
                    if let Some(&idx) = vocabulary.get(term) {
                        vector[idx] += idf[idx];
                    }
                }
                let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for v in &mut vector {
                        *v /= norm;
                    }
                }
                vector
            })
            .collect();

        let index_by_id: HashMap<String, usize> = articles
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();

        debug!(
            articles = articles.len(),
            vocabulary = vocabulary.len(),
            "Trained similarity model"
        );

        Some(SimilarityModel {
            vectors,
            index_by_id,
            fingerprint: corpus_fingerprint(articles),
            trained_at: Utc::now(),
        })
    }

    /// Stale when older than an hour or when the article set it was trained
    /// on no longer matches the supplied one.
    pub fn is_stale(&self, articles: &[Article]) -> bool {
        if Utc::now() - self.trained_at > Duration::hours(1) {
            return true;
        }
        self.fingerprint != corpus_fingerprint(articles)
    }

    /// Rank `candidates` by their mean cosine similarity against the seed
    /// articles, descending, ties broken by original candidate order.
    ///
    /// Seeds that do not resolve in the feature space are ignored; if none
    /// resolve the ranking is unavailable. Candidates missing from the space
    /// score zero rather than failing the whole ranking.
    pub fn rank(&self, seed_ids: &[String], candidates: &[Article], n: usize) -> RankOutcome {
        let seed_vectors: Vec<&Vec<f32>> = seed_ids
            .iter()
            .filter_map(|id| self.index_by_id.get(id))
            .map(|&idx| &self.vectors[idx])
            .collect();

        if seed_vectors.is_empty() {
            return RankOutcome::Unavailable("no seed articles in feature space");
        }

        let mut scored: Vec<(usize, f32)> = candidates
            .iter()
            .enumerate()
            .map(|(position, candidate)| {
                let score = match self.index_by_id.get(&candidate.id) {
                    Some(&idx) => {
                        let candidate_vector = &self.vectors[idx];
                        let total: f32 = seed_vectors
                            .iter()
                            .map(|seed| dot(seed, candidate_vector))
                            .sum();
                        total / seed_vectors.len() as f32
                    }
                    None => 0.0,
                };
                (position, score)
            })
            .collect();

        scored.sort_by(|(pos_a, score_a), (pos_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(pos_a.cmp(pos_b))
        });

        let ranked = scored
            .into_iter()
            .take(n)
            .map(|(position, _)| candidates[position].clone())
            .collect();
        RankOutcome::Ranked(ranked)
    }
}

/// Lowercase, split on non-alphanumeric boundaries, drop stopwords and
/// single characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1 && !STOPWORDS.contains(*token))
        .map(str::to_string)
        .collect()
}

fn corpus_fingerprint(articles: &[Article]) -> Vec<String> {
    let mut ids: Vec<String> = articles.iter().map(|a| a.id.clone()).collect();
    ids.sort_unstable();
    ids
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
