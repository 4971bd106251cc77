use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::article::Article;
use crate::error::{AppError, Result};

/// Load the news corpus from a JSON array on disk.
///
/// The recommender core never reads the filesystem itself; this is the
/// collaborator that hands it an article collection at startup. A missing or
/// malformed file yields an empty corpus so the app still comes up.
pub fn load_articles(path: impl AsRef<Path>) -> Vec<Article> {
    let path = path.as_ref();
    match try_load_articles(path) {
        Ok(articles) => {
            info!(path = %path.display(), count = articles.len(), "Loaded news corpus");
            articles
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Using empty news corpus");
            Vec::new()
        }
    }
}

/// Fallible load, for callers that want to surface the failure instead of
/// degrading to an empty corpus.
pub fn try_load_articles(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::CorpusError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| AppError::CorpusError(format!("{}: {}", path.display(), e)))
}

/// Distinct categories present in the corpus, sorted for stable display.
pub fn categories(articles: &[Article]) -> Vec<String> {
    articles
        .iter()
        .map(|a| a.category.clone())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_corpus() {
        assert!(load_articles("does/not/exist.json").is_empty());
    }

    #[test]
    fn malformed_file_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "[{\"broken\":").unwrap();
        assert!(load_articles(&path).is_empty());
    }

    #[test]
    fn fallible_load_reports_corpus_errors() {
        let missing = try_load_articles("does/not/exist.json");
        assert!(matches!(missing, Err(AppError::CorpusError(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        fs::write(&path, "not json").unwrap();
        let malformed = try_load_articles(&path);
        assert!(matches!(malformed, Err(AppError::CorpusError(_))));
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let articles: Vec<Article> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "a", "category": "Tech"},
                {"id": 2, "title": "b", "category": "Health"},
                {"id": 3, "title": "c", "category": "Tech"},
                {"id": 4, "title": "d"}
            ]"#,
        )
        .unwrap();

        assert_eq!(categories(&articles), vec!["Health", "Tech"]);
    }
}
