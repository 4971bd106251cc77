use crate::article::Article;

/// Order articles by popularity: view count descending, then publish
/// timestamp descending (lexicographic on the ISO-8601-like string). The
/// sort is stable, so equal keys keep their input order. Returns at most
/// `n` articles.
pub fn top_popular(articles: &[Article], n: usize) -> Vec<Article> {
    let mut sorted: Vec<Article> = articles.to_vec();
    sorted.sort_by(|a, b| {
        b.views
            .cmp(&a.views)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
    sorted.truncate(n);
    sorted
}
