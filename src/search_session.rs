use crate::post::Post;
use crate::post_index::PostIndex;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// State behind the search overlay: whether it is shown, what has been
/// typed so far and the posts matching it.
pub struct SearchSession<'a> {
    index: &'a PostIndex,
    query: String,
    is_open: bool,
    max_results: usize,
    results: Vec<&'a Post>,
}

impl<'a> SearchSession<'a> {
    pub fn new(index: &'a PostIndex) -> Self {
        Self::with_max_results(index, DEFAULT_MAX_RESULTS)
    }

    pub fn with_max_results(index: &'a PostIndex, max_results: usize) -> Self {
        SearchSession {
            index,
            query: String::new(),
            is_open: false,
            max_results,
            results: vec![],
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hides the overlay. The query and its results are kept for the next
    /// time it is opened.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Re-filters the index synchronously. A blank query shows no results
    /// rather than the whole index.
    pub fn set_query(&mut self, query: &str) -> &[&'a Post] {
        self.query = query.to_string();
        self.results = if self.query.trim().is_empty() {
            vec![]
        } else {
            self.index.search(&self.query, self.max_results)
        };
        &self.results
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    pub fn results(&self) -> &[&'a Post] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn index() -> PostIndex {
        let posts = (1..=15)
            .map(|n| {
                let mut post = sample_post(&format!("p{:02}", n), "tech", &format!("2024-01-{:02}", n));
                post.title = if n % 2 == 0 { format!("짝수 글 {}", n) } else { format!("Odd post {}", n) };
                post
            })
            .collect();
        PostIndex::new(posts)
    }

    #[test]
    fn test_blank_query_has_no_results() {
        let index = index();
        let mut session = SearchSession::new(&index);
        assert!(session.set_query("").is_empty());
        assert!(session.set_query("   ").is_empty());
        assert_eq!(session.query(), "   ");
    }

    #[test]
    fn test_results_capped() {
        let index = index();
        let mut session = SearchSession::new(&index);
        let results = session.set_query("글");
        assert_eq!(results.len(), 7);

        let results = session.set_query("o");
        assert_eq!(results.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(results[0].id.as_str(), "p15");

        let mut small = SearchSession::with_max_results(&index, 3);
        let ids: Vec<&str> = small.set_query("ㅉ").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p14", "p12", "p10"]);
    }

    #[test]
    fn test_open_close_keeps_query() {
        let index = index();
        let mut session = SearchSession::new(&index);
        assert!(!session.is_open());

        session.open();
        session.set_query("odd");
        assert_eq!(session.results().len(), 8);

        session.close();
        assert!(!session.is_open());
        assert_eq!(session.query(), "odd");
        assert_eq!(session.results().len(), 8);

        session.toggle();
        assert!(session.is_open());
        session.clear();
        assert!(session.results().is_empty());
        assert_eq!(session.query(), "");
    }
}
