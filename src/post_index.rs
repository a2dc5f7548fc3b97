use std::collections::HashMap;

use crate::paginator::Paginator;
use crate::post::{Post, PostId};
use crate::search::post_matches;

/// Immutable snapshot of every post, newest first.
pub struct PostIndex {
    posts: Vec<Post>,
    by_id: HashMap<PostId, usize>,
}

impl PostIndex {
    /// ISO dates sort chronologically as strings. The sort is stable, so
    /// posts sharing a date keep the order they were loaded in.
    pub fn new(mut posts: Vec<Post>) -> PostIndex {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        let by_id = posts.iter()
            .enumerate()
            .map(|(pos, post)| (post.id.clone(), pos))
            .collect();

        PostIndex {
            posts,
            by_id,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.by_id
            .get(&PostId(id.to_string()))
            .map(|&pos| &self.posts[pos])
    }

    /// Distinct categories, in the order they first appear in the index.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = vec![];
        for post in self.posts.iter() {
            if !categories.contains(&post.category.as_str()) {
                categories.push(post.category.as_str());
            }
        }
        categories
    }

    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        self.categories()
            .into_iter()
            .map(|category| (category, self.in_category(category).count()))
            .collect()
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item=&'a Post> + 'a {
        self.posts.iter().filter(move |post| post.category == category)
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item=&'a Post> + 'a {
        self.posts.iter().filter(move |post| post.has_tag(tag))
    }

    pub fn paginator(&self, page_size: usize) -> Paginator<'_, Post> {
        Paginator::from(&self.posts, page_size)
    }

    pub fn page(&self, page: usize, page_size: usize) -> Result<&[Post], String> {
        self.paginator(page_size).get_page(page)
    }

    /// Posts matching `query`, newest first, at most `limit` of them.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Post> {
        self.posts.iter()
            .filter(|post| post_matches(post, query))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn index() -> PostIndex {
        let mut a = sample_post("a", "tech", "2024-01-01");
        a.tags = vec!["rust".to_string()];
        let b = sample_post("b", "life", "2024-02-01");
        let c = sample_post("c", "tech", "2024-01-01");
        let mut d = sample_post("d", "tech", "2023-12-31T23:00:00+09:00");
        d.tags = vec!["rust".to_string(), "개발".to_string()];
        PostIndex::new(vec![a, b, c, d])
    }

    fn ids<'a>(posts: impl IntoIterator<Item=&'a Post>) -> Vec<&'a str> {
        posts.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_stable() {
        let index = index();
        assert_eq!(ids(index.posts()), ["b", "a", "c", "d"]);
        assert_eq!(index.len(), 4);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_get() {
        let index = index();
        assert_eq!(index.get("c").map(|p| p.category.as_str()), Some("tech"));
        assert!(index.get("zzz").is_none());
    }

    #[test]
    fn test_categories() {
        let index = index();
        assert_eq!(index.categories(), ["life", "tech"]);
        assert_eq!(index.category_counts(), [("life", 1), ("tech", 3)]);
        assert_eq!(ids(index.in_category("tech")), ["a", "c", "d"]);
        assert_eq!(ids(index.in_category("travel")), Vec::<&str>::new());
    }

    #[test]
    fn test_with_tag() {
        let index = index();
        assert_eq!(ids(index.with_tag("rust")), ["a", "d"]);
        assert_eq!(ids(index.with_tag("개발")), ["d"]);
    }

    #[test]
    fn test_pages() {
        let index = index();
        assert_eq!(ids(index.page(1, 3).unwrap()), ["b", "a", "c"]);
        assert_eq!(ids(index.page(2, 3).unwrap()), ["d"]);
        assert!(index.page(3, 3).is_err());
    }

    #[test]
    fn test_search_limit() {
        let index = index();
        assert_eq!(ids(index.search("Post", 2)), ["b", "a"]);
        assert_eq!(ids(index.search("ㄱㅐ", 10)), ["d"]);
    }

    #[test]
    fn test_empty_index() {
        let index = PostIndex::new(vec![]);
        assert!(index.is_empty());
        assert!(index.categories().is_empty());
        assert!(index.page(1, 9).is_err());
    }
}
