use crate::hangul::decompose;
use crate::post::Post;

/// Case-insensitive match of `query` against `text`.
///
/// Plain substring containment is tried first. When that fails both sides
/// are split into jamo and the query has to appear as a contiguous run of
/// the text's jamo, so a partially typed syllable such as `ㅈ` or `저ㄴ`
/// still finds `저는`.
pub fn field_matches(text: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let text = text.to_lowercase();
    let query = query.to_lowercase();
    if text.contains(&query) {
        return true;
    }

    let query_jamo = decompose(&query);
    if query_jamo.is_empty() {
        return true;
    }
    let text_jamo = decompose(&text);
    text_jamo.windows(query_jamo.len()).any(|window| window == query_jamo.as_slice())
}

/// True when the title, excerpt, body or any single tag matches. Keywords
/// and description are metadata only and never searched.
pub fn post_matches(post: &Post, query: &str) -> bool {
    field_matches(&post.title, query)
        || field_matches(post.excerpt.as_deref().unwrap_or(""), query)
        || field_matches(post.body.text(), query)
        || post.tags.iter().any(|tag| field_matches(tag, query))
}
