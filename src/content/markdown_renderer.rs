use markdown::Options;

use crate::error::{PostError, PostResult};
use crate::post::PostId;

/// GFM rendering. Raw HTML, comments included, is escaped rather than
/// passed through.
pub fn render_markdown(id: &PostId, md_text: &str) -> PostResult<String> {
    markdown::to_html_with_options(md_text, &Options::gfm())
        .map_err(|e| PostError::Render {
            id: id.to_string(),
            reason: e.reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md_text: &str) -> String {
        render_markdown(&PostId("test".to_string()), md_text).unwrap()
    }

    #[test]
    fn test_render_gfm() {
        assert_eq!(render("~~old~~ **한글**"), "<p><del>old</del> <strong>한글</strong></p>");
    }

    #[test]
    fn test_comment_opener_in_code_span() {
        let html = render("Start a comment with `<!--`.");
        assert_eq!(html, "<p>Start a comment with <code>&lt;!--</code>.</p>");
    }

    #[test]
    fn test_comment_in_fenced_block_is_kept() {
        let html = render("```html\n<!-- keep me -->\n```\n");
        assert!(html.starts_with("<pre><code class=\"language-html\">"));
        assert!(html.contains("&lt;!-- keep me --&gt;"));
    }

    #[test]
    fn test_unclosed_comment_renders() {
        let html = render("text <!-- never closed");
        assert!(html.starts_with("<p>text "));
        assert!(html.contains("never closed"));
    }
}
