use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

use crate::content::markdown_renderer::render_markdown;
use crate::error::PostResult;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post content. Index loads keep the markdown source, single-post loads
/// carry the rendered HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PostBody {
    #[serde(rename = "content")]
    Markdown(String),
    #[serde(rename = "contentHtml")]
    Html(String),
}

impl PostBody {
    pub fn text(&self) -> &str {
        match self {
            PostBody::Markdown(md) => md.as_str(),
            PostBody::Html(html) => html.as_str(),
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, PostBody::Html(_))
    }

    pub fn to_html(&self, id: &PostId) -> PostResult<String> {
        match self {
            PostBody::Markdown(md) => render_markdown(id, md),
            PostBody::Html(html) => Ok(html.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub category: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub reading_time: u32,
    #[serde(flatten)]
    pub body: PostBody,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
    #[serde(skip)]
    pub file_name: PathBuf,
}

impl Post {
    pub fn updated_at(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(&self.date)
    }

    pub fn was_updated(&self) -> bool {
        self.updated_at.as_deref().is_some_and(|updated| updated != self.date)
    }

    /// Description first, used for metadata.
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref().or(self.excerpt.as_deref())
    }

    /// Excerpt first, used for list cards.
    pub fn preview(&self) -> Option<&str> {
        self.excerpt.as_deref().or(self.description.as_deref())
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.image.as_deref())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, category={}, date={}, reading_time={}\ntitle={}",
               self.id,
               self.category,
               self.date,
               self.reading_time,
               self.title,
        )
    }
}
