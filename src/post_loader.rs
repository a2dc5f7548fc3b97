use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use spdlog::{debug, info, warn};

use crate::content::front_matter::{parse_front_matter, FrontMatter};
use crate::error::{PostError, PostResult};
use crate::post::{Post, PostBody, PostId};
use crate::post_index::PostIndex;
use crate::post_list::{PostFile, PostList};
use crate::text_utils::{reading_time, DEFAULT_WORDS_PER_MINUTE};

/// What to do when two category folders hold a post with the same id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    FirstWins,
    /// The later post replaces the earlier one in its position.
    LastWins,
}

/// Whether `id`, `category` and `readingTime` found in the front matter
/// replace the values derived from the file location and body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPrecedence {
    #[default]
    Computed,
    FrontMatter,
}

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub words_per_minute: u32,
    pub duplicate_ids: DuplicatePolicy,
    pub field_precedence: FieldPrecedence,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            duplicate_ids: DuplicatePolicy::default(),
            field_precedence: FieldPrecedence::default(),
        }
    }
}

pub struct PostLoader {
    post_list: PostList,
    options: LoaderOptions,
}

impl PostLoader {
    pub fn new(root_dir: impl AsRef<Path>, options: LoaderOptions) -> Self {
        PostLoader {
            post_list: PostList::new(root_dir.as_ref()),
            options,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.post_list.root_dir
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Reads every post, in enumeration order. Bodies are kept as markdown.
    /// The first unreadable or malformed file aborts the whole load.
    pub fn load_all(&self) -> PostResult<Vec<Post>> {
        info!("Loading posts from {}", self.root_dir().display());

        let mut posts: Vec<Post> = vec![];
        let mut positions: HashMap<PostId, usize> = HashMap::new();

        for file in self.post_list.retrieve_all()? {
            let post = self.read_post(&file)?;
            let Some(&pos) = positions.get(&post.id) else {
                positions.insert(post.id.clone(), posts.len());
                posts.push(post);
                continue;
            };

            let first = &posts[pos];
            match self.options.duplicate_ids {
                DuplicatePolicy::Reject => {
                    return Err(PostError::DuplicateId {
                        id: post.id.to_string(),
                        first: first.file_name.clone(),
                        second: post.file_name,
                    });
                }
                DuplicatePolicy::FirstWins => {
                    warn!("Duplicate post id {}: keeping {}, ignoring {}",
                        post.id, first.file_name.display(), post.file_name.display());
                }
                DuplicatePolicy::LastWins => {
                    warn!("Duplicate post id {}: {} replaces {}",
                        post.id, post.file_name.display(), first.file_name.display());
                    posts[pos] = post;
                }
            }
        }

        info!("Loaded {} posts", posts.len());
        Ok(posts)
    }

    /// Builds a fresh index. Nothing is carried over from earlier builds.
    pub fn load_index(&self) -> PostResult<PostIndex> {
        Ok(PostIndex::new(self.load_all()?))
    }

    /// Loads a single post with its body rendered to HTML. When several
    /// categories hold the id, the duplicate policy picks the same file
    /// `load_all` would keep.
    pub fn get_one(&self, id: &str) -> PostResult<Post> {
        let mut found = self.post_list.find_all(id)?.into_iter();
        let chosen = match self.options.duplicate_ids {
            DuplicatePolicy::Reject => {
                let first = found.next();
                if let (Some(first), Some(second)) = (&first, found.next()) {
                    return Err(PostError::DuplicateId {
                        id: id.to_string(),
                        first: first.path.clone(),
                        second: second.path,
                    });
                }
                first
            }
            DuplicatePolicy::FirstWins => found.next(),
            DuplicatePolicy::LastWins => found.last(),
        };

        let Some(file) = chosen else {
            debug!("Post {} not found under {}", id, self.root_dir().display());
            return Err(PostError::NotFound { id: id.to_string() });
        };

        let mut post = self.read_post(&file)?;
        let html = post.body.to_html(&post.id)?;
        post.body = PostBody::Html(html);
        Ok(post)
    }

    fn read_post(&self, file: &PostFile) -> PostResult<Post> {
        debug!("Reading post {} from {}", file.id, file.path.display());
        let raw = fs::read_to_string(&file.path).map_err(|source| PostError::Io {
            path: file.path.clone(),
            source,
        })?;

        let (front_matter, body) = parse_front_matter(&file.path, &raw)?;
        self.build_post(file, front_matter, body)
    }

    fn build_post(&self, file: &PostFile, front_matter: FrontMatter, body: &str) -> PostResult<Post> {
        let missing = |field| PostError::MissingField { path: file.path.clone(), field };

        let FrontMatter {
            id,
            category,
            title,
            date,
            updated_at,
            description,
            excerpt,
            thumbnail,
            image,
            tags,
            keywords,
            reading_time: declared_reading_time,
            extra,
        } = front_matter;

        let title = title.ok_or_else(|| missing("title"))?;
        let date = date.ok_or_else(|| missing("date"))?;
        let computed_reading_time = reading_time(body, self.options.words_per_minute);

        let (id, category, reading_time) = match self.options.field_precedence {
            FieldPrecedence::Computed => {
                if id.is_some() || category.is_some() || declared_reading_time.is_some() {
                    debug!("Ignoring id/category/readingTime declared in {}", file.path.display());
                }
                (file.id.clone(), file.category.clone(), computed_reading_time)
            }
            FieldPrecedence::FrontMatter => (
                id.filter(|id| !id.is_empty()).map(PostId).unwrap_or_else(|| file.id.clone()),
                category.filter(|c| !c.is_empty()).unwrap_or_else(|| file.category.clone()),
                declared_reading_time.unwrap_or(computed_reading_time).max(1),
            ),
        };

        Ok(Post {
            id,
            category,
            date,
            updated_at,
            title,
            description,
            excerpt,
            thumbnail,
            image,
            tags,
            keywords,
            reading_time,
            body: PostBody::Markdown(body.to_string()),
            extra,
            file_name: file.path.clone(),
        })
    }
}
