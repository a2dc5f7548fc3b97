pub mod config;
pub mod logger;
pub mod error;
pub mod hangul;
pub mod search;
pub mod search_session;
pub mod post;
pub mod post_list;
pub mod post_loader;
pub mod post_index;
pub mod paginator;
pub mod content;
pub mod text_utils;
mod test_data;

pub use error::{PostError, PostResult};
pub use post::{Post, PostBody, PostId};
pub use post_index::PostIndex;
pub use post_loader::{DuplicatePolicy, FieldPrecedence, LoaderOptions, PostLoader};
pub use search::{field_matches, post_matches};
pub use search_session::SearchSession;
