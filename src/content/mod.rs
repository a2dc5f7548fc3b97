pub mod front_matter;
pub mod markdown_renderer;
