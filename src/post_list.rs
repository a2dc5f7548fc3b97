use std::fs;
use std::path::{Path, PathBuf};

use spdlog::{debug, warn};

use crate::error::{PostError, PostResult};
use crate::post::PostId;

pub const POST_EXTENSION: &str = "md";

/// One markdown file found under a category directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFile {
    pub id: PostId,
    pub category: String,
    pub path: PathBuf,
}

/// Walks `<root_dir>/<category>/<id>.md`. Entries are returned sorted by
/// name so that the enumeration order is the same on every platform.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        PostList { root_dir: root_dir.into() }
    }

    pub fn retrieve_dirs(&self) -> PostResult<Vec<(String, PathBuf)>> {
        let mut dirs = vec![];
        for path in Self::sorted_entries(&self.root_dir)? {
            if !path.is_dir() {
                debug!("Skipping non-directory entry {}", path.display());
                continue;
            }
            match Self::entry_name(&path) {
                Some(category) => dirs.push((category, path)),
                None => warn!("Skipping directory with a non UTF-8 name: {}", path.display()),
            }
        }
        Ok(dirs)
    }

    pub fn retrieve_files(&self, category: &str, dir: &Path) -> PostResult<Vec<PostFile>> {
        let mut posts = vec![];
        for path in Self::sorted_entries(dir)? {
            if !path.is_file() || !Self::is_post_file(&path) {
                debug!("Skipping {}", path.display());
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping post file with a non UTF-8 name: {}", path.display());
                continue;
            };
            posts.push(PostFile {
                id: PostId(stem.to_string()),
                category: category.to_string(),
                path,
            });
        }
        Ok(posts)
    }

    /// Every post file, category by category.
    pub fn retrieve_all(&self) -> PostResult<Vec<PostFile>> {
        let mut posts = vec![];
        for (category, dir) in self.retrieve_dirs()? {
            posts.extend(self.retrieve_files(&category, &dir)?);
        }
        Ok(posts)
    }

    /// Every `<category>/<id>.md`, in enumeration order.
    pub fn find_all(&self, id: &str) -> PostResult<Vec<PostFile>> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Ok(vec![]);
        }

        let file_name = format!("{}.{}", id, POST_EXTENSION);
        let mut found = vec![];
        for (category, dir) in self.retrieve_dirs()? {
            let path = dir.join(&file_name);
            if path.is_file() {
                found.push(PostFile {
                    id: PostId(id.to_string()),
                    category,
                    path,
                });
            }
        }
        Ok(found)
    }

    fn is_post_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == POST_EXTENSION)
    }

    fn entry_name(path: &Path) -> Option<String> {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
    }

    fn sorted_entries(dir: &Path) -> PostResult<Vec<PathBuf>> {
        let read_error = |source| PostError::Io { path: dir.to_path_buf(), source };

        let mut entries = vec![];
        for entry in fs::read_dir(dir).map_err(read_error)? {
            entries.push(entry.map_err(read_error)?.path());
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::test_data::{simple_post_md, write_post};

    use super::*;

    #[test]
    fn test_retrieve_all_skips_noise() {
        let root = tempdir().unwrap();
        write_post(root.path(), "tech", "b.md", &simple_post_md("B", "2024-01-02"));
        write_post(root.path(), "tech", "a.md", &simple_post_md("A", "2024-01-01"));
        write_post(root.path(), "tech", "notes.txt", "not a post");
        write_post(root.path(), "life", "c.md", &simple_post_md("C", "2024-01-03"));
        fs::create_dir_all(root.path().join("tech").join("drafts.md")).unwrap();
        fs::write(root.path().join("README.md"), "top level file").unwrap();

        let post_list = PostList::new(root.path());
        let files = post_list.retrieve_all().unwrap();
        let ids: Vec<(&str, &str)> = files.iter()
            .map(|f| (f.category.as_str(), f.id.as_str()))
            .collect();
        assert_eq!(ids, [("life", "c"), ("tech", "a"), ("tech", "b")]);
    }

    #[test]
    fn test_find_all() {
        let root = tempdir().unwrap();
        write_post(root.path(), "life", "same.md", &simple_post_md("Life", "2024-01-01"));
        write_post(root.path(), "tech", "same.md", &simple_post_md("Tech", "2024-01-01"));

        let post_list = PostList::new(root.path());
        let found = post_list.find_all("same").unwrap();
        let categories: Vec<&str> = found.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(categories, ["life", "tech"]);
        assert_eq!(found[0].path, root.path().join("life").join("same.md"));

        assert!(post_list.find_all("missing").unwrap().is_empty());
        assert!(post_list.find_all("../life/same").unwrap().is_empty());
        assert!(post_list.find_all("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let root = tempdir().unwrap();
        let post_list = PostList::new(root.path().join("nope"));
        let err = post_list.retrieve_all().unwrap_err();
        assert!(matches!(err, PostError::Io { .. }));
    }
}
