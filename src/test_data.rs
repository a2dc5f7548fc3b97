#![cfg(test)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::post::{Post, PostBody, PostId};

pub const POST_DATA_MD: &str = r##"---
title: "Rust로 블로그 검색 만들기"
date: "2024-02-12"
updatedAt: "2024-03-01"
description: 한글 자모 검색을 구현해 봅니다
excerpt: 저는 개발자입니다
thumbnail: /images/search.png
tags:
  - rust
  - 검색
keywords: [hangul, search]
series: building-kiso
---

# 한글 검색

저는 개발자입니다. 오늘은 **자모 분리 검색**을 만들어 봅니다.
"##;

pub fn sample_post(id: &str, category: &str, date: &str) -> Post {
    Post {
        id: PostId(id.to_string()),
        category: category.to_string(),
        date: date.to_string(),
        updated_at: None,
        title: format!("Post {}", id),
        description: None,
        excerpt: None,
        thumbnail: None,
        image: None,
        tags: vec![],
        keywords: vec![],
        reading_time: 1,
        body: PostBody::Markdown("Body".to_string()),
        extra: BTreeMap::new(),
        file_name: PathBuf::from(format!("{}/{}.md", category, id)),
    }
}

pub fn simple_post_md(title: &str, date: &str) -> String {
    format!("---\ntitle: \"{}\"\ndate: \"{}\"\n---\n\nSome body text.\n", title, date)
}

pub fn write_post(root: &Path, category: &str, file_name: &str, content: &str) {
    let dir = root.join(category);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file_name), content).unwrap();
}
