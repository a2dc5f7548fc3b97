use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use kiso_blog::config::{Config, Log};
use kiso_blog::logger::configure_logger;
use kiso_blog::paginator::Paginator;
use kiso_blog::text_utils::format_post_date;
use kiso_blog::{Post, PostError, PostIndex, PostLoader, SearchSession};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "kiso.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List posts, newest first
    List {
        #[arg(short = 'C', long)]
        category: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show a single post rendered as HTML
    Show {
        id: String,
    },
    /// List categories with their post count
    Categories,
    /// Search titles, excerpts, bodies and tags. Partial Hangul such as "ㅈ" is accepted
    Search {
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}

fn post_line(post: &Post) -> String {
    format!("{}  [{}] {} ({}, {}분)",
            format_post_date(&post.date),
            post.category,
            post.title,
            post.id,
            post.reading_time)
}

fn list(config: &Config, index: &PostIndex, category: Option<String>, page: usize) -> Result<()> {
    let posts: Vec<Post> = match category {
        Some(ref category) => index.in_category(category).cloned().collect(),
        None => index.posts().to_vec(),
    };

    let page_size = config.defaults.page_size;
    let paginator = Paginator::from(&posts, page_size);
    if paginator.page_count() == 0 {
        println!("No posts");
        return Ok(());
    }

    let page_posts = paginator.get_page(page).map_err(anyhow::Error::msg)?;
    for post in page_posts {
        println!("{}", post_line(post));
    }
    println!("-- page {}/{} ({} posts)", page, paginator.page_count(), posts.len());
    Ok(())
}

fn show(loader: &PostLoader, id: &str) -> Result<()> {
    let post = match loader.get_one(id) {
        Ok(post) => post,
        Err(PostError::NotFound { id }) => {
            println!("Post {} not found", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", post.title);
    if let Some(summary) = post.summary() {
        println!("{}", summary);
    }
    print!("{} · {} · {}분", format_post_date(&post.date), post.category, post.reading_time);
    if post.was_updated() {
        print!(" · 업데이트: {}", format_post_date(post.updated_at()));
    }
    println!();
    if !post.tags.is_empty() {
        println!("#{}", post.tags.join(" #"));
    }
    println!();
    println!("{}", post.body.text());
    Ok(())
}

fn categories(index: &PostIndex) {
    println!("all ({})", index.len());
    for (category, count) in index.category_counts() {
        println!("{} ({})", category, count);
    }
}

fn search_results(index: &PostIndex, query: &str, max_results: usize, json: bool) -> Result<String> {
    let mut session = SearchSession::with_max_results(index, max_results);
    session.open();
    let results = session.set_query(query);

    if json {
        return Ok(serde_json::to_string_pretty(results)?);
    }

    if results.is_empty() {
        return Ok(format!("No results for \"{}\"", query));
    }
    let lines: Vec<String> = results.iter().map(|post| post_line(post)).collect();
    Ok(lines.join("\n"))
}

fn search(config: &Config, index: &PostIndex, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let output = search_results(index, query, limit.unwrap_or(config.search.max_results), json)?;
    println!("{}", output);
    Ok(())
}

fn load_index(loader: &PostLoader) -> Result<PostIndex> {
    loader.load_index()
        .with_context(|| format!("Building post index from {}", loader.root_dir().display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);
    let config = open_config(config_path)?;

    let default_log = Log::default();
    if let Err(err) = configure_logger(config.log.as_ref().unwrap_or(&default_log)) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let loader = PostLoader::new(&config.paths.posts_dir, config.loader_options());
    info!("Using posts from {}", loader.root_dir().display());

    match args.command {
        Command::Show { id } => show(&loader, &id),
        Command::List { category, page } => list(&config, &load_index(&loader)?, category, page),
        Command::Categories => {
            categories(&load_index(&loader)?);
            Ok(())
        }
        Command::Search { query, limit, json } => search(&config, &load_index(&loader)?, &query, limit, json),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use kiso_blog::LoaderOptions;
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    fn write_post(root: &std::path::Path, category: &str, id: &str, title: &str, date: &str) {
        let dir = root.join(category);
        fs::create_dir_all(&dir).unwrap();
        let content = format!("---\ntitle: \"{}\"\ndate: \"{}\"\ntags: [검색]\n---\n한글 본문입니다.\n", title, date);
        fs::write(dir.join(format!("{}.md", id)), content).unwrap();
    }

    #[test]
    fn test_search_json_output() {
        let root = tempdir().unwrap();
        write_post(root.path(), "tech", "hangul", "한글 검색", "2024-02-01");
        write_post(root.path(), "life", "diary", "Diary", "2024-01-01");
        let index = PostLoader::new(root.path(), LoaderOptions::default()).load_index().unwrap();

        let output = search_results(&index, "ㅎ", 10, true).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        let results = value.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "hangul");
        assert_eq!(results[0]["readingTime"], 1);
        assert_eq!(results[1]["category"], "life");

        let output = search_results(&index, "zzz", 10, true).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_search_text_output() {
        let root = tempdir().unwrap();
        write_post(root.path(), "tech", "hangul", "한글 검색", "2024-02-01");
        let index = PostLoader::new(root.path(), LoaderOptions::default()).load_index().unwrap();

        assert_eq!(search_results(&index, "zzz", 10, false).unwrap(), "No results for \"zzz\"");
        let output = search_results(&index, "검", 10, false).unwrap();
        assert!(output.contains("[tech] 한글 검색 (hangul, 1분)"));
    }
}
