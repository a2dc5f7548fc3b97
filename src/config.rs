use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::post_loader::{DuplicatePolicy, FieldPrecedence, LoaderOptions};
use crate::search_session::DEFAULT_MAX_RESULTS;
use crate::text_utils::DEFAULT_WORDS_PER_MINUTE;

const DEFAULT_PAGE_SIZE: usize = 9;

#[derive(Deserialize)]
pub struct Paths {
    pub posts_dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub page_size: usize,
    pub words_per_minute: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            page_size: DEFAULT_PAGE_SIZE,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Search {
    pub max_results: usize,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Loader {
    pub duplicate_ids: DuplicatePolicy,
    pub field_precedence: FieldPrecedence,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: LogLevel::Info,
            log_to_console: true,
            location: None,
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub search: Search,
    #[serde(default)]
    pub loader: Loader,
    pub log: Option<Log>,
}

impl Config {
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            words_per_minute: self.defaults.words_per_minute,
            duplicate_ids: self.loader.duplicate_ids,
            field_precedence: self.loader.field_precedence,
        }
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .and_then(|dir| dir.to_str())
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find the executable directory"))?;
    Ok(PathBuf::from(str_path.replace("${exe_dir}", exe_dir)))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths.posts_dir = parse_path(cfg.paths.posts_dir)?;
    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
