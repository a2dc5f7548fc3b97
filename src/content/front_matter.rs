use std::collections::BTreeMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::{PostError, PostResult};

/// Metadata block of a post. Keys outside the known schema are collected in
/// `extra`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Splits `raw` into its front matter and the markdown body that follows.
/// A file without a leading `---` fence has an empty front matter.
pub fn parse_front_matter<'a>(file_name: &Path, raw: &'a str) -> PostResult<(FrontMatter, &'a str)> {
    lazy_static! {
        static ref OPENING_FENCE: Regex = Regex::new(r"\A\x{FEFF}?---[ \t]*\r?\n").unwrap();
        static ref FRONT_MATTER: Regex = Regex::new(
            r"(?s)\A\x{FEFF}?---[ \t]*\r?\n(?:(?P<yaml>.*?)\r?\n)?(?:---|\.\.\.)[ \t]*(?:\r?\n|\z)"
        ).unwrap();
    }

    if !OPENING_FENCE.is_match(raw) {
        return Ok((FrontMatter::default(), raw));
    }

    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return Err(malformed(file_name, "closing `---` of the front matter is missing".to_string()));
    };

    let block_end = caps.get(0).map_or(0, |m| m.end());
    let yaml = caps.name("yaml").map_or("", |m| m.as_str());
    let body = &raw[block_end..];

    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    match serde_yaml::from_str::<FrontMatter>(yaml) {
        Ok(front_matter) => Ok((front_matter, body)),
        Err(e) => Err(malformed(file_name, e.to_string())),
    }
}

fn malformed(file_name: &Path, reason: String) -> PostError {
    PostError::MalformedFrontMatter {
        path: file_name.to_path_buf(),
        reason,
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Unquoted YAML scalars such as `date: 2024` arrive as numbers
fn opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a scalar value")),
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::String(s)) => Ok(split_list(&s)),
        Some(Value::Sequence(items)) => items.into_iter()
            .map(|item| scalar_to_string(item).ok_or_else(|| D::Error::custom("expected a list of scalars")))
            .collect(),
        Some(_) => Err(D::Error::custom("expected a list or a comma separated string")),
    }
}

fn split_list(list_str: &str) -> Vec<String> {
    list_str.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}
