//! Problem references and the text utilities around them

pub mod prompt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/problems/([A-Za-z0-9][A-Za-z0-9_-]*)").expect("slug pattern"))
}

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#?(\d+)(?:\s*[.:)\-]|\s)").expect("number pattern"))
}

/// Extract the problem slug from a problem-page URL such as
/// `https://leetcode.com/problems/two-sum/description/`.
pub fn extract_slug(url: &str) -> Option<String> {
    slug_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Truncate `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}…", text[..byte_idx].trim_end()),
        None => text.to_string(),
    }
}

/// Leading problem number of a title like `"1. Two Sum"` or `"15 - 3Sum"`.
pub fn problem_number(title: &str) -> Option<u32> {
    leading_number_regex()
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `two-sum` -> `Two Sum`
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A problem reference resolved from request fields, ready for prompting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub name: String,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl Problem {
    /// Resolve request fields into a problem. The slug falls back to the one
    /// embedded in `url`; the name falls back to the humanised slug.
    pub fn resolve(
        slug: Option<&str>,
        title: Option<&str>,
        url: Option<&str>,
        description: Option<&str>,
        max_description_chars: usize,
    ) -> Result<Self> {
        let url = non_blank(url);
        let slug = non_blank(slug).or_else(|| url.as_deref().and_then(extract_slug));
        let title = non_blank(title);

        let name = match (&title, &slug) {
            (Some(title), _) => title.clone(),
            (None, Some(slug)) => humanize_slug(slug),
            (None, None) => {
                return Err(AppError::InvalidRequest(
                    "Problem title or slug is required".to_string(),
                ))
            }
        };

        let description = non_blank(description)
            .map(|d| truncate_description(&d, max_description_chars));

        Ok(Self {
            name,
            slug,
            url,
            description,
        })
    }
}

/// Target language for generated solution code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Cpp,
    Java,
    Python,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Java, Language::Python];

    /// Parse a requested language; anything unrecognised yields the first allowed language.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        match value.trim().to_lowercase().as_str() {
            "cpp" | "c++" => Language::Cpp,
            "java" => Language::Java,
            "python" | "py" => Language::Python,
            _ => Self::ALL[0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Python => "Python 3",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
