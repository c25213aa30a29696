//! Blog posts: a frontmatter header followed by a markdown body.
//!
//! A post file looks like this:
//! ```plain
//! ---
//! title: How to Find the Source of an Image
//! description: A step-by-step guide.
//! date: 2024-03-01
//! category: how-to
//! keywords: [image source, reverse image search]
//! ---
//!
//! Markdown body...
//! ```
//! A `+++` delimited TOML header is accepted as well.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

/// Average reading speed used for [`reading_time`].
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Kind of article, used to group posts on the blog index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Long-form cornerstone content.
    Pillar,
    /// Step-by-step guides.
    HowTo,
    /// Articles tied to one of the use-case pages.
    UseCase,
}

impl Category {
    /// Wire name of the category, as written in frontmatter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pillar => "pillar",
            Self::HowTo => "how-to",
            Self::UseCase => "use-case",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not one of `pillar`, `how-to`, `use-case`.
#[derive(Debug, thiserror::Error)]
#[error("unknown category `{0}`, expected one of: pillar, how-to, use-case")]
pub struct UnknownCategory(String);

impl core::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pillar" => Ok(Self::Pillar),
            "how-to" => Ok(Self::HowTo),
            "use-case" => Ok(Self::UseCase),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Metadata header of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frontmatter {
    title: String,
    #[serde(default)]
    description: String,
    date: String,
    category: Category,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
}

impl Frontmatter {
    /// Create frontmatter with the required fields; everything else starts empty.
    pub fn new(title: impl Into<String>, date: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date: date.into(),
            category,
            keywords: Vec::new(),
            image: None,
            author: None,
            canonical: None,
        }
    }

    /// Title of the post
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Short summary shown in listings and meta tags
    #[must_use]
    pub const fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Set the description of the post
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Publication date as written, expected to be ISO-8601.
    #[must_use]
    pub const fn date(&self) -> &str {
        self.date.as_str()
    }

    /// Calendar date of publication, if `date` starts with `YYYY-MM-DD`.
    #[must_use]
    pub fn published(&self) -> Option<Date> {
        let day = self.date.get(..10)?;
        Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
    }

    /// Category of the post
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Keywords, used for related posts and meta tags
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Add a keyword to the post
    pub fn add_keyword(&mut self, keyword: impl Into<String>) {
        self.keywords.push(keyword.into());
    }

    /// Whether the two posts have at least one keyword in common.
    #[must_use]
    pub fn shares_keyword_with(&self, other: &Self) -> bool {
        self.keywords
            .iter()
            .any(|keyword| other.keywords.contains(keyword))
    }

    /// Cover image URL, if any
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Author of the post, if named
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Set the author of the post
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = Some(author.into());
    }

    /// Canonical URL or path overriding `/blog/<slug>`
    #[must_use]
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// Render the frontmatter as a YAML header block, delimiters included.
    ///
    /// # Errors
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml_block(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{yaml}---\n"))
    }
}

/// A blog post loaded from a content file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
    slug: String,
    frontmatter: Frontmatter,
    content: String, // raw markdown
    reading_time: f64,
}

/// Errors that can occur when parsing a post file
#[derive(Debug, thiserror::Error)]
pub enum FailToParsePost {
    /// The file does not start with a `---` or `+++` line
    #[error("Missing frontmatter block")]
    MissingFrontmatter,
    /// The opening delimiter is never closed
    #[error("Frontmatter block is not terminated")]
    UnterminatedFrontmatter,
    /// YAML frontmatter is invalid or lacks a required key
    #[error("Invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML frontmatter is invalid or lacks a required key
    #[error("Invalid TOML frontmatter: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Post {
    /// Create a post from already parsed parts, computing its reading time.
    pub fn new(
        slug: impl Into<String>,
        frontmatter: Frontmatter,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            slug: slug.into(),
            reading_time: reading_time(&content),
            frontmatter,
            content,
        }
    }

    /// Parse a post from the full text of its file.
    ///
    /// A missing `description` is filled with the text of the body's first paragraph.
    ///
    /// # Errors
    /// Returns `FailToParsePost` if the header is missing, unterminated or invalid.
    pub fn parse(slug: impl Into<String>, source: &str) -> Result<Self, FailToParsePost> {
        let (header, body) = split(source)?;
        let mut frontmatter = match header {
            Header::Yaml(yaml) => serde_yaml::from_str::<Frontmatter>(yaml)?,
            Header::Toml(toml) => parse_toml(toml)?,
        };
        if frontmatter.description.trim().is_empty() {
            frontmatter.description = first_paragraph(body);
        }
        Ok(Self::new(slug, frontmatter, body))
    }

    /// Slug of the post, the stem of its file name
    #[must_use]
    pub const fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Metadata header of the post
    #[must_use]
    pub const fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Title of the post
    #[must_use]
    pub const fn title(&self) -> &str {
        self.frontmatter.title()
    }

    /// Publication date as written in the frontmatter
    #[must_use]
    pub const fn date(&self) -> &str {
        self.frontmatter.date()
    }

    /// Raw markdown body, unrendered.
    #[must_use]
    pub const fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Estimated minutes to read the body.
    #[must_use]
    pub const fn reading_time(&self) -> f64 {
        self.reading_time
    }

    /// Reading time rounded for display, e.g. "4 min read".
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reading_minutes(&self) -> u32 {
        self.reading_time.round() as u32
    }

    /// Publication date in long English form, e.g. "March 1, 2024".
    ///
    /// Falls back to the raw `date` string when it is not a calendar date.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        let format = format_description!("[month repr:long] [day padding:none], [year]");
        self.frontmatter
            .published()
            .and_then(|date| date.format(format).ok())
            .unwrap_or_else(|| self.frontmatter.date.clone())
    }
}

/// Estimate reading time in minutes at [`WORDS_PER_MINUTE`].
///
/// Empty text reads in zero minutes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reading_time(text: &str) -> f64 {
    let words = text.unicode_words().count();
    words as f64 / WORDS_PER_MINUTE
}

enum Header<'a> {
    Yaml(&'a str),
    Toml(&'a str),
}

fn split(source: &str) -> Result<(Header<'_>, &str), FailToParsePost> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');
    let opening = lines.next().ok_or(FailToParsePost::MissingFrontmatter)?;
    let delimiter = match opening.trim_end() {
        "---" => "---",
        "+++" => "+++",
        _ => return Err(FailToParsePost::MissingFrontmatter),
    };

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == delimiter {
            let header = &source[start..offset];
            let body = &source[offset + line.len()..];
            let header = if delimiter == "---" {
                Header::Yaml(header)
            } else {
                Header::Toml(header)
            };
            return Ok((header, body));
        }
        offset += line.len();
    }
    Err(FailToParsePost::UnterminatedFrontmatter)
}

// TOML dates are native datetimes; frontmatter keeps them as strings.
fn parse_toml(header: &str) -> Result<Frontmatter, toml::de::Error> {
    let mut table: toml::Table = toml::from_str(header)?;
    if let Some(toml::Value::Datetime(date)) = table.get("date") {
        let date = date.to_string();
        table.insert("date".to_string(), toml::Value::String(date));
    }
    toml::Value::Table(table).try_into()
}

fn first_paragraph(markdown: &str) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) if in_paragraph => break,
            Event::Text(fragment) | Event::Code(fragment) if in_paragraph => {
                text.push_str(&fragment);
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML_POST: &str = "---
title: Reverse Image Search Guide
description: Everything about searching by image.
date: 2024-03-01
category: pillar
keywords:
  - reverse image search
  - tineye
author: Jane
---
# Reverse Image Search Guide

Searching by image is easy.
";

    #[test]
    fn parses_yaml_frontmatter_and_body() {
        let post = Post::parse("guide", YAML_POST).unwrap();
        assert_eq!(post.slug(), "guide");
        assert_eq!(post.title(), "Reverse Image Search Guide");
        assert_eq!(post.date(), "2024-03-01");
        assert_eq!(post.frontmatter().category(), Category::Pillar);
        assert_eq!(
            post.frontmatter().keywords(),
            ["reverse image search", "tineye"]
        );
        assert_eq!(post.frontmatter().author(), Some("Jane"));
        assert_eq!(post.frontmatter().image(), None);
        assert!(post.content().starts_with("# Reverse Image Search Guide"));
        assert!(post.reading_time() > 0.0);
    }

    #[test]
    fn parses_toml_frontmatter_with_native_date() {
        let source = "+++
title = \"Find Stock Photos\"
date = 2024-02-10
category = \"use-case\"
+++
Stock photo sites watermark their previews.
";
        let post = Post::parse("stock", source).unwrap();
        assert_eq!(post.date(), "2024-02-10");
        assert_eq!(post.frontmatter().category(), Category::UseCase);
        assert!(post.frontmatter().keywords().is_empty());
        assert_eq!(
            post.frontmatter().description(),
            "Stock photo sites watermark their previews."
        );
    }

    #[test]
    fn missing_description_uses_first_paragraph() {
        let source = "---
title: Hello
date: 2024-01-01
category: how-to
---
# Hello

First *paragraph*
continues here.

Second paragraph.
";
        let post = Post::parse("hello", source).unwrap();
        assert_eq!(
            post.frontmatter().description(),
            "First paragraph continues here."
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(matches!(
            Post::parse("x", "no header here"),
            Err(FailToParsePost::MissingFrontmatter)
        ));
        assert!(matches!(
            Post::parse("x", "---\ntitle: Open\n"),
            Err(FailToParsePost::UnterminatedFrontmatter)
        ));
        assert!(matches!(
            Post::parse("x", "---\ntitle: No date\ncategory: pillar\n---\nbody"),
            Err(FailToParsePost::Yaml(_))
        ));
        assert!(matches!(
            Post::parse("x", "---\ntitle: T\ndate: 2024-01-01\ncategory: news\n---\n"),
            Err(FailToParsePost::Yaml(_))
        ));
        assert!(matches!(
            Post::parse("x", "+++\ntitle = \n+++\n"),
            Err(FailToParsePost::Toml(_))
        ));
    }

    #[test]
    fn reading_time_is_zero_for_empty_body() {
        assert!(reading_time("").abs() < f64::EPSILON);
        assert!(reading_time("  \n\t ").abs() < f64::EPSILON);
        let words = "word ".repeat(400);
        assert!((reading_time(&words) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn formats_publication_date() {
        let post = Post::new(
            "a",
            Frontmatter::new("A", "2024-03-01T10:00:00Z", Category::HowTo),
            "",
        );
        assert_eq!(post.formatted_date(), "March 1, 2024");
        let undated = Post::new("b", Frontmatter::new("B", "soon", Category::HowTo), "");
        assert_eq!(undated.formatted_date(), "soon");
    }

    #[test]
    fn yaml_block_round_trips_through_parse() {
        let mut frontmatter = Frontmatter::new("New Post", "2024-05-05", Category::HowTo);
        frontmatter.add_keyword("tips");
        let source = format!("{}\nBody text.\n", frontmatter.to_yaml_block().unwrap());
        let post = Post::parse("new-post", &source).unwrap();
        assert_eq!(post.frontmatter().keywords(), ["tips"]);
        assert_eq!(post.frontmatter().description(), "Body text.");
    }

    #[test]
    fn category_parses_wire_names() {
        assert_eq!("how-to".parse::<Category>().unwrap(), Category::HowTo);
        assert!("howto".parse::<Category>().is_err());
        assert_eq!(Category::UseCase.to_string(), "use-case");
    }
}
