use slug::slugify;
use std::{fmt, str::FromStr};

#[derive(Debug, thiserror::Error)]
pub enum InvalidSlug {
    #[error("post slug is empty")]
    Empty,
    #[error("post slug `{0}` must be a single file name")]
    NotAFileName(String),
    #[error("post slug `{0}` has leading or trailing whitespace")]
    SurroundingWhitespace(String),
}

/// Slug of a post, which is also the stem of its file name.
///
/// A slug never contains path separators and never starts with a dot, so
/// joining it onto the content directory cannot escape that directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostSlug(String);

impl PostSlug {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Derive a slug from a title, e.g. "Find Image Sources!" becomes `find-image-sources`.
    ///
    /// # Errors
    /// Returns `InvalidSlug::Empty` if the title has no sluggable characters.
    pub fn from_title(title: &str) -> Result<Self, InvalidSlug> {
        let generated = slugify(title.trim());
        Self::from_str(&generated)
    }
}

impl AsRef<str> for PostSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PostSlug {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PostSlug {
    type Err = InvalidSlug;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err(InvalidSlug::Empty);
        }

        if value != value.trim() {
            return Err(InvalidSlug::SurroundingWhitespace(value.to_string()));
        }

        if value.starts_with('.') || value.contains(['/', '\\', '\0']) {
            return Err(InvalidSlug::NotAFileName(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}
