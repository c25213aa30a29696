//! Loading blog posts from a content store.
//!
//! The site only talks to [`ContentStore`]. [`FsContentStore`] reads one file per
//! post from a directory and re-reads it on every call; [`MemoryContentStore`] holds
//! a fixed set of posts.
//!
//! ```text
//! /content/posts
//! ├── reverse-image-search-guide.mdx   <--- slug `reverse-image-search-guide`
//! ├── find-image-source.mdx
//! ```

use std::{
    collections::BTreeSet,
    ffi::OsStr,
    fmt,
    fs::{self, OpenOptions},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use pictopic_core::{Category, FailToParsePost, Frontmatter, Post};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::slug::{InvalidSlug, PostSlug};

/// Number of related posts shown under an article.
pub const DEFAULT_RELATED_LIMIT: usize = 2;

/// Extension of post files when none is configured.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Errors that can occur when loading a single post file
#[derive(Debug, Error)]
pub enum FailToLoadPost {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] FailToParsePost),
    #[error("File name is not a valid slug: {0}")]
    InvalidSlug(#[from] InvalidSlug),
}

/// Receives the failures a store recovers from instead of returning.
pub trait Diagnostics: fmt::Debug + Send + Sync {
    /// A post file was skipped because it could not be read or parsed.
    fn skipped_post(&self, path: &Path, error: &FailToLoadPost);

    /// The content directory exists but cannot be listed.
    fn unreadable_directory(&self, path: &Path, error: &io::Error);
}

/// Reports recovered failures as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn skipped_post(&self, path: &Path, error: &FailToLoadPost) {
        warn!(path = %path.display(), %error, "Skipping post that failed to load");
    }

    fn unreadable_directory(&self, path: &Path, error: &io::Error) {
        warn!(path = %path.display(), %error, "Content directory cannot be read");
    }
}

/// A source of blog posts.
///
/// Lookups never fail: a missing post is `None` and a missing store is empty.
pub trait ContentStore {
    /// All posts, newest first.
    ///
    /// Posts are ordered by their `date` string. Posts sharing a date have no
    /// particular order.
    fn list(&self) -> Vec<Post>;

    /// The post with exactly this slug, if any.
    fn get_by_slug(&self, slug: &str) -> Option<Post>;

    /// Up to `limit` posts to show next to `slug`.
    ///
    /// Posts sharing a keyword with the source come first, in listing order, then
    /// the rest of the listing fills the remaining places. The source post itself
    /// is never included. If the source does not exist, the newest `limit` posts
    /// are returned.
    fn related(&self, slug: &str, limit: usize) -> Vec<Post> {
        let posts = self.list();
        let current = self.get_by_slug(slug);
        select_related(posts, current.as_ref(), limit)
    }
}

fn select_related(posts: Vec<Post>, current: Option<&Post>, limit: usize) -> Vec<Post> {
    let Some(current) = current else {
        return posts.into_iter().take(limit).collect();
    };

    let (mut related, rest): (Vec<Post>, Vec<Post>) = posts
        .into_iter()
        .filter(|post| post.slug() != current.slug())
        .partition(|post| {
            current
                .frontmatter()
                .shares_keyword_with(post.frontmatter())
        });

    related.truncate(limit);
    let missing = limit - related.len();
    related.extend(rest.into_iter().take(missing));
    related
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date().cmp(a.date()));
}

/// Posts stored as files in a single directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    dir: PathBuf,
    extensions: Vec<String>,
    diagnostics: Arc<dyn Diagnostics>,
}

#[derive(Debug, Error)]
pub enum FailToCreatePost {
    #[error("Cannot derive a slug from the title: {0}")]
    InvalidSlug(#[from] InvalidSlug),
    #[error("Post `{0}` already exists")]
    AlreadyExists(PostSlug),
    #[error("Cannot write frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
    #[error("Scaffolded post does not parse: {0}")]
    Parse(#[from] FailToParsePost),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FsContentStore {
    /// A store over `dir` that reads `.mdx` files and reports to `tracing`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the recognized file extensions, in lookup priority order.
    ///
    /// An empty list keeps the current extensions.
    #[must_use]
    pub fn with_extensions(
        mut self,
        extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(Into::into)
            .map(|extension| extension.trim_start_matches('.').to_string())
            .filter(|extension| !extension.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn recognizes(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|extension| self.extensions.iter().any(|known| known == extension))
    }

    fn path_for(&self, slug: &PostSlug) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|extension| self.dir.join(format!("{slug}.{extension}")))
            .find(|path| path.is_file())
    }

    fn load(slug: &PostSlug, path: &Path) -> Result<Post, FailToLoadPost> {
        let source = fs::read_to_string(path)?;
        Ok(Post::parse(slug.as_str(), &source)?)
    }

    fn slugs(&self) -> BTreeSet<PostSlug> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "Content directory does not exist");
                return BTreeSet::new();
            }
            Err(err) => {
                self.diagnostics.unreadable_directory(&self.dir, &err);
                return BTreeSet::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.recognizes(path))
            .filter_map(|path| {
                let stem = path.file_stem()?.to_string_lossy();
                PostSlug::from_str(&stem)
                    .map_err(FailToLoadPost::from)
                    .inspect_err(|err| self.diagnostics.skipped_post(&path, err))
                    .ok()
            })
            .collect()
    }

    /// Write a new post skeleton titled `title` and return it.
    ///
    /// The slug comes from the title, the date is today (UTC) and the author is the
    /// local user. The file uses the first configured extension.
    ///
    /// # Errors
    /// Returns `FailToCreatePost::AlreadyExists` if a post with the same slug exists,
    /// or another variant if the slug is empty or the file cannot be written.
    pub fn create_post(&self, title: &str, category: Category) -> Result<Post, FailToCreatePost> {
        let title = title.trim();
        let slug = PostSlug::from_title(title)?;
        if self.path_for(&slug).is_some() {
            return Err(FailToCreatePost::AlreadyExists(slug));
        }

        let today = OffsetDateTime::now_utc().date();
        let mut frontmatter = Frontmatter::new(title, today.to_string(), category);
        frontmatter.set_author(whoami::realname());
        let source = format!(
            "{}\n# {title}\n\nWrite something helpful here.\n",
            frontmatter.to_yaml_block()?
        );
        let post = Post::parse(slug.as_str(), &source)?;

        fs::create_dir_all(&self.dir)?;
        let extension = self
            .extensions
            .first()
            .map_or(DEFAULT_EXTENSION, String::as_str);
        let path = self.dir.join(format!("{slug}.{extension}"));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => FailToCreatePost::AlreadyExists(slug.clone()),
                _ => FailToCreatePost::Io(err),
            })?;
        file.write_all(source.as_bytes())?;

        Ok(post)
    }
}

impl ContentStore for FsContentStore {
    fn list(&self) -> Vec<Post> {
        debug!(dir = %self.dir.display(), "Listing posts");
        let mut posts: Vec<Post> = self
            .slugs()
            .into_iter()
            .filter_map(|slug| {
                let path = self.path_for(&slug)?;
                Self::load(&slug, &path)
                    .inspect_err(|err| self.diagnostics.skipped_post(&path, err))
                    .ok()
            })
            .collect();
        sort_newest_first(&mut posts);
        debug!(count = posts.len(), "Listed posts");
        posts
    }

    fn get_by_slug(&self, slug: &str) -> Option<Post> {
        let slug = PostSlug::from_str(slug)
            .inspect_err(|err| debug!(%err, "Rejected post slug"))
            .ok()?;
        let path = self.path_for(&slug)?;
        Self::load(&slug, &path)
            .inspect_err(|err| self.diagnostics.skipped_post(&path, err))
            .ok()
    }
}

/// Posts held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    posts: Vec<Post>,
}

impl MemoryContentStore {
    /// A store over `posts`. The first post wins when slugs collide.
    #[must_use]
    pub fn new(posts: Vec<Post>) -> Self {
        let mut seen = BTreeSet::new();
        let posts = posts
            .into_iter()
            .filter(|post| seen.insert(post.slug().to_string()))
            .collect();
        Self { posts }
    }
}

impl ContentStore for MemoryContentStore {
    fn list(&self) -> Vec<Post> {
        let mut posts = self.posts.clone();
        sort_newest_first(&mut posts);
        posts
    }

    fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|post| post.slug() == slug).cloned()
    }
}
