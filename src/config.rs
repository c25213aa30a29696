use std::{
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use pictopic_core::ProviderCatalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::content::{DEFAULT_EXTENSION, FsContentStore};

/// Name of the site configuration file.
pub const CONFIG_FILE: &str = "Pictopic.toml";

/// Environment variable that overrides `site_url`.
pub const SITE_URL_ENV: &str = "PICTOPIC_SITE_URL";

#[derive(Debug, Error)]
pub enum FailToLoadConfig {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid site URL in PICTOPIC_SITE_URL: {0}")]
    SiteUrl(#[from] url::ParseError),
}

/// Site configuration, read from `Pictopic.toml`.
///
/// ```toml
/// title = "PictoPicSearch"
/// site_url = "https://pictopicsearch.com"
/// content_dir = "content/posts"
/// extensions = ["mdx"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    title: String,
    site_url: Url,
    content_dir: PathBuf,
    extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    providers: Option<ProviderCatalog>,
    #[serde(skip)]
    root: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "PictoPicSearch".to_string(),
            // Literal URL, parsing cannot fail.
            site_url: Url::parse("https://pictopicsearch.com").unwrap(),
            content_dir: PathBuf::from("content").join("posts"),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            providers: None,
            root: PathBuf::new(),
        }
    }
}

impl SiteConfig {
    /// Load `Pictopic.toml` from `root`, then apply environment overrides.
    ///
    /// A missing file yields the defaults. Relative paths resolve against `root`.
    ///
    /// # Errors
    /// Returns `FailToLoadConfig` if the file cannot be read or parsed, or if the
    /// site URL override is not a URL.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, FailToLoadConfig> {
        Self::from_file(root.as_ref().join(CONFIG_FILE))
    }

    /// Load a config file, treating a missing file as the defaults.
    ///
    /// # Errors
    /// See [`SiteConfig::open`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FailToLoadConfig> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.apply_env(env::var(SITE_URL_ENV).ok().as_deref())?;
        Ok(config)
    }

    /// Parse a config from TOML text without touching the environment.
    ///
    /// # Errors
    /// Returns `FailToLoadConfig::Toml` if the text is not a valid config.
    pub fn from_toml(content: &str) -> Result<Self, FailToLoadConfig> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self, site_url: Option<&str>) -> Result<(), FailToLoadConfig> {
        if let Some(site_url) = site_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.site_url = Url::parse(site_url)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Site URL without a trailing slash, ready to have paths appended.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.site_url.as_str().trim_end_matches('/')
    }

    /// Directory the configuration was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    /// The provider catalog, either configured or built in.
    #[must_use]
    pub fn providers(&self) -> &ProviderCatalog {
        self.providers
            .as_ref()
            .unwrap_or_else(|| ProviderCatalog::builtin())
    }

    /// A filesystem content store over the configured directory.
    #[must_use]
    pub fn content_store(&self) -> FsContentStore {
        FsContentStore::new(self.content_dir()).with_extensions(self.extensions.iter().cloned())
    }

    /// Export the configuration as TOML.
    #[must_use]
    pub fn export(&self) -> String {
        // Serialization for config never fail, so that we can use `unwrap`
        toml::to_string_pretty(&self).unwrap()
    }
}
