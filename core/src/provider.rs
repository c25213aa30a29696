//! Reverse image search providers and their "search by image" URLs.

use std::{collections::BTreeSet, sync::LazyLock};

use serde::{Deserialize, Serialize};

/// An external reverse image search service.
///
/// Providers are only ever linked to. Nothing in this crate talks to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    id: String,
    name: String,
    display_name: String,
    description: String,
    url: String,
    #[serde(default)]
    pros: Vec<String>,
    #[serde(default)]
    cons: Vec<String>,
    #[serde(default)]
    supported_formats: BTreeSet<String>,
    #[serde(default = "default_free")]
    free: bool,
    #[serde(default)]
    requires_account: bool,
}

const fn default_free() -> bool {
    true
}

impl Provider {
    /// Create a provider with the given identity and homepage.
    ///
    /// Pros, cons and formats start empty; the provider is free and needs no account.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
            url: url.into(),
            pros: Vec::new(),
            cons: Vec::new(),
            supported_formats: BTreeSet::new(),
            free: true,
            requires_account: false,
        }
    }

    #[must_use]
    fn with_pros(mut self, pros: &[&str]) -> Self {
        self.pros = pros.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    fn with_cons(mut self, cons: &[&str]) -> Self {
        self.cons = cons.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    fn with_formats(mut self, formats: &[&str]) -> Self {
        self.supported_formats = formats.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    fn requiring_account(mut self) -> Self {
        self.requires_account = true;
        self
    }

    /// Stable identifier, e.g. `tineye`.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Full product name, e.g. "Pinterest Visual Search".
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Short name shown in lists and buttons.
    #[must_use]
    pub const fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// One-sentence summary of the service.
    #[must_use]
    pub const fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Canonical homepage of the provider.
    #[must_use]
    pub const fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Strengths, in display order.
    #[must_use]
    pub fn pros(&self) -> &[String] {
        &self.pros
    }

    /// Weaknesses, in display order.
    #[must_use]
    pub fn cons(&self) -> &[String] {
        &self.cons
    }

    /// Accepted image extensions, lower-case without the dot.
    #[must_use]
    pub const fn supported_formats(&self) -> &BTreeSet<String> {
        &self.supported_formats
    }

    /// Whether the provider accepts images with the given extension.
    ///
    /// The comparison ignores case and a leading dot, so `".JPG"` matches `jpg`.
    #[must_use]
    pub fn supports_format(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.supported_formats
            .iter()
            .any(|format| format.eq_ignore_ascii_case(extension))
    }

    /// Whether searching is free of charge.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.free
    }

    /// Whether searching needs a signed-in account.
    #[must_use]
    pub const fn requires_account(&self) -> bool {
        self.requires_account
    }

    /// Build the URL that searches this provider for `encoded_image_url`.
    ///
    /// Providers without a known template fall back to their homepage.
    fn search_url(&self, encoded_image_url: &str) -> String {
        match self.id.as_str() {
            "google" => {
                format!("https://images.google.com/searchbyimage?image_url={encoded_image_url}")
            }
            "bing" => format!(
                "https://www.bing.com/images/search?view=detailv2&iss=sbi&form=SBIVSP&sbisrc=UrlPaste&q=imgurl:{encoded_image_url}"
            ),
            "yandex" => {
                format!("https://yandex.com/images/search?rpt=imageview&url={encoded_image_url}")
            }
            "tineye" => format!("https://tineye.com/search?url={encoded_image_url}"),
            "pinterest" => {
                format!("https://www.pinterest.com/search/pins/?q={encoded_image_url}&rs=typed")
            }
            _ => self.url.clone(),
        }
    }
}

/// An immutable, ordered table of providers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
}

static BUILTIN: LazyLock<ProviderCatalog> = LazyLock::new(|| {
    ProviderCatalog::new(vec![
        Provider::new(
            "google",
            "Google Images",
            "Google Images",
            "Google's reverse image search powered by their visual search technology.",
            "https://images.google.com",
        )
        .with_pros(&["Largest image database", "Fast results", "Multiple result types"])
        .with_cons(&["May require account for some features", "Limited advanced filters"])
        .with_formats(&["jpg", "png", "gif", "webp"]),
        Provider::new(
            "bing",
            "Bing Visual Search",
            "Bing Visual Search",
            "Microsoft's visual search engine with reverse image lookup capabilities.",
            "https://www.bing.com/images",
        )
        .with_pros(&["Good image matching", "Integrated with Bing search", "Free to use"])
        .with_cons(&["Smaller database than Google", "Fewer advanced options"])
        .with_formats(&["jpg", "png", "gif", "webp"]),
        Provider::new(
            "yandex",
            "Yandex Images",
            "Yandex Images",
            "Russian search engine with powerful reverse image search capabilities.",
            "https://yandex.com/images",
        )
        .with_pros(&["Excellent image matching", "Works well with faces", "Free"])
        .with_cons(&["Interface in Russian", "Less known globally"])
        .with_formats(&["jpg", "png", "gif", "webp"]),
        Provider::new(
            "tineye",
            "TinEye",
            "TinEye",
            "Specialized reverse image search engine focused on finding image sources.",
            "https://tineye.com",
        )
        .with_pros(&["Great for finding sources", "API available", "Detailed metadata"])
        .with_cons(&["Smaller database", "Some features require account"])
        .with_formats(&["jpg", "png", "gif", "webp"]),
        Provider::new(
            "pinterest",
            "Pinterest Visual Search",
            "Pinterest",
            "Visual discovery platform with reverse image search for finding similar pins.",
            "https://www.pinterest.com",
        )
        .with_pros(&["Great for design inspiration", "Large collection", "Visual similarity"])
        .with_cons(&["Requires account", "Focused on Pinterest content"])
        .with_formats(&["jpg", "png", "webp"])
        .requiring_account(),
    ])
});

impl ProviderCatalog {
    /// Create a catalog from an ordered list of providers.
    ///
    /// If two entries share an id, lookups resolve to the first one.
    #[must_use]
    pub const fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    /// The five providers the site ships with.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Providers in catalog order.
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Iterate over providers in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the catalog has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Find a provider by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    /// Build the "search by this image" URL for a provider.
    ///
    /// The image URL is percent-encoded as a single query value. An id with no
    /// template yields the provider's homepage, and an id missing from the
    /// catalog yields an empty string. The result is meant to be used as-is.
    #[must_use]
    pub fn search_url(&self, provider_id: &str, image_url: &str) -> String {
        let Some(provider) = self.get(provider_id) else {
            return String::new();
        };
        let encoded = urlencoding::encode(image_url);
        provider.search_url(&encoded)
    }
}

impl<'a> IntoIterator for &'a ProviderCatalog {
    type Item = &'a Provider;
    type IntoIter = std::slice::Iter<'a, Provider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

/// Look up a built-in provider by id.
#[must_use]
pub fn get_provider_by_id(id: &str) -> Option<&'static Provider> {
    ProviderCatalog::builtin().get(id)
}

/// Build a built-in provider's search URL for `image_url`.
///
/// See [`ProviderCatalog::search_url`].
#[must_use]
pub fn generate_provider_search_url(provider_id: &str, image_url: &str) -> String {
    ProviderCatalog::builtin().search_url(provider_id, image_url)
}
