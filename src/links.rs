//! Search links for one image across several providers.

use pictopic_core::ProviderCatalog;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// A provider's search page for one image, ready to open in a new tab.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchLink {
    pub provider_id: String,
    pub display_name: String,
    pub url: String,
}

/// Why a search request was refused. The messages are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSearchRequest {
    #[error("Please enter a valid image URL")]
    InvalidImageUrl,
    #[error("Please select at least one provider")]
    NoProviderSelected,
}

/// Build one search link per selected provider, in selection order.
///
/// Providers missing from `catalog` are skipped.
///
/// # Errors
/// Returns `InvalidSearchRequest::InvalidImageUrl` if `image_url` is not an absolute
/// URL, or `InvalidSearchRequest::NoProviderSelected` if `provider_ids` is empty.
pub fn plan_search_links<S: AsRef<str>>(
    catalog: &ProviderCatalog,
    image_url: &str,
    provider_ids: &[S],
) -> Result<Vec<SearchLink>, InvalidSearchRequest> {
    let image_url = image_url.trim();
    if image_url.is_empty() || Url::parse(image_url).is_err() {
        return Err(InvalidSearchRequest::InvalidImageUrl);
    }
    if provider_ids.is_empty() {
        return Err(InvalidSearchRequest::NoProviderSelected);
    }

    Ok(provider_ids
        .iter()
        .filter_map(|id| {
            let provider = catalog.get(id.as_ref())?;
            let url = catalog.search_url(provider.id(), image_url);
            (!url.is_empty()).then(|| SearchLink {
                provider_id: provider.id().to_string(),
                display_name: provider.display_name().to_string(),
                url,
            })
        })
        .collect())
}
