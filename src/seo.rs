//! Page metadata and schema.org structured data (JSON-LD).

use pictopic_core::Post;
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::SiteConfig;

/// Author credited when a post names none.
pub const DEFAULT_AUTHOR: &str = "PictoPicSearch Team";

/// Search and social metadata for one page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Absolute URL, or a path such as `/blog` resolved against the site URL.
    pub canonical: Option<String>,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
    pub noindex: bool,
}

impl PageMetadata {
    /// Canonical URL of the page.
    ///
    /// Relative paths are joined onto the site URL; without a canonical the site
    /// URL itself is used.
    #[must_use]
    pub fn canonical_url(&self, site: &SiteConfig) -> String {
        match self.canonical.as_deref() {
            Some(canonical) if canonical.contains("://") => canonical.to_string(),
            Some(path) => format!("{}/{}", site.base_url(), path.trim_start_matches('/')),
            None => site.base_url().to_string(),
        }
    }

    /// Keywords joined for a `<meta name="keywords">` tag.
    #[must_use]
    pub fn keywords_meta(&self) -> String {
        self.keywords.join(", ")
    }

    /// Metadata of a blog post page at `/blog/<slug>`.
    #[must_use]
    pub fn for_post(post: &Post) -> Self {
        let frontmatter = post.frontmatter();
        Self {
            title: frontmatter.title().to_string(),
            description: frontmatter.description().to_string(),
            canonical: Some(
                frontmatter
                    .canonical()
                    .map_or_else(|| format!("/blog/{}", post.slug()), ToString::to_string),
            ),
            keywords: frontmatter.keywords().to_vec(),
            og_image: frontmatter.image().map(ToString::to_string),
            noindex: false,
        }
    }
}

/// Input of [`article_json_ld`].
#[derive(Debug, Clone, Default)]
pub struct ArticleSchema<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: String,
    pub published: Option<&'a str>,
    pub modified: Option<&'a str>,
    pub image: Option<&'a str>,
    pub author: Option<&'a str>,
}

impl<'a> ArticleSchema<'a> {
    /// Describe a post published on `site`.
    #[must_use]
    pub fn from_post(site: &SiteConfig, post: &'a Post) -> Self {
        let frontmatter = post.frontmatter();
        Self {
            title: frontmatter.title(),
            description: frontmatter.description(),
            url: PageMetadata::for_post(post).canonical_url(site),
            published: Some(frontmatter.date()),
            modified: None,
            image: frontmatter.image(),
            author: frontmatter.author(),
        }
    }
}

/// `Article` object for a blog post.
#[must_use]
pub fn article_json_ld(site: &SiteConfig, article: &ArticleSchema<'_>) -> Value {
    let published = article.published.unwrap_or_default();
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": article.title,
        "description": article.description,
        "url": article.url,
        "datePublished": published,
        "dateModified": article.modified.unwrap_or(published),
        "author": {
            "@type": "Person",
            "name": article.author.unwrap_or(DEFAULT_AUTHOR),
        },
        "publisher": {
            "@type": "Organization",
            "name": site.title(),
            "logo": {
                "@type": "ImageObject",
                "url": format!("{}/logo.png", site.base_url()),
            },
        },
    });

    if let (Some(image), Some(object)) = (article.image, schema.as_object_mut()) {
        object.insert(
            "image".to_string(),
            json!({ "@type": "ImageObject", "url": image }),
        );
    }
    schema
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// `BreadcrumbList` with positions starting at 1.
#[must_use]
pub fn breadcrumb_json_ld(items: &[Breadcrumb]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item.name,
                "item": item.url,
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// A question and its answer on an FAQ section.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// `FAQPage` object.
#[must_use]
pub fn faq_json_ld(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// `WebSite` object with a sitelinks search box.
#[must_use]
pub fn website_json_ld(site: &SiteConfig) -> Value {
    let base = site.base_url();
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.title(),
        "url": base,
        "description": "Image search companion and reverse image search hub for pictopic search",
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{base}/search?q={{search_term_string}}"),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// `Organization` object.
#[must_use]
pub fn organization_json_ld(site: &SiteConfig) -> Value {
    let base = site.base_url();
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site.title(),
        "url": base,
        "logo": format!("{base}/logo.png"),
        "description": "Image search companion and reverse image search hub",
    })
}
