//! The fixed catalog of use-case landing pages.

use serde::Serialize;

/// A use-case page, e.g. "Find the Original Source of an Image".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UseCase {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
}

impl UseCase {
    /// URL segment under `/use-cases/`.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        self.slug
    }

    /// Page heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Summary shown on the use-case index.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Search keywords the page targets.
    #[must_use]
    pub const fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Whether any of `keywords` equals one of this use case's keywords.
    pub fn shares_keyword<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords
            .iter()
            .any(|keyword| self.keywords.contains(&keyword.as_ref()))
    }
}

macro_rules! use_case {
    ($slug:literal, $title:literal, $description:literal, [$($keyword:literal),* $(,)?]) => {
        UseCase {
            slug: $slug,
            title: $title,
            description: $description,
            keywords: &[$($keyword),*],
        }
    };
}

static USE_CASES: &[UseCase] = &[
    use_case!(
        "find-image-origin",
        "Find the Original Source of an Image",
        "Learn how to trace images back to their original source using reverse image search techniques.",
        ["image source", "origin", "attribution", "pictopic search"]
    ),
    use_case!(
        "find-higher-resolution",
        "Find Higher Resolution Versions",
        "Discover how to locate higher quality and resolution versions of images you find online.",
        ["high resolution", "HD images", "quality", "pictopic search"]
    ),
    use_case!(
        "find-stock-photo-source",
        "Find Stock Photo Sources",
        "Identify which stock photo site an image comes from and find licensing information.",
        ["stock photos", "licensing", "copyright", "pictopic search"]
    ),
    use_case!(
        "verify-image-authenticity",
        "Verify Image Authenticity",
        "Use reverse image search to verify if images are authentic or have been manipulated.",
        ["verification", "authenticity", "fact-checking", "pictopic search"]
    ),
    use_case!(
        "find-similar-designs",
        "Find Similar Designs and Inspiration",
        "Discover similar designs, artwork, and visual inspiration using image search.",
        ["design", "inspiration", "similar images", "pictopic search"]
    ),
    use_case!(
        "identify-products",
        "Identify Products in Images",
        "Find products, brands, and shopping links from images using visual search.",
        ["products", "shopping", "identification", "pictopic search"]
    ),
    use_case!(
        "find-person-online",
        "Find People Online",
        "Learn how to find where a person's photo appears online using reverse image search.",
        ["people search", "faces", "social media", "pictopic search"]
    ),
    use_case!(
        "check-copyright-violations",
        "Check for Copyright Violations",
        "Use reverse image search to check if your images are being used without permission.",
        ["copyright", "violations", "protection", "pictopic search"]
    ),
];

/// All use cases, in display order.
#[must_use]
pub fn use_cases() -> &'static [UseCase] {
    USE_CASES
}

/// Find a use case by its slug.
#[must_use]
pub fn get_use_case_by_slug(slug: &str) -> Option<&'static UseCase> {
    USE_CASES.iter().find(|use_case| use_case.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = use_cases().iter().map(UseCase::slug).collect();
        let total = slugs.len();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), total);
        assert_eq!(total, 8);
    }

    #[test]
    fn lookup_by_slug() {
        let use_case = get_use_case_by_slug("identify-products").unwrap();
        assert_eq!(use_case.title(), "Identify Products in Images");
        assert!(get_use_case_by_slug("identify-product").is_none());
    }

    #[test]
    fn keyword_overlap_is_exact() {
        let use_case = get_use_case_by_slug("check-copyright-violations").unwrap();
        assert!(use_case.shares_keyword(&["copyright"]));
        assert!(!use_case.shares_keyword(&["Copyright"]));
        assert!(!use_case.shares_keyword::<&str>(&[]));
    }
}
