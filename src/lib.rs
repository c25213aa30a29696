//! PictoPicSearch: reverse image search links, blog content and keyword tools.
//!
//! The pure data model lives in [`pictopic_core`] and is re-exported here.

pub mod config;
pub mod content;
pub mod keywords;
pub mod links;
pub mod seo;
pub mod slug;

pub use pictopic_core::{
    Category, Frontmatter, Post, Provider, ProviderCatalog, UseCase, generate_provider_search_url,
    get_provider_by_id, get_use_case_by_slug, post, provider, use_case, use_cases,
};

pub use config::SiteConfig;
pub use content::{ContentStore, FsContentStore, MemoryContentStore};
pub use keywords::generate_keywords;
pub use links::plan_search_links;
