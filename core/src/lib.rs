//! Core data model of PictoPicSearch.
//!
//! This crate contains the pieces that never touch the filesystem: the provider
//! catalog with its search URL templates, the use-case catalog and the post model
//! (frontmatter, body and reading time).

pub mod post;
pub mod provider;
pub mod use_case;

pub use post::{Category, FailToParsePost, Frontmatter, Post};
pub use provider::{Provider, ProviderCatalog, generate_provider_search_url, get_provider_by_id};
pub use use_case::{UseCase, get_use_case_by_slug, use_cases};
