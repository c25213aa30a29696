use std::fs;

use pictopic::{
    ContentStore, FsContentStore, Post, generate_keywords, generate_provider_search_url,
};
use tempfile::TempDir;

fn main() {
    divan::main();
}

const DESCRIPTION: &str = "A vintage red car parked over a cobblestone street at dusk, \
    with neon signs reflecting in puddles and a couple walking under an umbrella";

fn post_source(index: usize) -> String {
    format!(
        "---\ntitle: Post {index}\ndate: \"2024-01-{:02}\"\ncategory: how-to\n\
         keywords: [topic{}]\n---\n{}\n",
        index % 28 + 1,
        index % 7,
        "Reverse image search helps you find where a picture came from. ".repeat(40)
    )
}

fn populated_store(posts: usize) -> (TempDir, FsContentStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    for index in 0..posts {
        fs::write(dir.path().join(format!("post-{index}.mdx")), post_source(index))
            .expect("write post");
    }
    let store = FsContentStore::new(dir.path());
    (dir, store)
}

#[divan::bench]
fn keywords() -> Vec<String> {
    generate_keywords(divan::black_box(DESCRIPTION)).unwrap_or_default()
}

#[divan::bench]
fn search_url() -> String {
    generate_provider_search_url(
        divan::black_box("google"),
        divan::black_box("https://example.com/photos/a b.jpg?size=large"),
    )
}

#[divan::bench]
fn parse_post(bencher: divan::Bencher) {
    let source = post_source(3);
    bencher.bench(|| Post::parse("post-3", divan::black_box(&source)).ok());
}

#[divan::bench(args = [10, 100])]
fn list_posts(bencher: divan::Bencher, posts: usize) {
    let (_dir, store) = populated_store(posts);
    bencher.bench(|| store.list());
}

#[divan::bench(args = [10, 100])]
fn related_posts(bencher: divan::Bencher, posts: usize) {
    let (_dir, store) = populated_store(posts);
    bencher.bench(|| store.related("post-3", 2));
}
