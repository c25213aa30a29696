use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use pictopic::{
    Category, ContentStore, FsContentStore, Post,
    content::{Diagnostics, FailToCreatePost, FailToLoadPost},
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[derive(Debug, Default)]
struct Recorder {
    skipped: Mutex<Vec<PathBuf>>,
}

impl Recorder {
    fn skipped(&self) -> Vec<PathBuf> {
        self.skipped.lock().unwrap().clone()
    }
}

impl Diagnostics for Recorder {
    fn skipped_post(&self, path: &Path, _error: &FailToLoadPost) {
        self.skipped.lock().unwrap().push(path.to_path_buf());
    }

    fn unreadable_directory(&self, _path: &Path, _error: &io::Error) {}
}

fn write_post(dir: &Path, file: &str, date: &str, keywords: &[&str]) {
    let keywords = keywords.join(", ");
    let source = format!(
        "---\ntitle: {file}\ndate: \"{date}\"\ncategory: how-to\n\
         keywords: [{keywords}]\n---\nSome text for {file}.\n"
    );
    fs::write(dir.join(file), source).unwrap();
}

fn slugs(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(Post::slug).collect()
}

fn fixture() -> (TempDir, FsContentStore, Arc<Recorder>) {
    let dir = tempfile::tempdir().unwrap();
    write_post(dir.path(), "alpha.mdx", "2024-01-10", &["tineye", "sources"]);
    write_post(dir.path(), "bravo.mdx", "2024-03-02", &["google"]);
    write_post(dir.path(), "charlie.mdx", "2024-02-15", &["sources"]);
    write_post(dir.path(), "delta.mdx", "2023-12-31", &["bing"]);
    let recorder = Arc::new(Recorder::default());
    let store = FsContentStore::new(dir.path()).with_diagnostics(recorder.clone());
    (dir, store, recorder)
}

#[test]
fn lists_posts_newest_first() {
    let (_dir, store, recorder) = fixture();
    let posts = store.list();
    assert_eq!(slugs(&posts), ["bravo", "charlie", "alpha", "delta"]);
    assert!(posts.windows(2).all(|pair| pair[0].date() >= pair[1].date()));
    assert!(recorder.skipped().is_empty());
}

#[test]
fn missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsContentStore::new(dir.path().join("nope"));
    assert!(store.list().is_empty());
    assert!(store.get_by_slug("anything").is_none());
    assert!(store.related("anything", 2).is_empty());
}

#[test]
fn malformed_files_are_skipped_and_reported() {
    let (dir, store, recorder) = fixture();
    fs::write(dir.path().join("broken.mdx"), "no frontmatter at all").unwrap();
    fs::write(
        dir.path().join("undated.mdx"),
        "---\ntitle: Undated\ncategory: pillar\n---\nbody\n",
    )
    .unwrap();

    assert_eq!(store.list().len(), 4);
    let mut skipped = recorder.skipped();
    skipped.sort();
    assert_eq!(
        skipped,
        [dir.path().join("broken.mdx"), dir.path().join("undated.mdx")]
    );
    assert!(store.get_by_slug("broken").is_none());
}

#[test]
fn other_files_are_ignored() {
    let (dir, store, recorder) = fixture();
    fs::write(dir.path().join("notes.txt"), "not a post").unwrap();
    fs::create_dir(dir.path().join("drafts.mdx")).unwrap();
    assert_eq!(store.list().len(), 4);
    assert!(recorder.skipped().is_empty());
}

#[test]
fn lookup_by_slug() {
    let (_dir, store, _recorder) = fixture();
    let post = store.get_by_slug("charlie").unwrap();
    assert_eq!(post.date(), "2024-02-15");
    assert_eq!(post.frontmatter().description(), "Some text for charlie.mdx.");
    assert!(store.get_by_slug("echo").is_none());
    assert!(store.get_by_slug("").is_none());
}

#[test]
fn lookup_matches_the_slug_exactly() {
    let (_dir, store, _recorder) = fixture();
    assert!(store.get_by_slug(" charlie ").is_none());
    assert!(store.get_by_slug("charlie\n").is_none());
    assert_eq!(store.get_by_slug("charlie").unwrap().slug(), "charlie");
}

#[test]
fn files_with_invalid_slugs_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_post(dir.path(), "guide .mdx", "2024-01-01", &[]);
    let recorder = Arc::new(Recorder::default());
    let store = FsContentStore::new(dir.path()).with_diagnostics(recorder.clone());

    assert!(store.list().is_empty());
    assert_eq!(recorder.skipped(), [dir.path().join("guide .mdx")]);
    assert!(store.get_by_slug("guide ").is_none());
    assert!(store.get_by_slug("guide").is_none());
}

#[test]
fn lookup_cannot_escape_the_content_directory() {
    let root = tempfile::tempdir().unwrap();
    let posts = root.path().join("posts");
    fs::create_dir(&posts).unwrap();
    write_post(root.path(), "secret.mdx", "2024-01-01", &[]);

    let store = FsContentStore::new(&posts);
    assert!(store.get_by_slug("../secret").is_none());
    assert!(store.get_by_slug("..").is_none());
    assert!(store.get_by_slug(".hidden").is_none());
}

#[test]
fn related_posts_share_keywords_first() {
    let (_dir, store, _recorder) = fixture();
    assert_eq!(slugs(&store.related("alpha", 2)), ["charlie", "bravo"]);
    assert_eq!(slugs(&store.related("alpha", 1)), ["charlie"]);
    assert_eq!(slugs(&store.related("unknown", 2)), ["bravo", "charlie"]);

    for post in store.list() {
        let related = store.related(post.slug(), 3);
        assert!(related.len() <= 3);
        assert!(related.iter().all(|other| other.slug() != post.slug()));
    }
}

#[test]
fn extensions_control_which_files_are_posts() {
    let (dir, store, _recorder) = fixture();
    write_post(dir.path(), "echo.md", "2025-01-01", &[]);
    assert_eq!(store.list().len(), 4);

    let store = store.with_extensions(["mdx", "md"]);
    assert_eq!(store.list()[0].slug(), "echo");
    assert!(store.get_by_slug("echo").is_some());
}

#[test]
fn scaffolds_a_new_post() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsContentStore::new(dir.path().join("posts"));

    let post = store
        .create_post("Find Image Sources!", Category::UseCase)
        .unwrap();
    assert_eq!(post.slug(), "find-image-sources");
    assert_eq!(post.frontmatter().category(), Category::UseCase);
    assert!(post.frontmatter().published().is_some());
    assert!(dir.path().join("posts/find-image-sources.mdx").is_file());

    let loaded = store.get_by_slug("find-image-sources").unwrap();
    assert_eq!(loaded.title(), "Find Image Sources!");

    assert!(matches!(
        store.create_post("Find image sources", Category::HowTo),
        Err(FailToCreatePost::AlreadyExists(_))
    ));
    assert!(matches!(
        store.create_post("!!!", Category::HowTo),
        Err(FailToCreatePost::InvalidSlug(_))
    ));
}
