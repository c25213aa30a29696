use std::io::{self, Write};

use clap::Subcommand;
use color_eyre::{
    Section,
    eyre::{self, eyre},
};
use pictopic::{
    Category, ContentStore, Post, SiteConfig,
    content::DEFAULT_RELATED_LIMIT,
    seo::{ArticleSchema, article_json_ld, organization_json_ld, website_json_ld},
};
use tracing::info;

#[derive(Subcommand)]
pub enum PostCommands {
    /// List posts, newest first.
    List,

    /// Show one post with its metadata.
    Show { slug: String },

    /// List posts related to a post.
    Related {
        slug: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },

    /// Create a new post skeleton.
    New {
        title: String,
        /// One of `pillar`, `how-to`, `use-case`
        #[arg(long, default_value = "how-to")]
        category: Category,
    },
}

#[derive(Subcommand)]
pub enum JsonLdCommands {
    /// `Article` object of a post.
    Article { slug: String },
    /// `WebSite` object of the site.
    Website,
    /// `Organization` object of the site.
    Organization,
}

pub fn handle_post_command(
    config: &SiteConfig,
    command: PostCommands,
    emit_json: bool,
) -> eyre::Result<()> {
    let store = config.content_store();
    match command {
        PostCommands::List => print_posts(&store.list(), emit_json),
        PostCommands::Show { slug } => {
            let post = find_post(config, &slug)?;
            if emit_json {
                println!("{}", serde_json::to_string_pretty(&post)?);
                return Ok(());
            }
            let frontmatter = post.frontmatter();
            println!("{}", post.title());
            println!(
                "{} · {} · {} min read",
                post.formatted_date(),
                frontmatter.category(),
                post.reading_minutes()
            );
            if !frontmatter.description().is_empty() {
                println!("\n{}", frontmatter.description());
            }
            if !frontmatter.keywords().is_empty() {
                println!("\nKeywords: {}", frontmatter.keywords().join(", "));
            }
            Ok(())
        }
        PostCommands::Related { slug, limit } => {
            print_posts(&store.related(&slug, limit), emit_json)
        }
        PostCommands::New { title, category } => {
            let post = store
                .create_post(&title, category)
                .note("Can't create the post")?;
            info!(
                "Created post `{}` in {}",
                post.slug(),
                store.dir().display()
            );
            Ok(())
        }
    }
}

pub fn handle_json_ld_command(config: &SiteConfig, command: JsonLdCommands) -> eyre::Result<()> {
    let schema = match command {
        JsonLdCommands::Article { slug } => {
            let post = find_post(config, &slug)?;
            article_json_ld(config, &ArticleSchema::from_post(config, &post))
        }
        JsonLdCommands::Website => website_json_ld(config),
        JsonLdCommands::Organization => organization_json_ld(config),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn find_post(config: &SiteConfig, slug: &str) -> eyre::Result<Post> {
    config.content_store().get_by_slug(slug).ok_or_else(|| {
        eyre!("Post `{slug}` not found").note(format!(
            "Looked in {}",
            config.content_dir().display()
        ))
    })
}

fn print_posts(posts: &[Post], emit_json: bool) -> eyre::Result<()> {
    let mut stdout = io::stdout().lock();
    write_posts(&mut stdout, posts, emit_json)
}

fn write_posts(out: &mut impl Write, posts: &[Post], emit_json: bool) -> eyre::Result<()> {
    if emit_json {
        writeln!(out, "{}", serde_json::to_string_pretty(posts)?)?;
        return Ok(());
    }

    if posts.is_empty() {
        writeln!(out, "No posts found")?;
        return Ok(());
    }
    for post in posts {
        writeln!(
            out,
            "• {} [{}] {}",
            post.date(),
            post.frontmatter().category(),
            post.title()
        )?;
        writeln!(out, "  /blog/{}", post.slug())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn listing(config: &SiteConfig, emit_json: bool) -> String {
        let mut out = Vec::new();
        write_posts(&mut out, &config.content_store().list(), emit_json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn missing_content_directory_lists_no_posts() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::open(dir.path()).unwrap();
        assert!(!config.content_dir().exists());

        assert_eq!(listing(&config, false), "No posts found\n");
        assert_eq!(listing(&config, true).trim(), "[]");
    }

    #[test]
    fn lists_posts_with_their_blog_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::open(dir.path()).unwrap();
        fs::create_dir_all(config.content_dir()).unwrap();
        fs::write(
            config.content_dir().join("tineye-tips.mdx"),
            "---\ntitle: TinEye Tips\ndate: \"2024-04-01\"\ncategory: how-to\n---\nBody.\n",
        )
        .unwrap();

        assert_eq!(
            listing(&config, false),
            "• 2024-04-01 [how-to] TinEye Tips\n  /blog/tineye-tips\n"
        );
    }
}
