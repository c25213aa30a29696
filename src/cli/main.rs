use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use color_eyre::{
    Section,
    config::HookBuilder,
    eyre::{self, eyre},
};
use pictopic::{
    ProviderCatalog, SiteConfig, config::CONFIG_FILE, generate_keywords, plan_search_links,
    use_cases,
};
use posts::{JsonLdCommands, PostCommands, handle_json_ld_command, handle_post_command};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod posts;

#[derive(Parser)]
#[command(
    about = "Reverse image search links and blog content for PictoPicSearch",
    long_about = None
)]
#[command(version, author)]
struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the site configuration (default ./Pictopic.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the reverse image search providers.
    Providers,

    /// Show one provider in detail.
    Provider { id: String },

    /// Print the search URL of one provider for an image.
    SearchUrl { provider: String, image_url: String },

    /// Print search URLs for an image across several providers.
    Links {
        image_url: String,
        /// Providers to include (all when omitted)
        #[arg(short, long = "provider")]
        providers: Vec<String>,
    },

    /// Suggest search keywords for an image description.
    Keywords {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Blog post helpers
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// List the use-case pages.
    UseCases,

    /// Print schema.org structured data.
    JsonLd {
        #[command(subcommand)]
        command: JsonLdCommands,
    },

    /// Print the effective site configuration.
    Config,
}

fn main() {
    HookBuilder::default()
        .display_env_section(true)
        .panic_section("It looks like PictoPicSearch encountered a bug")
        .install()
        .expect("Failed to install color-eyre hook");

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    if let Err(err) = entry(cli) {
        error!("{:#}", err);
        exit(1);
    }
}

fn entry(cli: Cli) -> eyre::Result<()> {
    let config = match &cli.config {
        Some(path) => SiteConfig::from_file(path),
        None => SiteConfig::from_file(CONFIG_FILE),
    }
    .note("Can't load site configuration")?;
    let catalog = config.providers();

    match cli.command {
        Commands::Providers => {
            print_providers(catalog, cli.json)?;
            Ok(())
        }
        Commands::Provider { id } => {
            let provider = catalog
                .get(&id)
                .ok_or_else(|| eyre!("Unknown provider `{id}`"))
                .suggestion("Run `pictopic providers` to list the known ids")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(provider)?);
                return Ok(());
            }
            println!("{} ({})", provider.name(), provider.url());
            println!("  {}", provider.description());
            println!("  Pros: {}", provider.pros().join("; "));
            println!("  Cons: {}", provider.cons().join("; "));
            let formats: Vec<&str> = provider
                .supported_formats()
                .iter()
                .map(String::as_str)
                .collect();
            println!("  Formats: {}", formats.join(", "));
            println!(
                "  Free: {}, account required: {}",
                yes_no(provider.is_free()),
                yes_no(provider.requires_account())
            );
            Ok(())
        }
        Commands::SearchUrl {
            provider,
            image_url,
        } => {
            let url = catalog.search_url(&provider, &image_url);
            if url.is_empty() {
                return Err(eyre!("Unknown provider `{provider}`")
                    .suggestion("Run `pictopic providers` to list the known ids"));
            }
            println!("{url}");
            Ok(())
        }
        Commands::Links {
            image_url,
            providers,
        } => {
            let providers = if providers.is_empty() {
                catalog.iter().map(|provider| provider.id().to_string()).collect()
            } else {
                providers
            };
            let links = plan_search_links(catalog, &image_url, &providers)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&links)?);
                return Ok(());
            }
            for link in links {
                println!("• {} -> {}", link.display_name, link.url);
            }
            Ok(())
        }
        Commands::Keywords { description } => {
            let keywords = generate_keywords(&description.join(" "))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&keywords)?);
            } else if keywords.is_empty() {
                println!("No keywords found, try a more descriptive text");
            } else {
                println!("{}", keywords.join(", "));
            }
            Ok(())
        }
        Commands::Posts { command } => handle_post_command(&config, command, cli.json),
        Commands::UseCases => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(use_cases())?);
                return Ok(());
            }
            for use_case in use_cases() {
                println!("• {} -> /use-cases/{}", use_case.title(), use_case.slug());
                println!("  {}", use_case.description());
            }
            Ok(())
        }
        Commands::JsonLd { command } => handle_json_ld_command(&config, command),
        Commands::Config => {
            print!("{}", config.export());
            Ok(())
        }
    }
}

fn print_providers(catalog: &ProviderCatalog, emit_json: bool) -> eyre::Result<()> {
    if emit_json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    for provider in catalog {
        let account = if provider.requires_account() {
            " (account required)"
        } else {
            ""
        };
        println!("• {} [{}]{account}", provider.display_name(), provider.id());
        println!("  {}", provider.description());
    }
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
