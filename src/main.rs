//! blogcheck - submit, review and browse blogs
//!
//! CLI binary for the blog-review service.

use anyhow::{Result, anyhow};
use blogcheck::catalog::SortOrder;
use blogcheck::types::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "blogcheck")]
#[command(about = "Submit blogs for word-count and plagiarism review")]
#[command(version)]
struct Cli {
    /// Base URL of the review service (overrides BLOGCHECK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document for analysis and publish it
    Submit {
        /// Author's full name
        #[arg(long)]
        name: String,

        /// Author's email address
        #[arg(long)]
        email: String,

        /// Blog category (technology, business, lifestyle, health)
        #[arg(long)]
        category: Category,

        /// Blog title
        #[arg(long)]
        title: String,

        /// Path to the .doc or .docx document
        #[arg(long)]
        file: PathBuf,

        /// Publish without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List published blogs
    List {
        /// Case-insensitive text to look for in title, content or author
        #[arg(long)]
        search: Option<String>,

        /// Only show this category
        #[arg(long)]
        category: Option<Category>,

        /// Date order (newest or oldest)
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show one blog
    View {
        /// Blog identifier
        id: String,
    },

    /// Show submission counts by status
    Dashboard,
}

fn init_tracing() {
    // Diagnostics go to stderr so they never mix with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();

    let outcome = match cli.command {
        Commands::Submit {
            name,
            email,
            category,
            title,
            file,
            yes,
        } => {
            let form = cli::SubmitForm {
                name,
                email,
                category,
                title,
                file,
            };
            cli::run_submit(api_url, form, yes).await
        }
        Commands::List {
            search,
            category,
            sort,
        } => cli::run_list(api_url, search, category, sort).await,
        Commands::View { id } => cli::run_view(api_url, &id).await,
        Commands::Dashboard => cli::run_dashboard(api_url).await,
    };

    outcome.map_err(|e| anyhow!(e.user_message()))
}
