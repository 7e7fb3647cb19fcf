//! List command - browse published blogs

use crate::cli::style::{Stream, Stylize, bullet, hyperlink_url};
use anstream::println;
use blogcheck::catalog::{BlogQuery, SortOrder, category_counts, read_time_minutes};
use blogcheck::config::ClientConfig;
use blogcheck::error::Result;
use blogcheck::gateway::create_gateway;
use blogcheck::types::Category;

/// Run the list command
pub async fn run_list(
    api_url: Option<&str>,
    search: Option<String>,
    category: Option<Category>,
    sort: SortOrder,
) -> Result<()> {
    let config = ClientConfig::from_env(api_url)?;
    let gateway = create_gateway(&config)?;
    let blogs = gateway.list_published().await?;

    let query = BlogQuery {
        search,
        category,
        sort,
    };
    let shown = query.apply(&blogs);

    println!(
        "Showing {} of {} blogs",
        shown.len().to_string().accent(),
        blogs.len()
    );
    if !blogs.is_empty() {
        let counts: Vec<String> = category_counts(&blogs)
            .into_iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        println!("{}", counts.join(", ").muted());
    }
    println!();

    for blog in shown {
        let date = blog
            .sort_date()
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default();
        println!("{} {}", bullet(), blog.title.emphasis());
        println!(
            "  {} {} {} {}",
            blog.author_name,
            blog.category.accent(),
            date.muted(),
            format!("{} min read", read_time_minutes(blog.word_count)).muted()
        );
        println!("  {}", blog.id.muted());
        if let Some(url) = &blog.public_url {
            println!("  {}", hyperlink_url(Stream::Stdout, url));
        }
    }

    Ok(())
}
