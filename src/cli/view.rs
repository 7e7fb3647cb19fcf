//! View command - show a single blog

use crate::cli::style::{Stream, Stylize, hyperlink_url};
use anstream::println;
use blogcheck::catalog::read_time_minutes;
use blogcheck::config::ClientConfig;
use blogcheck::error::Result;
use blogcheck::gateway::create_gateway;

/// Run the view command
pub async fn run_view(api_url: Option<&str>, id: &str) -> Result<()> {
    let config = ClientConfig::from_env(api_url)?;
    let gateway = create_gateway(&config)?;
    let blog = gateway.get_blog(id).await?;

    println!("{}", blog.title.emphasis());
    let date = blog
        .sort_date()
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "undated".to_string());
    println!(
        "{} · {} · {} · {}",
        blog.author_name,
        blog.category.accent(),
        date.muted(),
        format!("{} min read", read_time_minutes(blog.word_count)).muted()
    );
    println!("{}", format!("Status: {}", blog.status).muted());
    if let Some(url) = &blog.public_url {
        println!("{}", hyperlink_url(Stream::Stdout, url));
    }
    if let Some(content) = blog.content.as_deref().filter(|c| !c.trim().is_empty()) {
        println!();
        println!("{content}");
    }

    Ok(())
}
