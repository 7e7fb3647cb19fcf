//! Dashboard command - submission counts by status

use crate::cli::style::{Stylize, bullet};
use anstream::println;
use blogcheck::catalog::{BlogQuery, DashboardStats, StatusShare};
use blogcheck::config::ClientConfig;
use blogcheck::error::Result;
use blogcheck::gateway::create_gateway;

/// Submissions listed under the status figures
const LATEST_LIMIT: usize = 5;

/// Run the dashboard command
pub async fn run_dashboard(api_url: Option<&str>) -> Result<()> {
    let config = ClientConfig::from_env(api_url)?;
    let gateway = create_gateway(&config)?;
    let blogs = gateway.list_all().await?;
    let stats = DashboardStats::from_blogs(&blogs);

    println!("{}", "Submissions".emphasis());
    println!("  Total      {}", stats.total.to_string().accent());
    print_share("Published", stats.published);
    print_share("Pending", stats.pending);
    print_share("Rejected", stats.rejected);

    let latest = BlogQuery::default().apply(&blogs);
    if !latest.is_empty() {
        println!();
        println!("{}", "Latest submissions".emphasis());
        for blog in latest.into_iter().take(LATEST_LIMIT) {
            println!(
                "  {} {} {}",
                bullet(),
                blog.title,
                format!("[{}]", blog.status).muted()
            );
        }
    }

    Ok(())
}

fn print_share(label: &str, share: StatusShare) {
    println!(
        "  {label:<10} {} {}",
        share.count.to_string().accent(),
        format!("({:.1}%)", share.percent).muted()
    );
}
