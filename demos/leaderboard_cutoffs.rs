//! Example: Rank cutoffs from the cached league leaderboard.
//!
//! Run with: cargo run --example leaderboard_cutoffs [country]

use std::time::Duration;

use tetrio_api_client::Context;
use tetrio_api_client::rest::TetrioRestClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // TETRIO_API_BASE, TETRIO_CACHE_PATH and TETRIO_SESSION_ID are honored.
    let client = TetrioRestClientBuilder::from_env().build();
    let ctx = Context::with_timeout(Duration::from_secs(60));

    let snapshot = client.get_leaderboard(&ctx).await?;
    println!(
        "{} ranked players, cached until {} ({})",
        snapshot.len(),
        snapshot.cache.until,
        snapshot.cache.cache_control()
    );

    for band in snapshot.cutoffs()? {
        println!(
            "{:>2}  top {:>5.1}%  {:>9.2} TR ({})",
            band.rank,
            band.percentile * 100.0,
            band.bottom_rating(),
            band.bottom.username
        );
    }

    // A second call within the cache window is served from disk.
    if let Some(country) = std::env::args().nth(1) {
        let local = client.get_league_lb(&ctx, &country).await?;
        println!("\n{} players from {}", local.len(), country.to_uppercase());
        for user in local.iter().take(10) {
            println!(
                "#{:<6} {:<20} {:.2}",
                user.league.standing,
                user.username,
                user.rating()
            );
        }
    }

    Ok(())
}
