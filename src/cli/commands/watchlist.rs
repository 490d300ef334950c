//! Watchlist command implementation.

use anyhow::Result;
use stockcast_config::{AppConfig, Market};

pub async fn run(config: &AppConfig) -> Result<()> {
    for market in [Market::Us, Market::India] {
        let entries: Vec<_> = config.watchlist_for(market).collect();
        if entries.is_empty() {
            continue;
        }

        println!("{} ({} tickers)", market, entries.len());
        println!("{}", "─".repeat(60));
        for entry in entries {
            println!(
                "  {:<14} {:<28} {} {:.3e}",
                entry.symbol, entry.name, entry.currency, entry.market_cap
            );
        }
        println!();
    }

    Ok(())
}
