use std::sync::Arc;

use anyhow::Result;
use msfinance_client::MsFinanceClient;
use stock_core::{ListKind, StockRank};
use tokio::io::AsyncBufReadExt;
use watchlist_manager::{SqliteStockStore, StockDb, StockRepository};

mod config;
mod render;
mod view_model;

use config::AppConfig;
use render::ConsoleRender;
use view_model::StockListViewModel;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting StockMonitor");

    let config = AppConfig::from_env()?;
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Search host: {}", config.rapidapi_host);
    tracing::info!("  Search debounce: {}ms", config.search_debounce_ms);

    let db = StockDb::new(&config.database_url).await?;
    let store = Arc::new(SqliteStockStore::new(db));
    let repository = StockRepository::new(store);
    let client = MsFinanceClient::new(config.rapidapi_key.clone(), config.rapidapi_host.clone());

    let mut view_model = StockListViewModel::new(
        repository,
        client,
        Arc::new(ConsoleRender),
        config.search_debounce(),
    );

    view_model.refresh().await;
    run_command_loop(&mut view_model).await
}

async fn run_command_loop(view_model: &mut StockListViewModel) -> Result<()> {
    print_usage();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };

        match command {
            "list" => view_model.refresh().await,
            "search" => {
                let query = parts.collect::<Vec<_>>().join(" ");
                view_model.search_input(&query);
            }
            "add" => match (parts.next(), parts.next().and_then(parse_list)) {
                (Some(symbol), Some(list)) => match view_model.search_result(symbol).await {
                    Some(stock) => view_model.add_stock(stock, list).await,
                    None => println!("{symbol} is not in the current search results"),
                },
                _ => print_usage(),
            },
            "rank" => match (parts.next(), parts.next().and_then(parse_rank)) {
                (Some(symbol), Some(rank)) => view_model.set_rank(symbol, rank).await,
                _ => print_usage(),
            },
            "move" => match (parts.next(), parts.next().and_then(parse_list)) {
                (Some(symbol), Some(list)) => view_model.move_stock(symbol, list).await,
                _ => print_usage(),
            },
            "remove" => match parts.next() {
                Some(symbol) => view_model.remove(symbol).await,
                None => print_usage(),
            },
            "detail" => match parts.next() {
                Some(symbol) => view_model.show_detail(symbol),
                None => print_usage(),
            },
            "quit" | "exit" => break,
            _ => print_usage(),
        }
    }

    Ok(())
}

fn parse_list(token: &str) -> Option<ListKind> {
    match token {
        "active" => Some(ListKind::Active),
        "watch" | "watchlist" => Some(ListKind::Watchlist),
        _ => None,
    }
}

fn parse_rank(token: &str) -> Option<StockRank> {
    match token {
        "cold" => Some(StockRank::Cold),
        "hot" => Some(StockRank::Hot),
        "veryhot" | "very-hot" => Some(StockRank::VeryHot),
        _ => None,
    }
}

fn print_usage() {
    println!("Commands:");
    println!("  list                             show both lists");
    println!("  search <query>                   look up tickers");
    println!("  add <symbol> active|watch        add a search result to a list");
    println!("  rank <symbol> cold|hot|veryhot   set the heat rank");
    println!("  move <symbol> active|watch       move between lists");
    println!("  remove <symbol>                  stop tracking");
    println!("  detail <symbol>                  price projection");
    println!("  quit");
}
