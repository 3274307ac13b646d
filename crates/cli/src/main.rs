//! Command line interface for the pool chart engine.
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use poolchart_api::config::NATIVE_XLM_CONTRACT;
use poolchart_api::{ApiServer, AppState, ChartConfig, ChartService};
use poolchart_data::repositories::Database;
use poolchart_data::{EventSourceConfig, LedgerConfig, PoolEntry, SyntheticEvents};
use poolchart_domain::{Candle, PoolData, Side, Timeframe, TokenAmount};
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;
use tracing::info;

/// Token priced by the `--demo` pool.
const DEMO_TOKEN: &str = "CDEMOTOKEN";
const DEMO_POOL: &str = "CDEMOPOOL";

#[derive(Parser)]
#[command(name = "poolchart")]
#[command(about = "Pool price history and candle charts", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "POOLCHART_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Register an in-memory demo pool for CDEMOTOKEN priced by synthetic events
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render candles for a token
    Candles {
        /// Token contract address
        token: String,

        /// Chart window: 1h, 4h, 1d, 1w or 1m
        #[arg(short, long, default_value = "1d")]
        timeframe: Timeframe,

        /// Store the rendered candles in PostgreSQL
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Show the pool pricing a token
    Pool {
        /// Token contract address
        token: String,
    },
    /// Read back candles stored by `candles --database-url`
    Stored {
        /// Pool contract address
        pool: String,

        /// Chart window the candles were rendered for
        #[arg(short, long, default_value = "1d")]
        timeframe: Timeframe,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Earliest bucket start, unix milliseconds
        #[arg(long)]
        from: Option<i64>,

        /// Latest bucket start, unix milliseconds
        #[arg(long)]
        to: Option<i64>,

        /// Only show the most recent candle
        #[arg(long, conflicts_with_all = ["from", "to", "clear"])]
        latest: bool,

        /// Delete every stored candle for the pool
        #[arg(long, conflicts_with_all = ["from", "to"])]
        clear: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    logging::init_logging(&config.log_level)?;

    if cli.demo {
        add_demo_pool(&mut config)?;
    }

    let charts = ChartService::from_config(&config)?;

    match cli.command {
        Commands::Candles {
            token,
            timeframe,
            database_url,
        } => {
            let Some(rendered) = charts.try_chart(&token, timeframe).await? else {
                println!("No pool found for {token}");
                return Ok(());
            };

            print_candles(&rendered.chart.candles);
            println!(
                "{} candles from {} price points{}",
                rendered.chart.candles.len(),
                rendered.chart.points.len(),
                if rendered.chart.is_densified() {
                    " (interpolated)"
                } else {
                    ""
                }
            );
            if let Some(truncation) = &rendered.chart.truncation {
                println!("History truncated: {truncation}");
            }

            if let Some(url) = database_url {
                let db = Database::connect(&url)
                    .await
                    .context("connecting to database")?;
                db.migrate().await?;
                let written = db
                    .candles()
                    .save_all(&rendered.pool.pool_address, timeframe, &rendered.chart.candles)
                    .await?;
                info!(pool = %rendered.pool.pool_address, written, "Candles stored");
            }
        }
        Commands::Pool { token } => match charts.find_pool(&token).await {
            Some(pool) => print_pool(&pool),
            None => println!("No pool found for {token}"),
        },
        Commands::Stored {
            pool,
            timeframe,
            database_url,
            from,
            to,
            latest,
            clear,
        } => {
            let db = Database::connect(&database_url)
                .await
                .context("connecting to database")?;
            db.migrate().await?;
            let repo = db.candles();

            if clear {
                let deleted = repo.delete_by_pool(&pool).await?;
                println!("Deleted {deleted} candles for {pool}");
                return Ok(());
            }

            let records = if latest {
                repo.find_latest(&pool, timeframe)
                    .await?
                    .into_iter()
                    .collect::<Vec<_>>()
            } else {
                repo.find_by_pool_and_range(
                    &pool,
                    timeframe,
                    from.unwrap_or(0),
                    to.unwrap_or(i64::MAX),
                )
                .await?
            };

            if records.is_empty() {
                println!("No stored {timeframe} candles for {pool}");
            } else {
                let candles: Vec<Candle> = records.iter().map(|r| r.to_candle()).collect();
                print_candles(&candles);
            }
        }
        Commands::Serve { bind } => {
            let mut server = config.server.clone();
            if let Some(bind) = bind {
                server.bind = bind;
            }
            ApiServer::new(server, AppState::new(charts)).run().await?;
        }
    }

    Ok(())
}

/// Adds a native pool for [`DEMO_TOKEN`] deep enough that synthetic
/// histories never run dry, and switches to synthetic events.
fn add_demo_pool(config: &mut ChartConfig) -> Result<()> {
    let LedgerConfig::InMemory { pools } = &mut config.ledger else {
        anyhow::bail!("--demo needs the in-memory ledger");
    };
    let seed = match config.event_source {
        EventSourceConfig::Synthetic { seed } => seed,
        EventSourceConfig::LedgerIndexed { .. } => 0,
    };
    let reserve = SyntheticEvents::new(seed)
        .min_safe_reserve(Timeframe::OneMonth)
        .checked_add(TokenAmount::from(10_000_000_000_000u64))
        .context("demo reserve overflow")?;

    pools.push(PoolEntry {
        address: DEMO_POOL.to_string(),
        token_a: NATIVE_XLM_CONTRACT.to_string(),
        token_b: DEMO_TOKEN.to_string(),
        reserves: [reserve, reserve],
        native_side: Some(Side::A),
        stable_side: None,
        token_decimals: None,
    });
    config.event_source = EventSourceConfig::Synthetic { seed };
    if !config.quote_assets.iter().any(|q| q == NATIVE_XLM_CONTRACT) {
        config.quote_assets.push(NATIVE_XLM_CONTRACT.to_string());
    }
    Ok(())
}

fn row(values: &[&str]) -> Row {
    Row::new(values.iter().map(|v| Cell::new(v)).collect())
}

fn print_candles(candles: &[Candle]) {
    let mut table = Table::new();
    table.add_row(row(&["Time", "Open", "High", "Low", "Close", "Volume", "Source"]));
    for c in candles {
        let time = i64::try_from(c.timestamp)
            .ok()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .unwrap_or_default()
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let source = if c.is_interpolated() { "interp" } else { "real" };
        table.add_row(row(&[
            &time,
            &format!("{:.7}", c.open),
            &format!("{:.7}", c.high),
            &format!("{:.7}", c.low),
            &format!("{:.7}", c.close),
            &format!("{:.2}", c.volume),
            source,
        ]));
    }
    table.printstd();
}

fn print_pool(pool: &PoolData) {
    let kind = match pool.native_token_index() {
        Some(side) => format!("native (slot {})", side.index()),
        None => "stable".to_string(),
    };
    let mut table = Table::new();
    table.add_row(row(&["Pool", &pool.pool_address]));
    table.add_row(row(&["Token A", &pool.token_a]));
    table.add_row(row(&["Token B", &pool.token_b]));
    table.add_row(row(&["Reserve A", &pool.reserves[0].to_string()]));
    table.add_row(row(&["Reserve B", &pool.reserves[1].to_string()]));
    table.add_row(row(&["Kind", &kind]));
    table.printstd();
}
