mod crawl;
mod db;
mod feed;
mod fetch;
mod parser;
mod record;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use crawl::Crawler;

#[derive(Parser)]
#[command(
    name = "film_scraper",
    about = "Highest-grossing films scraper: Wikipedia listing → JSON feed → SQLite"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the listing page and write the JSON feed
    Crawl {
        /// Max listing rows to follow (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Feed file to (over)write
        #[arg(long, default_value = "films_data.json")]
        feed: PathBuf,
    },
    /// Load the JSON feed into the films table
    Load {
        /// Feed file to read
        #[arg(long, default_value = "films_data.json")]
        feed: PathBuf,
        /// SQLite database path
        #[arg(long, default_value = "films.db")]
        db: PathBuf,
    },
    /// Crawl + load in one pipeline
    Run {
        /// Max listing rows to follow (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long, default_value = "films_data.json")]
        feed: PathBuf,
        #[arg(long, default_value = "films.db")]
        db: PathBuf,
    },
    /// Show films table statistics
    Stats {
        #[arg(long, default_value = "films.db")]
        db: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crawl { limit, feed } => run_crawl(limit, &feed).await,
        Commands::Load { feed, db } => run_load(&feed, &db),
        Commands::Run { limit, feed, db } => {
            run_crawl(limit, &feed).await?;
            run_load(&feed, &db)
        }
        Commands::Stats { db } => {
            let conn = db::connect(&db)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Films:        {}", s.films);
            println!("Top grossing: {:.0}", s.top_grossing);
            println!("Total gross:  {:.0}", s.total_gross);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run_crawl(limit: Option<usize>, feed_path: &Path) -> anyhow::Result<()> {
    let crawler = Crawler::new()?;
    println!("Crawling {} ...", crawl::LISTING_URL);
    let (records, stats) = crawler.crawl(crawl::LISTING_URL, limit).await?;
    feed::write_feed(feed_path, &records)?;
    println!(
        "Done: {} rows followed ({} ok, {} errors), feed written to {}",
        stats.total,
        stats.ok,
        stats.errors,
        feed_path.display()
    );
    Ok(())
}

fn run_load(feed_path: &Path, db_path: &Path) -> anyhow::Result<()> {
    let films = feed::read_feed(feed_path)?;
    let conn = db::connect(db_path)?;
    db::init_schema(&conn)?;
    let inserted = db::insert_films(&conn, &films)?;
    println!("Inserted {} films into {}", inserted, db_path.display());
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
