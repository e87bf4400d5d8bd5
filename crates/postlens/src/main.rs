use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use postlens_core::{
    config::{parse_timezone, AnalyzerConfig},
    export, ingest,
    nlp::{builtin_capability_descriptors, CapabilityRegistry},
    pipeline::{Pipeline, PipelineOutput},
    refresh, store,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Post feature extraction and keyword statistics", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the posts table if it does not exist
    InitDb,
    /// Import posts from a JSON-lines file, skipping ids already stored
    Ingest { path: PathBuf },
    /// Apply metric snapshots (JSON lines) to recently created posts
    Refresh(RefreshArgs),
    /// Compute features and keyword statistics for every stored post
    Analyze(AnalyzeArgs),
    /// List the languages with built-in keyword and sentiment support
    Languages,
}

#[derive(Args, Debug)]
struct RefreshArgs {
    path: PathBuf,
    /// Only posts created within this many days are refreshed
    #[arg(long)]
    window_days: Option<i64>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// IANA timezone used for post_hour / post_weekday
    #[arg(long)]
    timezone: Option<String>,
    /// Number of keywords kept in the keyword table
    #[arg(long)]
    top_n: Option<usize>,
    /// Path of the full `;`-separated export
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Also write the feature view as Parquet
    #[arg(long)]
    parquet: Option<PathBuf>,
    /// Skip replacing the feature and keyword tables
    #[arg(long)]
    no_db_write: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Command::InitDb => {
            let pool = connect_pool().await?;
            store::bootstrap(&pool).await?;
            info!("posts table ready");
            Ok(())
        }
        Command::Ingest { path } => ingest_posts(&path).await,
        Command::Refresh(args) => {
            let window_days = args.window_days.unwrap_or(config.refresh_window_days);
            refresh_metrics(&args.path, window_days).await
        }
        Command::Analyze(args) => analyze(config, args).await,
        Command::Languages => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["language", "annotator", "sentiment", "description"]);
            for descriptor in builtin_capability_descriptors() {
                table.add_row(vec![
                    descriptor.language,
                    descriptor.annotator,
                    descriptor.sentiment,
                    descriptor.description,
                ]);
            }
            println!("{table}");
            Ok(())
        }
    }
}

async fn connect_pool() -> Result<store::DbPool> {
    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("POSTLENS_DATABASE_URL"))
        .unwrap_or_else(|_| store::DEFAULT_DATABASE_URL.to_string());
    store::connect(&database_url)
        .await
        .with_context(|| format!("failed to open database {database_url}"))
}

fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

async fn ingest_posts(path: &Path) -> Result<()> {
    let posts = ingest::read_posts(open_reader(path)?)
        .with_context(|| format!("failed to parse posts from {}", path.display()))?;

    let pool = connect_pool().await?;
    store::bootstrap(&pool).await?;

    let (mut stored, mut skipped) = (0usize, 0usize);
    for post in &posts {
        if store::insert_post(&pool, post).await? {
            info!(post_id = %post.id, title = %post.title, "stored post");
            stored += 1;
        } else {
            info!(post_id = %post.id, "post already exists, skipped");
            skipped += 1;
        }
    }

    info!(stored, skipped, "ingestion finished");
    Ok(())
}

async fn refresh_metrics(path: &Path, window_days: i64) -> Result<()> {
    let updates = ingest::read_metric_updates(open_reader(path)?)
        .with_context(|| format!("failed to parse metric updates from {}", path.display()))?;

    let pool = connect_pool().await?;
    let summary = refresh::apply_metric_updates(&pool, &updates, Utc::now(), window_days).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn analyze(config: AnalyzerConfig, args: AnalyzeArgs) -> Result<()> {
    let mut options = config.run_options()?;
    if let Some(timezone) = args.timezone.as_deref() {
        options.timezone = parse_timezone(timezone)?;
    }
    if let Some(top_n) = args.top_n {
        options.top_n = top_n;
    }

    let registry = CapabilityRegistry::builtin().context("failed to load built-in capabilities")?;
    let pipeline = Pipeline::new(registry, config.keyword_filter()?);

    let pool = connect_pool().await?;
    store::bootstrap(&pool).await?;
    let posts = store::load_posts(&pool).await?;
    if posts.is_empty() {
        warn!("no posts stored; outputs will be empty");
    }

    let output: PipelineOutput =
        tokio::task::spawn_blocking(move || pipeline.run(posts, &options))
            .await
            .context("feature pipeline task panicked")?;

    if args.no_db_write {
        warn!("skipping feature/keyword table replacement");
    } else {
        store::persist_run(&pool, &config.output_tables(), &output)
            .await
            .context("failed to persist feature and keyword tables")?;
    }

    let csv_path = args.csv.unwrap_or_else(|| config.csv_path.clone());
    export::export_full_csv(&output, &csv_path)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    if let Some(parquet_path) = args.parquet.or_else(|| config.parquet_path.clone()) {
        export::export_features_parquet(&output, &parquet_path)
            .with_context(|| format!("failed to write {}", parquet_path.display()))?;
    }

    println!("{}", output.keyword_view()?);
    println!("{}", serde_json::to_string_pretty(&output.summary)?);
    Ok(())
}
