mod api;
mod server;

use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use topic_recommender::config::EngineConfig;
use topic_recommender::report::{ReportFormat, ReportRequest, ReportService};
use topic_recommender::session::Identity;
use topic_recommender::{format_float, format_percent, RecommendRequest, RecommenderEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "topic-recommender", about = "Content topic recommender")]
struct Cli {
    /// Path to a TOML config (defaults to config/recommender.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Recommend(RecommendArgs),
    Segments,
    Report(ReportArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long, default_value = "7 days")]
    horizon: String,
    #[arg(long, default_value = "all")]
    platform: String,
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    top_k: i64,
    #[arg(long)]
    nonce: Option<u64>,
    #[arg(long)]
    json: bool,
}

impl Default for RecommendArgs {
    fn default() -> Self {
        Self {
            horizon: "7 days".to_string(),
            platform: "all".to_string(),
            top_k: 6,
            nonce: None,
            json: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long, default_value = "csv")]
    format: String,
    #[arg(long, default_value = "Weekly topics")]
    title: String,
    /// Period start, YYYY-MM-DD (defaults to seven days ago)
    #[arg(long)]
    from: Option<String>,
    /// Period end, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    to: Option<String>,
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,
    #[arg(long, default_value = "")]
    user: String,
    #[arg(long, default_value = "7 days")]
    horizon: String,
    #[arg(long, default_value = "all")]
    platform: String,
    #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
    top_k: i64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/recommender.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or(Command::Recommend(RecommendArgs::default()));

    if let Command::InitConfig(args) = &command {
        return init_config(&args.path);
    }

    let (config, config_path) = EngineConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::info!(path = %path.display(), "loaded config");
    }
    let engine = RecommenderEngine::new(config).map_err(|err| err.to_string())?;

    match command {
        Command::Recommend(args) => run_recommend(&engine, args),
        Command::Segments => run_segments(&engine),
        Command::Report(args) => run_report(&engine, args),
        Command::Serve(args) => server::serve(engine, args).await,
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_recommend(engine: &RecommenderEngine, args: RecommendArgs) -> Result<(), String> {
    let request = RecommendRequest::parse(&args.horizon, &args.platform, args.top_k)
        .map_err(|err| err.to_string())?;
    let output = match args.nonce {
        Some(nonce) => engine.recommend_with_nonce(&request, nonce),
        None => engine.recommend(&request),
    }
    .map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&output)
            .map_err(|err| format!("failed to serialize output: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    println!(
        "Top {} topics for {} days on {} ({} backend)",
        output.items.len(),
        request.horizon_days,
        request.platform,
        output.backend.label()
    );
    for item in &output.items {
        println!(
            "{:>2}. {} | ER {} | CTR {} | {} | {}",
            item.rank,
            item.topic,
            format_percent(item.er_pred),
            format_percent(item.ctr_pred),
            item.trend.label(),
            item.status.label()
        );
        println!("    drivers: {}", item.drivers);
        println!("    {}", item.explain);
    }
    println!(
        "\nKPIs: avg CTR {} | avg ER {} | rising trends {} | model quality {}",
        format_percent(output.kpi.avg_ctr),
        format_percent(output.kpi.avg_er),
        output.kpi.rising_trend_count,
        format_float(output.kpi.model_quality_proxy, 2)
    );
    Ok(())
}

fn run_segments(engine: &RecommenderEngine) -> Result<(), String> {
    println!("Audience segments:");
    for segment in engine.segments() {
        println!(
            "- {}: {:.0}% | focus: {}",
            segment.name,
            segment.share_percent(),
            segment.focus
        );
    }
    Ok(())
}

fn run_report(engine: &RecommenderEngine, args: ReportArgs) -> Result<(), String> {
    let format = ReportFormat::from_str(&args.format)
        .ok_or_else(|| format!("invalid report format: {}", args.format))?;
    let today = Local::now().date_naive();
    let period_to = parse_date(args.to.as_deref())?.unwrap_or(today);
    let period_from = parse_date(args.from.as_deref())?.unwrap_or(period_to - Duration::days(7));

    let request = RecommendRequest::parse(&args.horizon, &args.platform, args.top_k)
        .map_err(|err| err.to_string())?;
    let recommendations = engine.recommend(&request).map_err(|err| err.to_string())?;

    let mut service = ReportService::new(args.out_dir).map_err(|err| err.to_string())?;
    let entry = service
        .build(
            &ReportRequest {
                title: args.title,
                period_from,
                period_to,
                format,
                author: Identity::sign_in(&args.user),
            },
            &recommendations,
            &engine.segments(),
        )
        .map_err(|err| err.to_string())?;

    println!(
        "Report #{} ({}, {}) written to {}",
        entry.id,
        entry.format.label(),
        entry.period,
        entry.path.display()
    );
    Ok(())
}

fn init_config(path: &Path) -> Result<(), String> {
    EngineConfig::default().write(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    value
        .map(|text| {
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map_err(|err| format!("invalid date {:?}: {}", text, err))
        })
        .transpose()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
