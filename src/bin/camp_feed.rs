// Print a camp's activity feed as a given viewer sees it.
// Usage: cargo run --bin camp_feed -- --camp <uuid> --viewer <uuid> [--pretty]

use clap::Parser;
use tracing::info;

use camp_feed::models::ids::parse_uuid;
use camp_feed::{database, Config};

#[derive(Parser, Debug)]
#[command(name = "camp_feed", about = "Print the activity feed of a camp for one viewer")]
struct Args {
    /// Camp id
    #[arg(long)]
    camp: String,

    /// User the feed is computed for
    #[arg(long)]
    viewer: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camp_feed=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let camp_id = parse_uuid(&args.camp, "camp id").map_err(anyhow::Error::msg)?;
    let viewer_id = parse_uuid(&args.viewer, "viewer id").map_err(anyhow::Error::msg)?;

    let config = Config::from_env()?;
    let pool = database::new_pool(&config.database_url).await?;
    info!("Database connection pool created");

    let feed = database::aggregator(pool, &config)
        .get_activities(camp_id, viewer_id)
        .await?;
    info!("Loaded {} feed entries for camp {}", feed.len(), camp_id);

    let output = if args.pretty {
        serde_json::to_string_pretty(&feed)?
    } else {
        serde_json::to_string(&feed)?
    };
    println!("{}", output);

    Ok(())
}
