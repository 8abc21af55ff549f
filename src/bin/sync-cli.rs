use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "sync-cli")]
#[command(about = "Management CLI for the config sync service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9095")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status and cache readiness
    Status,
    /// List cached group snapshots
    Snapshots,
    /// Refresh every group now
    Sync,
    /// Fetch config payloads, e.g. `fetch PLUGIN,RULE`
    Fetch {
        /// Comma-separated group keys
        groups: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)).headers(headers),
        Commands::Snapshots => client.get(format!("{}/admin/snapshots", cli.url)).headers(headers),
        Commands::Sync => client.post(format!("{}/admin/sync", cli.url)).headers(headers),
        Commands::Fetch { groups } => client
            .get(format!("{}/configs/fetch", cli.url))
            .query(&[("groupKeys", groups)]),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        return Ok(());
    }

    let body: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
