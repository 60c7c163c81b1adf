use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use framework::env;
use hub::allow_list::AllowList;
use hub::snapshot::DEFAULT_REVISION;
use hub::snapshot::Hub;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "download model snapshot from hugging face hub", long_about = None)]
struct Cli {
    #[arg(long, help = "hub repo id, e.g. org/model")]
    model_name: String,

    #[arg(long, help = "local dir", default_value = "/model_artifacts")]
    local_model_path: PathBuf,

    #[arg(long, help = "branch, tag or commit", default_value = DEFAULT_REVISION)]
    revision: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?
        .add_directive("download=debug".parse()?)
        .add_directive("hub=debug".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_line_number(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    env::load_dotenv();

    // public repos need no token
    let hub = Hub::new(env::var("HF_ENDPOINT"), env::var(env::HF_TOKEN));
    let summary = hub
        .snapshot_download(&cli.model_name, &cli.revision, &cli.local_model_path, &AllowList::default())
        .await?;

    info!(
        "snapshot downloaded, path={}, downloaded={}, skipped={}",
        cli.local_model_path.to_string_lossy(),
        summary.downloaded.len(),
        summary.skipped.len()
    );
    Ok(())
}
