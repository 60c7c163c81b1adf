use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sagemaker::client::SageMaker;
use sagemaker::invoke_api::GenerationParameters;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod probe;

#[derive(Parser)]
#[command(version, about = "test llm sagemaker endpoint", long_about = None)]
struct Cli {
    #[arg(long, help = "sagemaker endpoint name")]
    endpoint_name: String,

    #[arg(long, help = "maximum new tokens to generate", default_value_t = 512)]
    max_tokens: u32,

    #[arg(long, help = "sampling temperature", default_value_t = 0.7)]
    temperature: f32,

    #[arg(long, help = "aws region, defaults to aws config then eu-west-2")]
    region: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()?
        .add_directive("probe=info".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_line_number(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();

    println!("Endpoint name: {}", cli.endpoint_name);
    println!("{}", "-".repeat(50));

    let sagemaker = SageMaker::connect(cli.region).await;
    if !probe::check_endpoint_status(&sagemaker, &cli.endpoint_name).await {
        println!("Endpoint is not ready. Exiting...");
        return Ok(ExitCode::FAILURE);
    }

    let parameters = GenerationParameters {
        max_new_tokens: cli.max_tokens,
        temperature: cli.temperature,
        ..GenerationParameters::default()
    };
    probe::run_test_cases(&sagemaker, &cli.endpoint_name, &parameters).await;

    Ok(ExitCode::SUCCESS)
}
