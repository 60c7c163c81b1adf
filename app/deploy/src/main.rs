use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use config::DeployConfig;
use framework::env;
use framework::yaml;
use sagemaker::client::SageMaker;
use sagemaker::deployment::Deployment;
use sagemaker::deployment::timestamped_name;
use sagemaker::image::lmi_image_uri;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser)]
#[command(version, about = "deploy llm to sagemaker endpoint", long_about = None)]
struct Cli {
    #[arg(long, help = "model name prefix, timestamp is appended")]
    model_name: String,

    #[arg(long, help = "endpoint name prefix, timestamp is appended")]
    endpoint_name: String,

    #[arg(long, help = "conf path", default_value = "config.yaml")]
    conf: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?
        .add_directive("deploy=debug".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_line_number(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    env::load_dotenv();
    let token = env::var(env::HF_TOKEN);

    info!("load config, path={}", cli.conf.to_string_lossy());
    let config: DeployConfig = yaml::load_file(&cli.conf)?;

    let now = Local::now();
    let model_name = timestamped_name(&cli.model_name, &now);
    let endpoint_name = timestamped_name(&cli.endpoint_name, &now);

    let image_uri = lmi_image_uri(&config.region);
    info!("using lmi container, image={image_uri}");

    let model = config.model_spec(model_name, image_uri, token.as_deref())?;

    let sagemaker = SageMaker::connect(Some(config.region.clone())).await;
    sagemaker.create_model(&model).await?;
    info!("model created, name={}", model.name);

    let deployment = Deployment::new(endpoint_name, config.instance_type.clone());
    sagemaker.deploy(&model.name, &deployment).await?;
    info!("model deployed, endpoint={}", deployment.endpoint_name);

    println!("endpoint name: {}", deployment.endpoint_name);
    Ok(())
}
