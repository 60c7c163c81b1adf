use anyhow::Result;
use anyhow::anyhow;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_sagemaker::error::DisplayErrorContext;
use aws_sdk_sagemaker::types::ContainerDefinition;
use aws_sdk_sagemaker::types::ModelCompressionType;
use aws_sdk_sagemaker::types::ModelDataSource;
use aws_sdk_sagemaker::types::ProductionVariant;
use aws_sdk_sagemaker::types::ProductionVariantInstanceType;
use aws_sdk_sagemaker::types::S3ModelDataSource;
use aws_sdk_sagemaker::types::S3ModelDataType;
use aws_sdk_sagemakerruntime::primitives::Blob;
use chrono::DateTime;
use tracing::debug;
use tracing::info;

use crate::deployment::Deployment;
use crate::deployment::VARIANT_NAME;
use crate::endpoint::EndpointClient;
use crate::endpoint::EndpointDescription;
use crate::model::ArtifactCompression;
use crate::model::ModelSource;
use crate::model::ModelSpec;
use crate::model::artifact_compression;

pub const DEFAULT_REGION: &str = "eu-west-2";

pub struct SageMaker {
    control: aws_sdk_sagemaker::Client,
    runtime: aws_sdk_sagemakerruntime::Client,
    pub region: String,
}

impl SageMaker {
    /// Explicit region first, then the AWS default provider chain, then `DEFAULT_REGION`.
    pub async fn connect(region: Option<String>) -> Self {
        let region = RegionProviderChain::first_try(region.map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));
        let config = aws_config::defaults(BehaviorVersion::latest()).region(region).load().await;
        let region = config.region().map_or(DEFAULT_REGION.to_string(), |region| region.to_string());
        info!("connect sagemaker, region={region}");

        SageMaker {
            control: aws_sdk_sagemaker::Client::new(&config),
            runtime: aws_sdk_sagemakerruntime::Client::new(&config),
            region,
        }
    }

    pub async fn create_model(&self, model: &ModelSpec) -> Result<()> {
        info!("create model, name={}, source={}", model.name, model.source.describe());
        let container = container_definition(model);
        self.control
            .create_model()
            .model_name(&model.name)
            .execution_role_arn(&model.role)
            .primary_container(container)
            .send()
            .await
            .map_err(|err| anyhow!("failed to create model, name={}, error={}", model.name, DisplayErrorContext(&err)))?;
        Ok(())
    }

    /// Requests the endpoint and returns once SageMaker accepted it, provisioning continues remotely.
    pub async fn deploy(&self, model_name: &str, deployment: &Deployment) -> Result<()> {
        let endpoint_name = &deployment.endpoint_name;
        let variant = production_variant(model_name, deployment)?;

        info!("create endpoint config, name={endpoint_name}, instance_type={}", deployment.instance_type);
        self.control
            .create_endpoint_config()
            .endpoint_config_name(endpoint_name)
            .production_variants(variant)
            .send()
            .await
            .map_err(|err| {
                anyhow!("failed to create endpoint config, name={endpoint_name}, error={}", DisplayErrorContext(&err))
            })?;

        info!("create endpoint, name={endpoint_name}");
        self.control
            .create_endpoint()
            .endpoint_name(endpoint_name)
            .endpoint_config_name(endpoint_name)
            .send()
            .await
            .map_err(|err| anyhow!("failed to create endpoint, name={endpoint_name}, error={}", DisplayErrorContext(&err)))?;
        Ok(())
    }
}

impl EndpointClient for SageMaker {
    async fn describe_endpoint(&self, endpoint_name: &str) -> Result<EndpointDescription> {
        let response = self
            .control
            .describe_endpoint()
            .endpoint_name(endpoint_name)
            .send()
            .await
            .map_err(|err| anyhow!("failed to describe endpoint, name={endpoint_name}, error={}", DisplayErrorContext(&err)))?;

        Ok(EndpointDescription {
            name: response.endpoint_name().unwrap_or(endpoint_name).to_string(),
            status: response.endpoint_status().map_or("Unknown", |status| status.as_str()).to_string(),
            creation_time: response
                .creation_time()
                .and_then(|time| DateTime::from_timestamp(time.secs(), time.subsec_nanos())),
            config_name: response.endpoint_config_name().map(str::to_string),
            failure_reason: response.failure_reason().map(str::to_string),
        })
    }

    async fn invoke_endpoint(&self, endpoint_name: &str, content_type: &str, body: String) -> Result<Vec<u8>> {
        debug!("invoke endpoint, name={endpoint_name}, body={body}");
        let response = self
            .runtime
            .invoke_endpoint()
            .endpoint_name(endpoint_name)
            .content_type(content_type)
            .accept(content_type)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|err| anyhow!("failed to invoke endpoint, name={endpoint_name}, error={}", DisplayErrorContext(&err)))?;
        Ok(response.body().map(|blob| blob.as_ref().to_vec()).unwrap_or_default())
    }
}

fn container_definition(model: &ModelSpec) -> ContainerDefinition {
    let container = ContainerDefinition::builder().image(&model.image_uri);
    let container = match &model.source {
        ModelSource::Hub { environment } => container.set_environment(Some(environment.clone().into_iter().collect())),
        ModelSource::Artifacts { s3_uri } => match artifact_compression(s3_uri) {
            ArtifactCompression::Gzip => container.model_data_url(s3_uri),
            ArtifactCompression::None => {
                // uncompressed prefixes must end with a slash
                let prefix = if s3_uri.ends_with('/') { s3_uri.clone() } else { format!("{s3_uri}/") };
                let source = S3ModelDataSource::builder()
                    .s3_uri(prefix)
                    .s3_data_type(S3ModelDataType::S3Prefix)
                    .compression_type(ModelCompressionType::None)
                    .build();
                container.model_data_source(ModelDataSource::builder().s3_data_source(source).build())
            }
        },
    };
    container.build()
}

fn production_variant(model_name: &str, deployment: &Deployment) -> Result<ProductionVariant> {
    let startup_timeout = i32::try_from(deployment.container_startup_health_check_timeout.as_secs())?;
    let download_timeout = i32::try_from(deployment.model_data_download_timeout.as_secs())?;
    let variant = ProductionVariant::builder()
        .variant_name(VARIANT_NAME)
        .model_name(model_name)
        .initial_instance_count(deployment.initial_instance_count)
        .instance_type(ProductionVariantInstanceType::from(deployment.instance_type.as_str()))
        .container_startup_health_check_timeout_in_seconds(startup_timeout)
        .model_data_download_timeout_in_seconds(download_timeout)
        .build();
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts_model(s3_uri: &str) -> ModelSpec {
        ModelSpec {
            name: "llama".to_string(),
            role: "role".to_string(),
            image_uri: "image".to_string(),
            source: ModelSource::Artifacts {
                s3_uri: s3_uri.to_string(),
            },
        }
    }

    #[test]
    fn hub_container_passes_environment() {
        let model = ModelSpec::from_hub(
            "llama".to_string(),
            "role".to_string(),
            "image".to_string(),
            "org/model",
            Some("hf_secret"),
        )
        .unwrap();
        let container = container_definition(&model);
        assert_eq!(container.image(), Some("image"));
        let environment = container.environment().unwrap();
        assert_eq!(environment.get("HF_MODEL_ID").map(String::as_str), Some("org/model"));
        assert!(container.model_data_url().is_none());
    }

    #[test]
    fn archive_artifacts_use_model_data_url() {
        let container = container_definition(&artifacts_model("s3://bucket/model.tar.gz"));
        assert_eq!(container.model_data_url(), Some("s3://bucket/model.tar.gz"));
        assert!(container.model_data_source().is_none());
    }

    #[test]
    fn directory_artifacts_use_uncompressed_prefix() {
        let container = container_definition(&artifacts_model("s3://bucket/model"));
        let source = container.model_data_source().and_then(|source| source.s3_data_source()).unwrap();
        assert_eq!(source.s3_uri(), Some("s3://bucket/model/"));
        assert_eq!(source.s3_data_type(), Some(&S3ModelDataType::S3Prefix));
        assert_eq!(source.compression_type(), Some(&ModelCompressionType::None));
        assert!(container.model_data_url().is_none());
    }

    #[test]
    fn production_variant_carries_deployment_settings() {
        let deployment = Deployment::new("llama-endpoint".to_string(), "ml.g5.12xlarge".to_string());
        let variant = production_variant("llama-model", &deployment).unwrap();
        assert_eq!(variant.variant_name(), Some(VARIANT_NAME));
        assert_eq!(variant.model_name(), Some("llama-model"));
        assert_eq!(variant.initial_instance_count(), Some(1));
        assert_eq!(variant.instance_type().map(|t| t.as_str()), Some("ml.g5.12xlarge"));
        assert_eq!(variant.container_startup_health_check_timeout_in_seconds(), Some(1800));
        assert_eq!(variant.model_data_download_timeout_in_seconds(), Some(1200));
    }
}
