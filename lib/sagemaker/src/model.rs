use std::collections::BTreeMap;

use anyhow::Result;
use anyhow::ensure;

pub const HF_TASK: &str = "text-generation";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub name: String,
    pub role: String,
    pub image_uri: String,
    pub source: ModelSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    Hub { environment: BTreeMap<String, String> },
    Artifacts { s3_uri: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArtifactCompression {
    Gzip,
    None,
}

impl ModelSpec {
    /// Model pulled from the hub by the container at startup, served by the async vLLM entrypoint.
    pub fn from_hub(name: String, role: String, image_uri: String, model_id: &str, token: Option<&str>) -> Result<Self> {
        let token = token.unwrap_or_default();
        ensure!(!token.trim().is_empty(), "HF_TOKEN is required to deploy from hub, model_id={model_id}");

        Ok(ModelSpec {
            name,
            role,
            image_uri,
            source: ModelSource::Hub {
                environment: hub_environment(model_id, token),
            },
        })
    }

    pub fn from_artifacts(name: String, role: String, image_uri: String, bucket: &str, model_artifacts: &str) -> Self {
        ModelSpec {
            name,
            role,
            image_uri,
            source: ModelSource::Artifacts {
                s3_uri: format!("s3://{bucket}/{model_artifacts}"),
            },
        }
    }
}

impl ModelSource {
    pub fn describe(&self) -> String {
        match self {
            ModelSource::Hub { environment } => {
                format!("hub, model_id={}", environment.get("HF_MODEL_ID").map_or("", |id| id.as_str()))
            }
            ModelSource::Artifacts { s3_uri } => format!("artifacts, s3_uri={s3_uri}"),
        }
    }
}

pub fn artifact_compression(s3_uri: &str) -> ArtifactCompression {
    if s3_uri.ends_with(".tar.gz") {
        ArtifactCompression::Gzip
    } else {
        ArtifactCompression::None
    }
}

fn hub_environment(model_id: &str, token: &str) -> BTreeMap<String, String> {
    [
        ("HF_MODEL_ID", model_id),
        ("HF_TOKEN", token),
        ("HF_TASK", HF_TASK),
        ("SAGEMAKER_CONTAINER_LOG_LEVEL", "20"),
        ("OPTION_ASYNC_MODE", "true"),
        ("OPTION_ROLLING_BATCH", "disable"),
        ("OPTION_ENTRYPOINT", "djl_python.lmi_vllm.vllm_async_service"),
        ("TENSOR_PARALLEL_DEGREE", "max"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}
