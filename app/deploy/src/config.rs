use anyhow::Result;
use anyhow::bail;
use sagemaker::model::ModelSpec;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct DeployConfig {
    pub region: String,
    pub role: String,
    pub instance_type: String,
    pub hf_model_id: Option<String>,
    pub bucket: Option<String>,
    pub model_artifacts: Option<String>,
}

impl DeployConfig {
    /// Hub id wins when present, otherwise weights come from `bucket` + `model_artifacts`.
    pub fn model_spec(&self, name: String, image_uri: String, token: Option<&str>) -> Result<ModelSpec> {
        if let Some(model_id) = &self.hf_model_id {
            return ModelSpec::from_hub(name, self.role.clone(), image_uri, model_id, token);
        }
        match (&self.bucket, &self.model_artifacts) {
            (Some(bucket), Some(model_artifacts)) => Ok(ModelSpec::from_artifacts(
                name,
                self.role.clone(),
                image_uri,
                bucket,
                model_artifacts,
            )),
            _ => bail!("config must set hf_model_id, or both bucket and model_artifacts"),
        }
    }
}
