use anyhow::Result;
use chrono::DateTime;
use chrono::Utc;

pub const IN_SERVICE: &str = "InService";

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescription {
    pub name: String,
    pub status: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub config_name: Option<String>,
    pub failure_reason: Option<String>,
}

impl EndpointDescription {
    // Creating, Updating, Failed, Deleting and anything else are all "not ready"
    pub fn is_in_service(&self) -> bool {
        self.status == IN_SERVICE
    }
}

/// Read side of a deployed endpoint: status lookup and JSON invocation.
#[allow(async_fn_in_trait)]
pub trait EndpointClient {
    async fn describe_endpoint(&self, endpoint_name: &str) -> Result<EndpointDescription>;

    async fn invoke_endpoint(&self, endpoint_name: &str, content_type: &str, body: String) -> Result<Vec<u8>>;
}
