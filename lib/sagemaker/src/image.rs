// bump manually when upgrading the LMI container
pub const LMI_CONTAINER_VERSION: &str = "0.33.0-lmi15.0.0-cu128";

const LMI_REGISTRY_ACCOUNT: &str = "763104351884";

/// DJL large model inference image with vLLM support, hosted in the regional ECR registry.
pub fn lmi_image_uri(region: &str) -> String {
    format!("{LMI_REGISTRY_ACCOUNT}.dkr.ecr.{region}.amazonaws.com/djl-inference:{LMI_CONTAINER_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lmi_image_uri_uses_region_and_pinned_version() {
        assert_eq!(
            lmi_image_uri("eu-west-2"),
            "763104351884.dkr.ecr.eu-west-2.amazonaws.com/djl-inference:0.33.0-lmi15.0.0-cu128"
        );
    }
}
