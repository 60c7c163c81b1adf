use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub sha: Option<String>,
    #[serde(default)]
    pub siblings: Vec<Sibling>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Sibling {
    pub rfilename: String,
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use framework::json;

    use super::*;

    #[test]
    fn model_info_parses_siblings_with_optional_size() {
        let info: ModelInfo = json::from_json(
            r#"{
                "id": "org/model",
                "sha": "abc123",
                "private": false,
                "siblings": [
                    {"rfilename": "config.json", "size": 612},
                    {"rfilename": "model.safetensors"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(info.sha.as_deref(), Some("abc123"));
        assert_eq!(info.siblings.len(), 2);
        assert_eq!(info.siblings[0].size, Some(612));
        assert_eq!(info.siblings[1].size, None);
    }
}
