use std::fmt;

use anyhow::Context;
use anyhow::Result;
use serde::Serialize;
use serde::de;

pub fn from_json<'a, T>(json: &'a str) -> Result<T>
where
    T: de::Deserialize<'a>,
{
    serde_json::from_str(json).with_context(|| format!("failed to deserialize, json={json}"))
}

pub fn to_json<T>(object: &T) -> Result<String>
where
    T: Serialize + fmt::Debug,
{
    serde_json::to_string(object).with_context(|| format!("failed to serialize, object={object:?}"))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Payload {
        inputs: String,
    }

    #[test]
    fn from_json_reports_the_offending_input() {
        let error = from_json::<Payload>("{\"outputs\": 1}").unwrap_err();
        assert!(format!("{error:#}").contains("json={\"outputs\": 1}"));
    }

    #[test]
    fn to_json_writes_compact_object() {
        let json = to_json(&Payload {
            inputs: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"inputs":"hi"}"#);
    }
}
