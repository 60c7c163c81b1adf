use std::str;

use anyhow::Context;
use anyhow::Result;
use framework::json;
use sagemaker::endpoint::EndpointClient;
use sagemaker::invoke_api::GenerationParameters;
use sagemaker::invoke_api::InvokeRequest;
use sagemaker::invoke_api::InvokeResponse;
use tracing::error;
use tracing::info;
use tracing::warn;

const CONTENT_TYPE: &str = "application/json";

pub struct TestCase {
    pub description: &'static str,
    pub prompt: &'static str,
}

pub const TEST_CASES: [TestCase; 5] = [
    TestCase {
        description: "Basic explanation request",
        prompt: "What is machine learning? Explain it in simple terms.",
    },
    TestCase {
        description: "Creative writing task",
        prompt: "Write a short story about a robot learning to paint.",
    },
    TestCase {
        description: "Technical explanation",
        prompt: "Explain the difference between supervised and unsupervised learning.",
    },
    TestCase {
        description: "Informational query",
        prompt: "What are the benefits of renewable energy?",
    },
    TestCase {
        description: "Code generation task",
        prompt: "Help me write a Python function to calculate factorial.",
    },
];

/// Single status check, no waiting. Describe failures count as not ready.
pub async fn check_endpoint_status<C>(client: &C, endpoint_name: &str) -> bool
where
    C: EndpointClient,
{
    let description = match client.describe_endpoint(endpoint_name).await {
        Ok(description) => description,
        Err(err) => {
            error!("failed to describe endpoint, error={err:#}");
            println!("Error describing endpoint: {err}");
            return false;
        }
    };

    println!("Endpoint Status: {}", description.status);
    if let Some(creation_time) = description.creation_time {
        println!("Creation Time: {creation_time}");
    }
    if let Some(config_name) = &description.config_name {
        println!("Endpoint Config: {config_name}");
    }

    if !description.is_in_service() {
        println!("Endpoint is not ready. Current status: {}", description.status);
        if let Some(reason) = &description.failure_reason {
            println!("Failure Reason: {reason}");
        }
        return false;
    }
    true
}

/// Returns the generated text, or `None` on any failure so the caller can move on.
pub async fn invoke<C>(client: &C, endpoint_name: &str, prompt: &str, parameters: &GenerationParameters) -> Option<String>
where
    C: EndpointClient,
{
    match generate(client, endpoint_name, prompt, parameters).await {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("failed to call endpoint, endpoint={endpoint_name}, error={err:#}");
            println!("Error calling endpoint: {err:#}");
            None
        }
    }
}

async fn generate<C>(client: &C, endpoint_name: &str, prompt: &str, parameters: &GenerationParameters) -> Result<String>
where
    C: EndpointClient,
{
    let request = InvokeRequest {
        inputs: prompt,
        parameters,
    };
    let body = client
        .invoke_endpoint(endpoint_name, CONTENT_TYPE, json::to_json(&request)?)
        .await?;
    let body = str::from_utf8(&body).context("response is not utf-8")?;
    let response: InvokeResponse = json::from_json(body)?;
    Ok(response.generated_text)
}

pub async fn run_test_cases<C>(client: &C, endpoint_name: &str, parameters: &GenerationParameters) -> Vec<Option<String>>
where
    C: EndpointClient,
{
    let mut results = Vec::with_capacity(TEST_CASES.len());
    for (index, test) in TEST_CASES.iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("Test {}: {}", index + 1, test.description);
        println!("Prompt: {}", test.prompt);
        println!("{}", "=".repeat(60));

        let generated_text = invoke(client, endpoint_name, test.prompt, parameters).await;
        println!("LLM Response: {}", generated_text.as_deref().unwrap_or("None"));
        println!("\n{}", "-".repeat(60));

        results.push(generated_text);
    }
    info!(
        "test cases finished, total={}, failed={}",
        results.len(),
        results.iter().filter(|result| result.is_none()).count()
    );
    results
}
