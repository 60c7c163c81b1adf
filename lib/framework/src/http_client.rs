use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Response;

// no overall timeout, weight files can take a long time to stream
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(300))
        .user_agent(concat!("llm-endpoint-tools/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap()
});

#[allow(async_fn_in_trait)]
pub trait ResponseExt: Sized {
    async fn error_for_status_with_body(self) -> anyhow::Result<Self>;
}

impl ResponseExt for Response {
    async fn error_for_status_with_body(self) -> anyhow::Result<Self> {
        let status = self.status();
        if !status.is_success() {
            let url = self.url().to_string();
            let text = self.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("failed to call api, url={url}, status={status}, response={text}"));
        }
        Ok(self)
    }
}
