use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use framework::fs::path::PathExt;
use framework::http_client::HTTP_CLIENT;
use framework::http_client::ResponseExt;
use framework::json;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::Url;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::allow_list::AllowList;
use crate::hub_api::ModelInfo;
use crate::hub_api::Sibling;

pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";
pub const DEFAULT_REVISION: &str = "main";

pub struct Hub {
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct SnapshotSummary {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl Hub {
    pub fn new(endpoint: Option<String>, token: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Hub {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Mirrors the allowed files of `repo_id` at `revision` into `local_dir` as regular files.
    pub async fn snapshot_download(
        &self,
        repo_id: &str,
        revision: &str,
        local_dir: &Path,
        allow_list: &AllowList,
    ) -> Result<SnapshotSummary> {
        fs::create_dir_all(local_dir)
            .await
            .with_context(|| format!("failed to create dir, path={}", local_dir.to_string_lossy()))?;

        let info = self.model_info(repo_id, revision).await?;
        let selected = allow_list.select(&info.siblings);
        info!(
            "snapshot, repo={repo_id}, revision={revision}, sha={}, files={}, selected={}",
            info.sha.as_deref().unwrap_or("unknown"),
            info.siblings.len(),
            selected.len()
        );

        // resolved commit, every file comes from one snapshot
        let revision = info.sha.as_deref().unwrap_or(revision);
        let mut summary = SnapshotSummary::default();
        for sibling in selected {
            let path = local_dir.join_relative(&sibling.rfilename)?;
            if is_complete(&path, sibling).await {
                debug!("skip existing file, path={}", path.to_string_lossy());
                summary.skipped.push(path);
                continue;
            }
            self.download_file(repo_id, revision, sibling, &path).await?;
            summary.downloaded.push(path);
        }
        Ok(summary)
    }

    async fn model_info(&self, repo_id: &str, revision: &str) -> Result<ModelInfo> {
        let url = self.model_info_url(repo_id, revision)?;
        let response = self.get(url).send().await?.error_for_status_with_body().await?;
        let text = response.text().await?;
        json::from_json(&text).with_context(|| format!("failed to read model info, repo={repo_id}"))
    }

    async fn download_file(&self, repo_id: &str, revision: &str, sibling: &Sibling, path: &Path) -> Result<()> {
        let url = self.file_url(repo_id, revision, &sibling.rfilename)?;
        info!("download file, url={url}, size={}", sibling.size.map_or("unknown".to_string(), |size| size.to_string()));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let response = self.get(url.clone()).send().await?.error_for_status_with_body().await?;
        let temp_path = path.append_extension("incomplete");
        let written = match write_body(response, &temp_path).await {
            Ok(written) => written,
            Err(err) => {
                remove_temp_file(&temp_path).await;
                return Err(err.context(format!("failed to download file, url={url}")));
            }
        };

        if let Some(size) = sibling.size.filter(|size| *size != written) {
            remove_temp_file(&temp_path).await;
            bail!("download incomplete, url={url}, expected={size}, actual={written}");
        }

        fs::rename(&temp_path, path)
            .await
            .with_context(|| format!("failed to move file, path={}", path.to_string_lossy()))?;
        Ok(())
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = HTTP_CLIENT.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn model_info_url(&self, repo_id: &str, revision: &str) -> Result<Url> {
        let segments = ["api", "models"]
            .into_iter()
            .chain(repo_id.split('/'))
            .chain(["revision", revision]);
        let mut url = self.url(segments)?;
        url.set_query(Some("blobs=true"));
        Ok(url)
    }

    fn file_url(&self, repo_id: &str, revision: &str, filename: &str) -> Result<Url> {
        let segments = repo_id.split('/').chain(["resolve", revision]).chain(filename.split('/'));
        self.url(segments)
    }

    // each segment is percent-encoded, a revision like refs/pr/1 stays one segment
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).with_context(|| format!("invalid hub endpoint, endpoint={}", self.endpoint))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid hub endpoint, endpoint={}", self.endpoint))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn write_body(mut response: Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path)
        .await
        .with_context(|| format!("failed to create file, path={}", path.to_string_lossy()))?;
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

async fn remove_temp_file(path: &Path) {
    if let Err(err) = fs::remove_file(path).await {
        warn!("failed to remove temp file, path={}, error={err}", path.to_string_lossy());
    }
}

// a file without a listed size is always fetched again
async fn is_complete(path: &Path, sibling: &Sibling) -> bool {
    match (fs::metadata(path).await, sibling.size) {
        (Ok(metadata), Some(size)) => metadata.is_file() && metadata.len() == size,
        _ => false,
    }
}
