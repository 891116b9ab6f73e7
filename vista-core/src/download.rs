//! Download action of the zoom overlay.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::info;
use url::Url;
use vista_model::{GalleryItem, GalleryItemId};

use crate::constants::download::DEFAULT_EXTENSION;
use crate::error::{GalleryError, Result};

/// Save the full-resolution asset of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub item_id: GalleryItemId,
    pub url: String,
    pub file_name: String,
}

impl DownloadRequest {
    /// `url` is the source currently rendered for the item.
    pub fn for_item(item: &GalleryItem, url: &str) -> Self {
        let stem = sanitize_file_stem(&item.title)
            .unwrap_or_else(|| item.id.as_str());
        let extension = extension_of(url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        Self {
            item_id: item.id,
            url: url.to_string(),
            file_name: format!("{stem}.{extension}"),
        }
    }
}

fn sanitize_file_stem(title: &str) -> Option<String> {
    let mut stem = String::with_capacity(title.len());
    let mut last_dash = false;
    for ch in title.trim().chars() {
        if ch.is_alphanumeric() {
            stem.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash && !stem.is_empty() {
            stem.push('-');
            last_dash = true;
        }
    }
    let stem = stem.trim_end_matches('-').to_string();
    (!stem.is_empty()).then_some(stem)
}

fn extension_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    (!ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .then_some(ext)
}

/// Fetches assets and writes them into a directory.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Client,
    dir: PathBuf,
}

impl AssetDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_client(Client::builder().build()?, dir))
    }

    pub fn with_client(client: Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path that was written.
    pub async fn download(&self, request: &DownloadRequest) -> Result<PathBuf> {
        let response = self.client.get(&request.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                status,
                url: request.url.clone(),
            });
        }
        let bytes = response.bytes().await?;
        self.write(request, &bytes).await
    }

    async fn write(&self, request: &DownloadRequest, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&request.file_name);
        tokio::fs::write(&path, bytes).await?;
        info!(
            id = %request.item_id,
            path = %path.display(),
            bytes = bytes.len(),
            "asset downloaded"
        );
        Ok(path)
    }
}
