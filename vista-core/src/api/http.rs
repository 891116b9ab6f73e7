use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;
use vista_model::{GalleryItem, GalleryPage};

use super::GallerySource;
use crate::constants::fetch;
use crate::error::{GalleryError, Result};

/// `GallerySource` backed by the gallery HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGallerySource {
    client: Client,
    base_url: String,
}

impl HttpGallerySource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = normalize_base_url(base_url.into());
        info!(%base_url, "gallery source configured");
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/v1/gallery?limit={limit}&order=display_order`
    pub fn page_url(&self, limit: usize) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, fetch::GALLERY_PATH))
            .map_err(|err| {
                GalleryError::InvalidConfig(format!(
                    "invalid gallery base url {}: {err}",
                    self.base_url
                ))
            })?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("order", "display_order");
        Ok(url)
    }
}

#[async_trait]
impl GallerySource for HttpGallerySource {
    async fn fetch_first(&self, limit: usize) -> Result<Vec<GalleryItem>> {
        let url = self.page_url(limit)?;
        debug!(%url, "fetching gallery page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        decode_page(&body)
    }
}

/// Decode a `{"items": [...]}` body.
pub fn decode_page(body: &[u8]) -> Result<Vec<GalleryItem>> {
    let page: GalleryPage = serde_json::from_slice(body)?;
    Ok(page.items)
}

/// Add `http://` when no scheme is given and trim trailing slashes so paths
/// can be appended directly.
fn normalize_base_url(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed
        } else {
            format!("http://{trimmed}")
        };
    if with_scheme != raw {
        warn!(original = %raw, normalized = %with_scheme, "normalized gallery base url");
    }
    with_scheme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_and_trailing_slash() {
        assert_eq!(
            normalize_base_url("localhost:3000/".into()),
            "http://localhost:3000"
        );
        assert_eq!(
            normalize_base_url("https://gallery.example".into()),
            "https://gallery.example"
        );
    }

    #[test]
    fn page_url_requests_first_page_in_display_order() {
        let source = HttpGallerySource::with_client(
            Client::new(),
            "https://gallery.example/",
        );
        let url = source.page_url(12).expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://gallery.example/api/v1/gallery?limit=12&order=display_order"
        );
    }

    #[test]
    fn decode_page_accepts_empty_and_missing_items() {
        assert!(decode_page(br#"{"items": []}"#).expect("decodes").is_empty());
        assert!(decode_page(b"{}").expect("decodes").is_empty());
        assert!(matches!(
            decode_page(b"not json"),
            Err(GalleryError::Decode(_))
        ));
    }
}
