//! Resolving the configured source into a direct archive URL.
//!
//! Yandex Disk public links are not downloadable as-is: the public resources
//! API answers `GET <api>?public_key=<link>` with a JSON body whose `href` is a
//! short-lived direct URL for the archive.

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::config::{GridConfig, SourceKind};
use crate::fetch;

#[derive(Debug, Deserialize)]
struct DownloadLink {
    href: Option<String>,
}

/// Builds the API request URL for a public share link.
pub fn api_request_url(api_base: &str, public_url: &str) -> Result<Url> {
    Url::parse_with_params(api_base, &[("public_key", public_url)])
        .with_context(|| format!("invalid API base URL: {}", api_base))
}

/// Extracts the `href` from the API response body.
pub fn parse_href(body: &[u8]) -> Result<String> {
    let link: DownloadLink =
        serde_json::from_slice(body).context("download link response is not valid JSON")?;
    match link.href {
        Some(href) if !href.trim().is_empty() => Ok(href),
        _ => anyhow::bail!("download link response has no href"),
    }
}

/// Returns the URL the archive should be fetched from.
pub fn resolve_download_url(cfg: &GridConfig) -> Result<String> {
    match cfg.source {
        SourceKind::Direct => {
            let url = Url::parse(&cfg.source_url)
                .with_context(|| format!("invalid archive URL: {}", cfg.source_url))?;
            Ok(url.into())
        }
        SourceKind::YandexPublic => {
            let request = api_request_url(&cfg.yandex_api_base, &cfg.source_url)?;
            tracing::debug!(%request, "resolving public link");
            let body = fetch::get_bytes(request.as_str(), &cfg.fetch_config())
                .context("download link request failed")?;
            let href = parse_href(&body)?;
            tracing::info!("resolved {} to a direct download URL", cfg.source_url);
            Ok(href)
        }
    }
}
