//! Remote fetch client — two-phase download protocol.
//!
//! The remote API hands out media in two steps:
//! 1. `GET {base}/download?url={video_id}&type={audio|video}` returns a
//!    one-time `download_token` (bounded wait, 10s).
//! 2. `GET {base}/stream/{video_id}?type={audio|video}` with the token in
//!    the `X-Download-Token` header streams the file body (no timeout,
//!    downloads may be large).
//!
//! Each step is an explicit method so the Idle → Token-Acquired →
//! Streaming → Done progression is testable on its own; `download()`
//! drives both steps and collapses every failure to `None` after logging
//! the phase that broke. A partially written file from an interrupted
//! stream is left on disk.

use crate::core::config;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Media kind requested from the remote API.
///
/// Selects both the remote processing mode (`type` query parameter) and
/// the local file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Value of the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Local file extension for this kind.
    pub fn ext(self) -> &'static str {
        match self {
            MediaKind::Audio => "mp3",
            MediaKind::Video => "mp4",
        }
    }
}

/// Opaque one-time download credential issued by the remote API.
///
/// Valid for a single stream call; there is no local expiry tracking — a
/// stale token simply makes the stream phase fail.
#[derive(Debug, Clone)]
pub struct DownloadToken(String);

impl DownloadToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failure reasons inside the fetch client.
///
/// These never cross the `download()` boundary — they exist so logs can
/// tell a denied token from a broken stream, while callers only see an
/// absent artifact.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (connect, send, or mid-stream read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("remote API returned status {0}")]
    Status(reqwest::StatusCode),

    /// Token response had no usable `download_token`
    #[error("malformed token response")]
    MalformedToken,

    /// Local file I/O failure while writing the stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream reported success but the output file is not on disk
    #[error("stream finished but output file is missing")]
    MissingFile,
}

#[derive(Deserialize)]
struct PrepareResponse {
    download_token: Option<String>,
}

/// Client for the remote download API.
///
/// Stateless between calls: every download is a fresh token+stream
/// exchange, and concurrent downloads for the same video id are not
/// de-duplicated (the later one overwrites the file).
pub struct FetchClient {
    http: Client,
    base_url: String,
    download_dir: PathBuf,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client against the configured API base URL and download
    /// directory.
    pub fn new() -> Self {
        Self::with_base_url(config::API_BASE_URL.as_str(), config::DOWNLOAD_DIR.as_str())
    }

    /// Create a client against an explicit base URL and download
    /// directory. Used by tests to point at a mock server.
    pub fn with_base_url(base_url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
        // No overall request timeout: the stream phase must be allowed to
        // run as long as the download takes. The token phase gets its
        // bounded wait per-request in prepare().
        let http = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; melodika/0.3)")
            .connect_timeout(config::api::connect_timeout())
            .build()
            .expect("HTTP client build failed: user_agent + timeout config should always succeed");

        Self {
            http,
            base_url: base_url.into(),
            download_dir: download_dir.into(),
        }
    }

    /// Local output path for a video id and media kind: `{video_id}.{ext}`
    /// under the download directory. No collision handling — a repeat
    /// download for the same id and kind overwrites the previous file.
    pub fn output_path(&self, video_id: &str, kind: MediaKind) -> PathBuf {
        self.download_dir.join(format!("{}.{}", video_id, kind.ext()))
    }

    /// Phase 1: request a one-time download token for (video id, kind).
    pub async fn prepare(&self, video_id: &str, kind: MediaKind) -> Result<DownloadToken, FetchError> {
        let response = self
            .http
            .get(format!("{}/download", self.base_url))
            .query(&[("url", video_id), ("type", kind.as_str())])
            .timeout(config::api::token_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: PrepareResponse = response.json().await.map_err(|_| FetchError::MalformedToken)?;

        body.download_token
            .filter(|token| !token.is_empty())
            .map(DownloadToken)
            .ok_or(FetchError::MalformedToken)
    }

    /// Phase 2: stream the media body to `out_file`, presenting the token
    /// as a credential header. The file is created fresh and written
    /// chunk by chunk in binary mode; on a mid-stream failure whatever
    /// was written stays on disk.
    pub async fn stream_to_file(
        &self,
        video_id: &str,
        token: &DownloadToken,
        kind: MediaKind,
        out_file: &Path,
    ) -> Result<(), FetchError> {
        let response = self
            .http
            .get(format!("{}/stream/{}", self.base_url, video_id))
            .query(&[("type", kind.as_str())])
            .header("X-Download-Token", token.as_str())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let mut file = std::fs::File::create(out_file)?;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk)?;
        }

        file.flush()?;
        Ok(())
    }

    /// Full two-phase download for (video id, kind).
    ///
    /// Returns the local file path, or `None` on any failure — token
    /// denied, stream broken, or the file missing despite a reported
    /// success. Nothing is retried here; retries are the caller's call.
    pub async fn download(&self, video_id: &str, kind: MediaKind) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.download_dir) {
            log::error!("Cannot create download dir {}: {}", self.download_dir.display(), e);
            return None;
        }

        let out_file = self.output_path(video_id, kind);

        let token = match self.prepare(video_id, kind).await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Prepare phase failed for {} ({}): {}", video_id, kind.as_str(), e);
                return None;
            }
        };

        log::info!("📥 Streaming {} ({}) to {}", video_id, kind.as_str(), out_file.display());

        if let Err(e) = self.stream_to_file(video_id, &token, kind, &out_file).await {
            // Partial file stays where it is; ops policy decides cleanup
            log::warn!("Stream phase failed for {} ({}): {}", video_id, kind.as_str(), e);
            return None;
        }

        if !out_file.exists() {
            log::warn!("Stream reported success but {} is missing: {}", video_id, FetchError::MissingFile);
            return None;
        }

        log::info!("✅ Download complete: {}", out_file.display());
        Some(out_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_query_values() {
        assert_eq!(MediaKind::Audio.as_str(), "audio");
        assert_eq!(MediaKind::Video.as_str(), "video");
    }

    #[test]
    fn test_media_kind_extensions() {
        assert_eq!(MediaKind::Audio.ext(), "mp3");
        assert_eq!(MediaKind::Video.ext(), "mp4");
    }

    #[test]
    fn test_output_path_naming() {
        let client = FetchClient::with_base_url("http://localhost:0", "downloads");
        assert_eq!(
            client.output_path("dQw4w9WgXcQ", MediaKind::Audio),
            PathBuf::from("downloads/dQw4w9WgXcQ.mp3")
        );
        assert_eq!(
            client.output_path("dQw4w9WgXcQ", MediaKind::Video),
            PathBuf::from("downloads/dQw4w9WgXcQ.mp4")
        );
    }

    #[test]
    fn test_same_id_and_kind_map_to_same_path() {
        // Overwrite-on-repeat falls out of the deterministic naming
        let client = FetchClient::with_base_url("http://localhost:0", "downloads");
        assert_eq!(
            client.output_path("abc123", MediaKind::Video),
            client.output_path("abc123", MediaKind::Video)
        );
    }
}
