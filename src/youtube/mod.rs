//! YouTube resolution and metadata surface.
//!
//! `YouTubeApi` is the facade the bot layer talks to: it resolves links
//! or queries into metadata via the search backend and fetches media
//! files via the two-phase remote download client. Every operation
//! reports failure as absence; backend errors never escape this module.

pub mod resolver;
pub mod search;

use crate::core::formatters::time_to_seconds;
use crate::fetch::{FetchClient, MediaKind};
use search::{SearchClient, SearchHit};
use std::path::PathBuf;

/// Metadata for a resolved video.
#[derive(Debug, Clone)]
pub struct VideoDetails {
    /// Video id
    pub id: String,
    /// Video title
    pub title: String,
    /// Duration string as reported by the search backend, e.g. "4:33"
    pub duration: String,
    /// Duration converted to seconds (0 when unknown)
    pub duration_secs: u64,
    /// Thumbnail URL
    pub thumbnail: String,
}

/// A playable track resolved from a link or search query.
#[derive(Debug, Clone)]
pub struct Track {
    pub title: String,
    /// Canonical watch URL
    pub link: String,
    pub video_id: String,
    /// Duration string, e.g. "4:33"
    pub duration: String,
    pub thumbnail: String,
}

/// Thumbnail URL for a video id.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id)
}

/// Facade over search lookup and remote fetching.
pub struct YouTubeApi {
    search: SearchClient,
    fetch: FetchClient,
}

impl Default for YouTubeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeApi {
    /// Create the facade against the configured remote API.
    pub fn new() -> Self {
        Self {
            search: SearchClient::new(),
            fetch: FetchClient::new(),
        }
    }

    /// Create the facade from explicit clients. Used by tests to point at
    /// mock servers.
    pub fn with_clients(search: SearchClient, fetch: FetchClient) -> Self {
        Self { search, fetch }
    }

    /// Whether the link (or bare id, when `bare_id` is set) refers to a
    /// YouTube video.
    pub fn exists(&self, link: &str, bare_id: bool) -> bool {
        resolver::is_youtube_link(&resolver::canonical_watch_url(link, bare_id))
    }

    async fn lookup(&self, link: &str, bare_id: bool) -> Option<SearchHit> {
        let link = resolver::canonical_watch_url(link, bare_id);
        let link = resolver::strip_extra_params(&link);
        self.search.search_first(link).await
    }

    /// Full metadata for a link or bare id.
    pub async fn details(&self, link: &str, bare_id: bool) -> Option<VideoDetails> {
        let hit = self.lookup(link, bare_id).await?;

        Some(VideoDetails {
            duration_secs: time_to_seconds(Some(&hit.duration)),
            thumbnail: thumbnail_url(&hit.id),
            id: hit.id,
            title: hit.title,
            duration: hit.duration,
        })
    }

    /// Title only.
    pub async fn title(&self, link: &str, bare_id: bool) -> Option<String> {
        Some(self.lookup(link, bare_id).await?.title)
    }

    /// Duration string only.
    pub async fn duration(&self, link: &str, bare_id: bool) -> Option<String> {
        Some(self.lookup(link, bare_id).await?.duration)
    }

    /// Thumbnail URL only.
    pub async fn thumbnail(&self, link: &str, bare_id: bool) -> Option<String> {
        let hit = self.lookup(link, bare_id).await?;
        Some(thumbnail_url(&hit.id))
    }

    /// Resolve a free-text query or link into a playable track.
    pub async fn track(&self, query: &str) -> Option<Track> {
        let hit = self.search.search_first(query).await?;

        Some(Track {
            thumbnail: thumbnail_url(&hit.id),
            video_id: hit.id,
            title: hit.title,
            link: hit.url,
            duration: hit.duration,
        })
    }

    /// Download the media behind a link or bare id.
    ///
    /// Returns the local file path (`{video_id}.mp3` or `.mp4` under the
    /// download directory), or `None` on any failure. Failures are logged
    /// by the fetch client; callers only learn that no artifact exists.
    pub async fn download(&self, link: &str, video: bool, bare_id: bool) -> Option<PathBuf> {
        let link = resolver::canonical_watch_url(link, bare_id);
        let link = resolver::strip_extra_params(&link);
        let video_id = resolver::extract_video_id(link);

        let kind = if video { MediaKind::Video } else { MediaKind::Audio };
        self.fetch.download(video_id, kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_against(server_uri: &str) -> YouTubeApi {
        YouTubeApi::with_clients(
            SearchClient::with_base_url(server_uri),
            FetchClient::with_base_url(server_uri, "downloads"),
        )
    }

    #[test]
    fn test_exists_accepts_links_and_bare_ids() {
        let api = YouTubeApi::with_clients(
            SearchClient::with_base_url("http://localhost:0"),
            FetchClient::with_base_url("http://localhost:0", "downloads"),
        );

        assert!(api.exists("https://www.youtube.com/watch?v=dQw4w9WgXcQ", false));
        assert!(api.exists("https://youtu.be/dQw4w9WgXcQ", false));
        assert!(api.exists("dQw4w9WgXcQ", true));
        assert!(!api.exists("https://example.com/video", false));
        assert!(!api.exists("dQw4w9WgXcQ", false));
    }

    #[test]
    fn test_thumbnail_url_shape() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ"),
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[tokio::test]
    async fn test_details_strips_extra_params_before_lookup() {
        let server = MockServer::start().await;

        // The mock only answers the stripped link; extra params leaking
        // through would 404 and surface as None.
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "dQw4w9WgXcQ",
                    "title": "Rick Astley - Never Gonna Give You Up",
                    "duration": "3:33",
                    "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
                }
            ])))
            .mount(&server)
            .await;

        let api = api_against(&server.uri());
        let details = api
            .details("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL123&t=42", false)
            .await
            .unwrap();

        assert_eq!(details.id, "dQw4w9WgXcQ");
        assert_eq!(details.duration, "3:33");
        assert_eq!(details.duration_secs, 213);
        assert_eq!(details.thumbnail, "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");
    }

    #[tokio::test]
    async fn test_track_resolves_free_text_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rick astley"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "dQw4w9WgXcQ",
                    "title": "Rick Astley - Never Gonna Give You Up",
                    "duration": "3:33",
                    "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
                }
            ])))
            .mount(&server)
            .await;

        let api = api_against(&server.uri());
        let track = api.track("rick astley").await.unwrap();

        assert_eq!(track.video_id, "dQw4w9WgXcQ");
        assert_eq!(track.link, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(track.thumbnail, "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");
    }

    #[tokio::test]
    async fn test_track_miss_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let api = api_against(&server.uri());
        assert!(api.track("no such song").await.is_none());
    }
}
