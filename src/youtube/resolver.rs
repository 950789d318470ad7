//! Link/message resolver.
//!
//! Extracts a usable video URL from a chat message's rich-text entities
//! and normalizes links or bare video ids to a canonical form. Pure
//! functions over message data; network-free.

use once_cell::sync::Lazy;
use regex::Regex;
use teloxide::types::{Message, MessageEntityKind};

/// Canonical watch-URL prefix for bare video ids.
pub const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// Cached regex matching YouTube hosts
/// Compiled once at startup and reused for all requests
static YOUTUBE_HOST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:youtube\.com|youtu\.be)").expect("Failed to compile YouTube host regex"));

/// Whether the link points at a YouTube host.
pub fn is_youtube_link(link: &str) -> bool {
    YOUTUBE_HOST_REGEX.is_match(link)
}

/// Builds a canonical watch URL. When `bare_id` is set the input is a raw
/// video id and gets the watch-URL prefix; otherwise the link passes
/// through untouched.
pub fn canonical_watch_url(link: &str, bare_id: bool) -> String {
    if bare_id {
        format!("{}{}", WATCH_BASE, link)
    } else {
        link.to_string()
    }
}

/// Cuts everything from the first `&` — extra query parameters appended
/// after the primary video-id parameter.
pub fn strip_extra_params(link: &str) -> &str {
    link.split('&').next().unwrap_or(link)
}

/// Extracts the video id from a link: the `v=` query value when present
/// (truncated at the next `&`), otherwise the last `/`-separated segment.
/// A bare id comes back unchanged.
pub fn extract_video_id(link: &str) -> &str {
    if let Some((_, after)) = link.rsplit_once("v=") {
        strip_extra_params(after)
    } else {
        link.rsplit('/').next().unwrap_or(link)
    }
}

/// Scans a message (and then its reply target) for the first link-bearing
/// rich-text entity.
///
/// Per message, in order: a `Url`-kind entity over the text or caption —
/// the substring at the entity's offset/length span is returned verbatim;
/// then a `TextLink`-kind caption entity, whose embedded URL is returned.
/// The primary message always wins over the replied-to message.
pub fn url_from_message(msg: &Message) -> Option<String> {
    let candidates = std::iter::once(msg).chain(msg.reply_to_message());

    for m in candidates {
        if let Some(entities) = m.entities() {
            for entity in entities {
                if matches!(entity.kind, MessageEntityKind::Url) {
                    if let Some(text) = m.text().or_else(|| m.caption()) {
                        return Some(text[entity.offset..entity.offset + entity.length].to_string());
                    }
                }
            }
        }
        if let Some(entities) = m.caption_entities() {
            for entity in entities {
                if let MessageEntityKind::TextLink { url } = &entity.kind {
                    return Some(url.to_string());
                }
            }
        }
    }

    None
}
