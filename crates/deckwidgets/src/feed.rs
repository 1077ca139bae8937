//! Stream source resolution for the live feed viewer.
//!
//! Backends that play HLS natively get the URL as is. Every other backend goes
//! through [`HlsResolver`], which is only initialized the first time it is
//! needed. It reads the playlist and picks the stream to hand to the player.

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use strum::Display as StrumDisplay;
use thiserror::Error;

pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct StreamUrl(String);

crate::impl_string_newtype!(StreamUrl);

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HLS is not supported by the media backend")]
    Unsupported,
    #[error("Stream URL is empty")]
    EmptyUrl,
    #[error("Failed to load playlist: {0}")]
    Fetch(String),
    #[error("Playlist is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Not an HLS playlist (missing #EXTM3U header)")]
    MissingHeader,
    #[error("Playlist has no variants or segments")]
    Empty,
}

/// What the platform media backend can do with an HLS URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum MediaSupport {
    NativeHls,
    Decoder,
    Unsupported,
}

impl MediaSupport {
    /// Classifies a GTK media backend by the type name of its `MediaFile`
    /// implementation.
    pub fn from_backend_name(name: &str) -> Self {
        match name {
            "GtkGstMediaFile" => Self::NativeHls,
            "" | "GtkNoMediaFile" => Self::Unsupported,
            _ => Self::Decoder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackPath {
    /// Attach the URL to the video widget untouched.
    Direct(StreamUrl),
    /// Fetch the playlist and let the resolver choose the stream.
    Fallback(StreamUrl),
}

pub fn plan(url: &StreamUrl, support: MediaSupport) -> Result<PlaybackPath, FeedError> {
    if url.trim().is_empty() {
        return Err(FeedError::EmptyUrl);
    }
    match support {
        MediaSupport::NativeHls => Ok(PlaybackPath::Direct(url.clone())),
        MediaSupport::Decoder => Ok(PlaybackPath::Fallback(url.clone())),
        MediaSupport::Unsupported => Err(FeedError::Unsupported),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub bandwidth: u64,
    pub resolution: Option<(u32, u32)>,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playlist {
    Master(Vec<Variant>),
    Media { segments: usize },
}

impl Playlist {
    pub fn parse(text: &str) -> Result<Self, FeedError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        if lines.next() != Some("#EXTM3U") {
            return Err(FeedError::MissingHeader);
        }

        let mut variants = Vec::new();
        let mut pending: Option<(u64, Option<(u32, u32)>)> = None;
        let mut segments = 0;
        let mut media = false;

        for line in lines {
            if let Some(attrs) = line.strip_prefix("#EXT-X-STREAM-INF:") {
                let attrs = parse_attributes(attrs);
                let bandwidth = attr(&attrs, "BANDWIDTH")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                let resolution = attr(&attrs, "RESOLUTION").and_then(parse_resolution);
                pending = Some((bandwidth, resolution));
            } else if line.starts_with("#EXTINF") || line.starts_with("#EXT-X-TARGETDURATION") {
                media = true;
            } else if line.starts_with('#') {
                continue;
            } else if let Some((bandwidth, resolution)) = pending.take() {
                variants.push(Variant {
                    bandwidth,
                    resolution,
                    uri: line.to_string(),
                });
            } else if media {
                segments += 1;
            }
        }

        if !variants.is_empty() {
            Ok(Self::Master(variants))
        } else if media {
            Ok(Self::Media { segments })
        } else {
            Err(FeedError::Empty)
        }
    }
}

fn parse_attributes(list: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (i, c) in list.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                out.extend(split_pair(&list[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    out.extend(split_pair(&list[start..]));
    out
}

fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let (key, value) = pair.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"')))
}

fn attr<'a>(attrs: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn parse_resolution(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once(['x', 'X'])?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Resolves `reference` against the playlist URL it was found in.
pub fn resolve_uri(base: &str, reference: &str) -> String {
    if reference.contains("://") {
        return reference.to_string();
    }

    let base = base.split(['?', '#']).next().unwrap_or(base);

    if let Some(path) = reference.strip_prefix('/') {
        let origin_end = base
            .find("://")
            .and_then(|scheme| {
                base[scheme + 3..]
                    .find('/')
                    .map(|slash| scheme + 3 + slash)
            })
            .unwrap_or(base.len());
        return format!("{}/{}", &base[..origin_end], path);
    }

    match base.rfind('/') {
        Some(idx) if !base[..idx].ends_with('/') => format!("{}{}", &base[..=idx], reference),
        _ => format!("{}/{}", base.trim_end_matches('/'), reference),
    }
}

/// Fallback playlist handling for backends without native HLS support.
///
/// It only selects which playlist URL to hand to the player. It does no
/// segment fetching or decoding of its own.
#[derive(Debug, Default)]
pub struct HlsResolver {
    _private: (),
}

impl HlsResolver {
    /// Lazily initialized shared instance.
    pub fn shared() -> &'static HlsResolver {
        static RESOLVER: OnceLock<HlsResolver> = OnceLock::new();
        RESOLVER.get_or_init(|| {
            log::debug!("Initializing HLS fallback resolver");
            HlsResolver::default()
        })
    }

    /// Picks the stream to play from a fetched playlist body.
    ///
    /// Master playlists yield their highest-bandwidth variant; media
    /// playlists resolve to themselves.
    pub fn resolve(&self, url: &StreamUrl, body: &[u8]) -> Result<StreamUrl, FeedError> {
        let text = std::str::from_utf8(body)?;
        match Playlist::parse(text)? {
            Playlist::Master(variants) => variants
                .iter()
                .max_by_key(|v| v.bandwidth)
                .map(|best| StreamUrl::new(resolve_uri(url, &best.uri)))
                .ok_or(FeedError::Empty),
            Playlist::Media { .. } => Ok(url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360,CODECS=\"avc1.4d401e,mp4a.40.2\"
low/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2500000,RESOLUTION=1280x720,CODECS=\"avc1.4d401f,mp4a.40.2\"
mid/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=960x540
https://cdn.example.net/alt/index.m3u8
";

    const MEDIA: &str = "#EXTM3U
#EXT-X-TARGETDURATION:6
#EXTINF:6.0,
seg0.ts
#EXTINF:6.0,
seg1.ts
";

    #[test]
    fn test_parse_master_playlist() {
        let Playlist::Master(variants) = Playlist::parse(MASTER).unwrap() else {
            panic!("expected master playlist");
        };
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[1].bandwidth, 2_500_000);
        assert_eq!(variants[1].resolution, Some((1280, 720)));
        assert_eq!(variants[1].uri, "mid/index.m3u8");
    }

    #[test]
    fn test_parse_media_playlist() {
        assert_eq!(
            Playlist::parse(MEDIA).unwrap(),
            Playlist::Media { segments: 2 }
        );
    }

    #[test]
    fn test_rejects_non_playlists() {
        assert!(matches!(
            Playlist::parse("<html></html>"),
            Err(FeedError::MissingHeader)
        ));
        assert!(matches!(
            Playlist::parse("#EXTM3U\n#EXT-X-VERSION:3\n"),
            Err(FeedError::Empty)
        ));
    }

    #[test]
    fn test_resolver_picks_highest_bandwidth() {
        let url = StreamUrl::new("https://example.com/live/master.m3u8?token=abc");
        let resolved = HlsResolver::shared()
            .resolve(&url, MASTER.as_bytes())
            .unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/live/mid/index.m3u8");
    }

    #[test]
    fn test_resolver_keeps_media_playlist_url() {
        let url = StreamUrl::new("https://example.com/live/index.m3u8");
        let resolved = HlsResolver::shared().resolve(&url, MEDIA.as_bytes()).unwrap();
        assert_eq!(resolved, url);
    }

    #[test]
    fn test_resolver_rejects_invalid_utf8() {
        let url = StreamUrl::new("https://example.com/x.m3u8");
        assert!(matches!(
            HlsResolver::shared().resolve(&url, &[0xff, 0xfe, 0x00]),
            Err(FeedError::Utf8(_))
        ));
    }

    #[test]
    fn test_resolve_uri_forms() {
        let base = "https://example.com/a/b/master.m3u8";
        assert_eq!(resolve_uri(base, "v1.m3u8"), "https://example.com/a/b/v1.m3u8");
        assert_eq!(resolve_uri(base, "/root.m3u8"), "https://example.com/root.m3u8");
        assert_eq!(
            resolve_uri(base, "http://other.net/x.m3u8"),
            "http://other.net/x.m3u8"
        );
        assert_eq!(
            resolve_uri("https://example.com", "v1.m3u8"),
            "https://example.com/v1.m3u8"
        );
    }

    #[test]
    fn test_backend_classification() {
        assert_eq!(
            MediaSupport::from_backend_name("GtkGstMediaFile"),
            MediaSupport::NativeHls
        );
        assert_eq!(
            MediaSupport::from_backend_name("GtkFFMediaFile"),
            MediaSupport::Decoder
        );
        assert_eq!(
            MediaSupport::from_backend_name("GtkNoMediaFile"),
            MediaSupport::Unsupported
        );
    }

    #[test]
    fn test_plan_routes_by_support() {
        let url = StreamUrl::new("https://example.com/live.m3u8");
        assert_eq!(
            plan(&url, MediaSupport::NativeHls).unwrap(),
            PlaybackPath::Direct(url.clone())
        );
        assert_eq!(
            plan(&url, MediaSupport::Decoder).unwrap(),
            PlaybackPath::Fallback(url.clone())
        );
        assert!(matches!(
            plan(&url, MediaSupport::Unsupported),
            Err(FeedError::Unsupported)
        ));
        assert!(matches!(
            plan(&StreamUrl::new("  "), MediaSupport::NativeHls),
            Err(FeedError::EmptyUrl)
        ));
    }
}
