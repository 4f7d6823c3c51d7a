//! Photo feed for the gallery section.
//!
//! The gallery is the one section whose content comes from the network. The
//! build talks to it through the [`PhotoFeed`] trait so tests (and offline
//! builds) can swap in a stub. Whatever goes wrong, [`fetch_or_empty`] turns it
//! into an empty list and a warning: photos are supplementary, and a flaky
//! feed should never block a deploy.
//!
//! ## Wire Format
//!
//! A JSON array, or an object with a `photos` array:
//!
//! ```json
//! [
//!   { "url": "https://…/1.jpg",
//!     "exif": { "camera": "X100V", "focal_length": "23mm", "iso": 400 } }
//! ]
//! ```
//!
//! `exifMetadata` is accepted for `exif`, and numeric EXIF values are
//! stringified. Records without a URL are dropped.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid feed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// EXIF fields shown under a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exif {
    #[serde(deserialize_with = "lenient_string")]
    pub camera: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub lens: Option<String>,
    #[serde(alias = "focalLength", deserialize_with = "lenient_string")]
    pub focal_length: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub aperture: Option<String>,
    #[serde(alias = "shutterSpeed", deserialize_with = "lenient_string")]
    pub shutter: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub iso: Option<String>,
}

impl Exif {
    /// `X100V · 23mm · f/2 · 1/250 · ISO 400`, or `None` when nothing is known.
    pub fn summary(&self) -> Option<String> {
        let iso = self.iso.as_ref().map(|v| format!("ISO {v}"));
        let parts: Vec<&str> = [
            self.camera.as_deref(),
            self.lens.as_deref(),
            self.focal_length.as_deref(),
            self.aperture.as_deref(),
            self.shutter.as_deref(),
            iso.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(d)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// One photo record from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "exifMetadata")]
    pub exif: Exif,
}

impl Photo {
    pub fn alt_text(&self) -> String {
        match &self.exif.camera {
            Some(camera) => format!("Photograph taken with {camera}"),
            None => "Photograph".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedBody {
    List(Vec<Photo>),
    Wrapped { photos: Vec<Photo> },
}

/// Parse a feed response body.
pub fn parse_feed(json: &str) -> Result<Vec<Photo>, FeedError> {
    let photos = match serde_json::from_str::<FeedBody>(json)? {
        FeedBody::List(photos) | FeedBody::Wrapped { photos } => photos,
    };
    Ok(photos
        .into_iter()
        .filter(|p| !p.url.trim().is_empty())
        .collect())
}

/// Source of gallery photos.
pub trait PhotoFeed {
    fn fetch(&self) -> Result<Vec<Photo>, FeedError>;
}

/// Blocking HTTP GET with a request timeout.
pub struct HttpPhotoFeed {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpPhotoFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?,
            url: url.into(),
        })
    }
}

impl PhotoFeed for HttpPhotoFeed {
    fn fetch(&self) -> Result<Vec<Photo>, FeedError> {
        debug!(url = %self.url, "fetching photo feed");
        let resp = self.client.get(&self.url).send()?.error_for_status()?;
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        expect_json(content_type.as_deref())?;
        let text = resp.text()?;
        parse_feed(&text)
    }
}

/// Reject responses that declare a non-JSON body, such as a captive portal
/// or an HTML error page served with status 200. A missing header is allowed.
fn expect_json(content_type: Option<&str>) -> Result<(), FeedError> {
    match content_type {
        Some(ct) if !ct.to_ascii_lowercase().contains("json") => Err(FeedError::Unavailable(
            format!("expected a JSON response, got content type '{ct}'"),
        )),
        _ => Ok(()),
    }
}

/// A fixed list of photos. Used when the feed is disabled or offline
/// (empty list), and as a stub in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed(pub Vec<Photo>);

impl PhotoFeed for StaticFeed {
    fn fetch(&self) -> Result<Vec<Photo>, FeedError> {
        Ok(self.0.clone())
    }
}

/// Fetch photos, degrading any failure to an empty gallery.
pub fn fetch_or_empty(feed: &dyn PhotoFeed) -> Vec<Photo> {
    match feed.fetch() {
        Ok(photos) => {
            debug!(count = photos.len(), "photo feed loaded");
            photos
        }
        Err(e) => {
            warn!(error = %e, "photo feed unavailable; gallery will be empty");
            Vec::new()
        }
    }
}
