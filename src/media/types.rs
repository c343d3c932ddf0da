use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Media categories a resolved format can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Photo,
    Audio,
    Document,
    Other,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Video,
        MediaType::Photo,
        MediaType::Audio,
        MediaType::Document,
        MediaType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Photo => "photo",
            MediaType::Audio => "audio",
            MediaType::Document => "document",
            MediaType::Other => "other",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaType::Video),
            "photo" => Ok(MediaType::Photo),
            "audio" => Ok(MediaType::Audio),
            "document" => Ok(MediaType::Document),
            "other" => Ok(MediaType::Other),
            _ => Err(()),
        }
    }
}

/// One format descriptor as emitted by the resolver. Only the fields the
/// classifier and filters read are modeled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    pub ext: Option<String>,
    pub resolution: Option<String>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    // yt-dlp emits exact sizes as integers and approximations as floats
    pub filesize: Option<f64>,
    pub filesize_approx: Option<f64>,
    pub url: Option<String>,
}

/// Resolver output for one URL: page metadata plus every available format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtraction {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// A format that survived classification and filtering, normalized for the
/// response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedAsset {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: Option<String>,
    pub resolution: Option<String>,
    pub has_audio: bool,
    pub filesize_bytes: Option<u64>,
    pub filesize_human: Option<String>,
    pub extension: Option<String>,
}

/// Final response payload: metadata plus the filtered assets, in the
/// resolver's original format order.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<f64>,
    pub files: Vec<ClassifiedAsset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_round_trip() {
        for media_type in MediaType::ALL {
            assert_eq!(media_type.as_str().parse::<MediaType>(), Ok(media_type));
        }
        assert_eq!("bogus".parse::<MediaType>(), Err(()));
        assert_eq!("Video".parse::<MediaType>(), Err(()));
    }

    #[test]
    fn test_media_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaType::Document).unwrap(),
            "\"document\""
        );
    }

    #[test]
    fn test_raw_extraction_tolerates_unknown_fields() {
        let raw: RawExtraction = serde_json::from_str(
            r#"{
                "title": "clip",
                "uploader": "someone",
                "formats": [
                    {"ext": "mp4", "vcodec": "avc1", "format_id": "22", "filesize": 1000}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.title.as_deref(), Some("clip"));
        assert_eq!(raw.formats.len(), 1);
        assert_eq!(raw.formats[0].filesize, Some(1000.0));
    }

    #[test]
    fn test_raw_extraction_missing_formats_defaults_empty() {
        let raw: RawExtraction = serde_json::from_str(r#"{"title": "clip"}"#).unwrap();
        assert!(raw.formats.is_empty());
    }
}
