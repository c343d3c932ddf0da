use std::collections::HashSet;

use super::types::{ClassifiedAsset, ExtractionResult, MediaType, RawExtraction, RawFormat};
use super::utils::{human_readable_size, resolution_to_number};

const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "png", "webp"];
const DOCUMENT_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "ppt", "pptx"];

/// "none" is the resolver's sentinel for an absent codec.
fn codec_present(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if c != "none")
}

fn ext_in(ext: Option<&str>, list: &[&str]) -> bool {
    match ext {
        Some(ext) => list.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}

/// Assigns a media type to a raw format from its codecs and extension.
///
/// Extension overrides run after the codec checks, document last, so an
/// extension present in both override lists resolves to document. That
/// precedence is deliberate, not incidental.
pub fn classify(format: &RawFormat) -> MediaType {
    let mut detected = MediaType::Other;

    if codec_present(format.vcodec.as_deref()) {
        detected = MediaType::Video;
    } else if codec_present(format.acodec.as_deref()) {
        detected = MediaType::Audio;
    }

    if ext_in(format.ext.as_deref(), &PHOTO_EXTENSIONS) {
        detected = MediaType::Photo;
    }
    if ext_in(format.ext.as_deref(), &DOCUMENT_EXTENSIONS) {
        detected = MediaType::Document;
    }

    detected
}

/// Parses the comma-separated `media_type` request parameter.
///
/// Tokens are trimmed and case-folded; the first unrecognized token is
/// returned as the error so the caller can name it in the 400 response.
pub fn parse_media_types(raw: &str) -> Result<HashSet<MediaType>, String> {
    let mut types = HashSet::new();
    for token in raw.split(',') {
        let token = token.trim().to_ascii_lowercase();
        match token.parse::<MediaType>() {
            Ok(media_type) => {
                types.insert(media_type);
            }
            Err(()) => return Err(token),
        }
    }
    Ok(types)
}

/// The validated filter set for one request.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    pub media_types: HashSet<MediaType>,
    pub max_resolution: Option<u32>,
    pub max_file_size: Option<u64>,
    pub extension: Option<String>,
}

impl MediaFilter {
    /// Classifies and filters every format, preserving the resolver's order.
    pub fn apply(&self, raw: RawExtraction) -> ExtractionResult {
        let files = raw
            .formats
            .iter()
            .filter_map(|format| self.admit(format))
            .collect();

        ExtractionResult {
            title: raw.title,
            thumbnail: raw.thumbnail,
            duration: raw.duration,
            files,
        }
    }

    /// Runs one format through the filter chain. Filters apply in a fixed
    /// order (type, resolution, size, extension) and short-circuit on the
    /// first failure; resolution and size fail open on unknown values.
    fn admit(&self, format: &RawFormat) -> Option<ClassifiedAsset> {
        let detected = classify(format);

        if !self.media_types.contains(&detected) {
            return None;
        }

        if let Some(max) = self.max_resolution {
            if matches!(detected, MediaType::Video | MediaType::Photo) {
                if let Some(number) = format
                    .resolution
                    .as_deref()
                    .and_then(resolution_to_number)
                {
                    if number > max {
                        return None;
                    }
                }
            }
        }

        let size = format.filesize.or(format.filesize_approx);
        if let (Some(limit), Some(size)) = (self.max_file_size, size) {
            if size > limit as f64 {
                return None;
            }
        }

        if let Some(wanted) = self.extension.as_deref() {
            match format.ext.as_deref() {
                Some(ext) if ext.eq_ignore_ascii_case(wanted) => {}
                _ => return None,
            }
        }

        let size_bytes = size.map(|s| s as u64);
        Some(ClassifiedAsset {
            media_type: detected,
            url: format.url.clone(),
            resolution: format.resolution.clone(),
            has_audio: codec_present(format.acodec.as_deref()),
            filesize_bytes: size_bytes,
            filesize_human: human_readable_size(size_bytes),
            extension: format.ext.clone(),
        })
    }
}
