//! Binary or referenced data (PHOTO, LOGO, SOUND, KEY).

/// The value of a data property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    /// Inline bytes.
    Bytes {
        /// Decoded content.
        data: Vec<u8>,
        /// MIME type, if known (e.g. `image/jpeg`).
        media_type: Option<String>,
    },
    /// A reference to external content.
    Uri(String),
    /// Free text (typically a KEY given as text).
    Text(String),
}

impl DataValue {
    /// Returns whether the value carries nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bytes { data, .. } => data.is_empty(),
            Self::Uri(s) | Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Returns the media type of inline bytes.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::Bytes { media_type, .. } => media_type.as_deref(),
            Self::Uri(_) | Self::Text(_) => None,
        }
    }
}

/// Legacy TYPE keywords of vCard 2.1/3.0 and their media types.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("JPEG", "image/jpeg"),
    ("JPG", "image/jpeg"),
    ("PNG", "image/png"),
    ("GIF", "image/gif"),
    ("BMP", "image/bmp"),
    ("TIFF", "image/tiff"),
    ("WEBP", "image/webp"),
    ("SVG", "image/svg+xml"),
    ("WAV", "audio/wav"),
    ("WAVE", "audio/wav"),
    ("MP3", "audio/mpeg"),
    ("OGG", "audio/ogg"),
    ("AAC", "audio/aac"),
    ("PGP", "application/pgp-keys"),
    ("X509", "application/pkix-cert"),
];

/// Maps a vCard 2.1/3.0 TYPE keyword such as `JPEG` to its media type.
#[must_use]
pub fn media_type_for_keyword(keyword: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
        .map(|(_, media)| *media)
}

/// Maps a media type to the TYPE keyword used by vCard 2.1/3.0.
///
/// Unknown media types fall back to their upper-cased subtype.
#[must_use]
pub fn keyword_for_media_type(media_type: &str) -> String {
    MEDIA_TYPES
        .iter()
        .find(|(_, media)| media.eq_ignore_ascii_case(media_type))
        .map_or_else(
            || {
                media_type
                    .rsplit('/')
                    .next()
                    .unwrap_or(media_type)
                    .to_ascii_uppercase()
            },
            |(keyword, _)| (*keyword).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_media_types() {
        assert_eq!(media_type_for_keyword("jpeg"), Some("image/jpeg"));
        assert_eq!(media_type_for_keyword("PNG"), Some("image/png"));
        assert_eq!(media_type_for_keyword("home"), None);
    }

    #[test]
    fn media_types_map_to_keywords() {
        assert_eq!(keyword_for_media_type("image/jpeg"), "JPEG");
        assert_eq!(keyword_for_media_type("image/x-icon"), "X-ICON");
    }

    #[test]
    fn empty_data() {
        assert!(DataValue::Bytes { data: Vec::new(), media_type: None }.is_empty());
        assert!(!DataValue::Uri("http://example.com/a.png".into()).is_empty());
    }
}
