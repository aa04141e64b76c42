use crate::fingerprint::ContentFingerprint;

pub const FALLBACK_EXTENSION: &str = "jpg";

/// How an object key is derived from a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectNaming {
    /// `<hash>.jpg` whatever the image format is.
    #[default]
    FixedJpg,
    /// `<hash>.<ext>` with `ext` taken from the fetch's content type.
    FromContentType,
}

impl ObjectNaming {
    pub fn object_key(
        &self,
        fingerprint: &ContentFingerprint,
        content_type: Option<&str>,
    ) -> String {
        let extension = match self {
            ObjectNaming::FixedJpg => FALLBACK_EXTENSION,
            ObjectNaming::FromContentType => content_type
                .and_then(extension_for_content_type)
                .unwrap_or(FALLBACK_EXTENSION),
        };
        format!("{}.{}", fingerprint.as_hex(), extension)
    }
}

/// Maps an image MIME type (parameters allowed) to a file extension.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let extension = match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => return None,
    };
    Some(extension)
}
