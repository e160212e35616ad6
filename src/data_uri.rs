//! `data:` URI encoding for image payloads.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::AppError;

/// Encodes bytes as `data:{content_type};base64,{payload}`.
pub fn encode(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDataUri {
    /// Media type from the header, if one was given.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decodes a base64 `data:` URI.
///
/// Bare base64 without the `data:` header is accepted too, since some
/// records were stored without one.
pub fn decode(uri: &str) -> Result<DecodedDataUri, AppError> {
    let trimmed = uri.trim();

    let (content_type, payload) = match trimmed.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| AppError::Validation("data URI has no payload".to_string()))?;
            let media = header.strip_suffix(";base64").ok_or_else(|| {
                AppError::Validation("only base64 data URIs are supported".to_string())
            })?;
            let media = media.split(';').next().unwrap_or_default();
            let content_type = (!media.is_empty()).then(|| media.to_string());
            (content_type, payload)
        }
        None => (None, trimmed),
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::Validation(format!("invalid base64 image data: {}", e)))?;

    Ok(DecodedDataUri {
        content_type,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_prefix() {
        assert_eq!(encode("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_decode_with_header() {
        let decoded = decode("data:image/gif;base64,R0lGOA==").unwrap();
        assert_eq!(decoded.content_type.as_deref(), Some("image/gif"));
        assert_eq!(decoded.bytes, b"GIF8");
    }

    #[test]
    fn test_decode_with_charset_parameter() {
        let decoded = decode("data:image/svg+xml;charset=utf-8;base64,PHN2Zy8+").unwrap();
        assert_eq!(decoded.content_type.as_deref(), Some("image/svg+xml"));
        assert_eq!(decoded.bytes, b"<svg/>");
    }

    #[test]
    fn test_decode_bare_base64() {
        let decoded = decode("aGk=").unwrap();
        assert_eq!(decoded.content_type, None);
        assert_eq!(decoded.bytes, b"hi");
    }

    #[test]
    fn test_decode_rejects_non_base64_uri() {
        assert!(decode("data:text/plain,hello").is_err());
        assert!(decode("data:image/png;base64").is_err());
        assert!(decode("data:image/png;base64,@@@").is_err());
    }
}
