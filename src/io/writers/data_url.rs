use base64::{Engine as _, engine::general_purpose};

use crate::error::{Error, Result};

/// `data:<mime>;base64,<payload>`
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let b64 = general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{b64}")
}

/// Decode a data URL, or a bare base64 payload, back to bytes.
/// Everything up to the first comma is treated as the header and dropped.
pub fn decode_data_url(data: &str) -> Result<Vec<u8>> {
    let data = data.trim();
    let payload = match data.split_once(',') {
        Some((_, payload)) => payload,
        None => data,
    };
    if payload.is_empty() {
        return Err(Error::EmptyUpload);
    }
    general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_stripped() {
        let url = to_data_url("image/png", b"\x89PNG");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), b"\x89PNG");
    }

    #[test]
    fn bare_payload_is_accepted() {
        assert_eq!(decode_data_url("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn empty_and_invalid_payloads_are_rejected() {
        assert!(matches!(decode_data_url(""), Err(Error::EmptyUpload)));
        assert!(matches!(decode_data_url("data:image/png;base64,"), Err(Error::EmptyUpload)));
        assert!(matches!(decode_data_url("data:,***"), Err(Error::Decode(_))));
    }
}
