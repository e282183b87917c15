use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Build a `data:` URL embedding `bytes` as base64 under `content_type`.
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// Split a base64 `data:` URL back into its media type and decoded bytes.
pub fn parse_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    if media_type.is_empty() {
        return None;
    }
    let bytes = STANDARD.decode(payload).ok()?;
    Some((media_type.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_value() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn round_trips_binary_payload() {
        let bytes: Vec<u8> = (0..=255).collect();
        let url = to_data_url("image/jpeg", &bytes);

        assert_eq!(url, to_data_url("image/jpeg", &bytes));
        let (media_type, decoded) = parse_data_url(&url).unwrap();
        assert_eq!(media_type, "image/jpeg");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(parse_data_url("http://example.com/a.png").is_none());
        assert!(parse_data_url("data:image/png,plain").is_none());
        assert!(parse_data_url("data:;base64,aGk=").is_none());
        assert!(parse_data_url("data:image/png;base64,@@@").is_none());
    }
}
