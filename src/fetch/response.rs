//! Response types and capped body reading.

use reqwest::header::HeaderMap;

/// A response received for one hop.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text, capped to the sniff limit. Only read for `200 OK`.
    pub body: Option<String>,
}

impl FetchedPage {
    /// True for any 3xx status.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// The `Location` header, if present and valid visible ASCII.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Reads at most `cap` bytes of the response body.
///
/// The body is consumed chunk by chunk and reading stops as soon as the cap is
/// reached, so an oversized response is never buffered in full.
pub(crate) async fn read_body_capped(
    mut response: reqwest::Response,
    cap: usize,
) -> Result<String, reqwest::Error> {
    let mut buf: Vec<u8> = Vec::with_capacity(cap.min(16 * 1024));
    while buf.len() < cap {
        match response.chunk().await? {
            Some(chunk) => {
                let take = (cap - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            None => break,
        }
    }
    Ok(decode_capped(buf))
}

/// Decodes a possibly truncated body. A multi-byte character cut by the cap is
/// dropped; other invalid sequences become U+FFFD.
pub(crate) fn decode_capped(mut bytes: Vec<u8>) -> String {
    if let Err(e) = std::str::from_utf8(&bytes) {
        if e.error_len().is_none() {
            bytes.truncate(e.valid_up_to());
        }
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(status: u16, location: Option<&str>) -> FetchedPage {
        let mut headers = HeaderMap::new();
        if let Some(loc) = location {
            headers.insert(
                reqwest::header::LOCATION,
                loc.parse().expect("valid header value"),
            );
        }
        FetchedPage {
            status,
            headers,
            body: None,
        }
    }

    #[test]
    fn test_is_redirect_range() {
        assert!(page(301, None).is_redirect());
        assert!(page(308, None).is_redirect());
        assert!(page(300, None).is_redirect());
        assert!(page(399, None).is_redirect());
        assert!(!page(200, None).is_redirect());
        assert!(!page(400, None).is_redirect());
    }

    #[test]
    fn test_location_header() {
        assert_eq!(page(302, Some("/next")).location(), Some("/next"));
        assert_eq!(page(302, Some("   ")).location(), None);
        assert_eq!(page(302, None).location(), None);
    }

    #[test]
    fn test_decode_capped_drops_cut_character() {
        // "é" is two bytes; keep only the first one
        let mut bytes = b"abc".to_vec();
        bytes.push(0xC3);
        assert_eq!(decode_capped(bytes), "abc");
    }

    #[test]
    fn test_decode_capped_replaces_invalid_bytes() {
        let bytes = vec![b'a', 0xFF, b'b'];
        assert_eq!(decode_capped(bytes), "a\u{FFFD}b");
    }

    #[test]
    fn test_decode_capped_plain_ascii() {
        assert_eq!(decode_capped(b"<html></html>".to_vec()), "<html></html>");
    }
}
