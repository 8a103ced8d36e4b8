//! Minimal `multipart/form-data` extraction for file uploads
//!
//! Only what the import endpoint needs: find one named part and return its
//! raw bytes. Parts are expected to be CRLF-delimited as browsers and HTTP
//! clients send them.

/// Error type for multipart extraction
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MultipartError {
    #[error("Missing multipart boundary")]
    MissingBoundary,

    #[error("No `{0}` part in upload")]
    MissingField(String),

    #[error("Malformed multipart body")]
    Malformed,
}

/// Boundary parameter of a `multipart/form-data` content type
pub fn boundary(content_type: &str) -> Option<String> {
    let mut params = content_type.split(';');
    let mime = params.next()?.trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }

    params.map(str::trim).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Bytes of the part whose `Content-Disposition` carries `name="<field>"`
pub fn extract_field(body: &[u8], boundary: &str, field: &str) -> Result<Vec<u8>, MultipartError> {
    let delimiter = format!("--{boundary}").into_bytes();
    let mut closing = b"\r\n".to_vec();
    closing.extend_from_slice(&delimiter);

    let first = find(body, &delimiter, 0).ok_or(MultipartError::Malformed)?;
    let mut pos = first + delimiter.len();

    loop {
        // "--" right after a delimiter closes the body
        if body[pos..].starts_with(b"--") {
            return Err(MultipartError::MissingField(field.to_string()));
        }
        let line_end = find(body, b"\r\n", pos).ok_or(MultipartError::Malformed)?;
        let headers_start = line_end + 2;
        let headers_end = find(body, b"\r\n\r\n", headers_start).ok_or(MultipartError::Malformed)?;
        let content_start = headers_end + 4;
        let content_end = find(body, &closing, content_start).ok_or(MultipartError::Malformed)?;

        let headers = String::from_utf8_lossy(&body[headers_start..headers_end]);
        if part_name(&headers).as_deref() == Some(field) {
            return Ok(body[content_start..content_end].to_vec());
        }

        pos = content_end + closing.len();
    }
}

/// `name` parameter of a part's Content-Disposition header
fn part_name(headers: &str) -> Option<String> {
    let disposition = headers.split("\r\n").find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case("content-disposition")
            .then_some(value)
    })?;

    disposition.split(';').map(str::trim).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("name")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
