use std::fmt;

use crate::http::headers::Headers;
use crate::http::request::{Method, Request, UnknownMethod};
use crate::http::response::{Response, StatusCode, UnknownStatus};

/// A message that could not be decoded.
///
/// Every failure of [`parse_http_request`] and [`parse_http_response`]
/// collapses into this type; the variant carries the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Header block is not valid UTF-8
    InvalidEncoding,
    /// Title line has fewer than three space-separated tokens
    InvalidTitleLine(String),
    UnknownMethod(UnknownMethod),
    InvalidStatusCode(String),
    UnknownStatus(UnknownStatus),
    /// Repeated `Content-Length` headers with different values
    ConflictingContentLength,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidEncoding => write!(f, "malformed message: header block is not valid UTF-8"),
            ParseError::InvalidTitleLine(line) => write!(f, "malformed message: invalid title line {:?}", line),
            ParseError::UnknownMethod(e) => write!(f, "malformed message: {}", e),
            ParseError::InvalidStatusCode(code) => write!(f, "malformed message: invalid status code {:?}", code),
            ParseError::UnknownStatus(e) => write!(f, "malformed message: {}", e),
            ParseError::ConflictingContentLength => {
                write!(f, "malformed message: conflicting Content-Length headers")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::UnknownMethod(e) => Some(e),
            ParseError::UnknownStatus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UnknownMethod> for ParseError {
    fn from(e: UnknownMethod) -> Self {
        ParseError::UnknownMethod(e)
    }
}

impl From<UnknownStatus> for ParseError {
    fn from(e: UnknownStatus) -> Self {
        ParseError::UnknownStatus(e)
    }
}

/// Header block, title tokens and body of a message, before the title is
/// interpreted as a request or response.
struct RawMessage<'a> {
    title: [&'a str; 3],
    headers: Headers,
    body: &'a [u8],
}

/// Parses a raw HTTP request.
///
/// Everything after the first blank line is taken as the body; a buffer
/// without a blank line is all header block with an empty body.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let raw = split_message(buf)?;
    let [method, path, version] = raw.title;

    Ok(Request {
        method: method.parse::<Method>()?,
        path: path.to_string(),
        version: version.to_string(),
        headers: raw.headers,
        body: raw.body.to_vec(),
    })
}

/// Parses a raw HTTP response. The reason phrase on the wire is not checked
/// against the status table.
pub fn parse_http_response(buf: &[u8]) -> Result<Response, ParseError> {
    let raw = split_message(buf)?;
    let [version, code, _reason] = raw.title;

    let code: u16 = code
        .parse()
        .map_err(|_| ParseError::InvalidStatusCode(code.to_string()))?;

    Ok(Response {
        status: StatusCode::from_code(code)?,
        version: version.to_string(),
        headers: raw.headers,
        body: raw.body.to_vec(),
    })
}

/// Returns the `Content-Length` declared in a header block, if any.
///
/// Used by the connection to know how many body bytes to wait for. Header
/// lines are read exactly as [`parse_http_request`] reads them, so the value
/// found here is the one the handler sees. Repeated headers must agree;
/// a value that is not a number is treated as absent.
pub fn declared_content_length(header_block: &[u8]) -> Result<Option<usize>, ParseError> {
    let text = std::str::from_utf8(header_block).map_err(|_| ParseError::InvalidEncoding)?;

    let mut declared: Option<&str> = None;
    for (name, value) in header_lines(text) {
        if !name.eq_ignore_ascii_case("Content-Length") {
            continue;
        }
        let value = value.trim();
        match declared {
            Some(prev) if prev != value => return Err(ParseError::ConflictingContentLength),
            _ => declared = Some(value),
        }
    }

    Ok(declared.and_then(|v| v.parse().ok()))
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

fn split_message(buf: &[u8]) -> Result<RawMessage<'_>, ParseError> {
    let (header_bytes, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], &buf[end + 4..]),
        None => (buf, &buf[buf.len()..]),
    };

    let header_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidEncoding)?;

    let mut lines = header_str.split("\r\n");

    // split() always yields at least one item
    let title_line = lines.next().unwrap_or_default();
    let mut parts = title_line.splitn(3, ' ');
    let title = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c)) => [a, b, c],
        _ => return Err(ParseError::InvalidTitleLine(title_line.to_string())),
    };

    let headers: Headers = header_lines_after_title(lines).collect();

    Ok(RawMessage { title, headers, body })
}

/// `(name, value)` pairs of a header block, title line excluded.
fn header_lines(header_block: &str) -> impl Iterator<Item = (&str, &str)> {
    header_lines_after_title(header_block.split("\r\n").skip(1))
}

fn header_lines_after_title<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> impl Iterator<Item = (&'a str, &'a str)> {
    // Lines without ": " are skipped, not rejected
    lines.filter_map(|line| line.split_once(": "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn title_with_two_tokens_is_malformed() {
        let err = parse_http_request(b"GET /\r\n\r\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTitleLine(_)));
    }

    #[test]
    fn content_length_hint() {
        let block = b"POST / HTTP/1.1\r\nHost: a\r\ncontent-length:  12 ";
        assert_eq!(declared_content_length(block), Ok(Some(12)));
        assert_eq!(declared_content_length(b"GET / HTTP/1.1\r\nHost: a"), Ok(None));
        assert_eq!(declared_content_length(b"GET / HTTP/1.1\r\nContent-Length: x"), Ok(None));
    }

    #[test]
    fn content_length_hint_matches_parsed_headers() {
        // No space after the colon: not a header line for the parser either
        let block = b"POST / HTTP/1.1\r\nContent-Length:5";
        assert_eq!(declared_content_length(block), Ok(None));
        assert!(!parse_http_request(block).unwrap().headers.contains("Content-Length"));
    }

    #[test]
    fn repeated_content_length() {
        let same = b"POST / HTTP/1.1\r\nContent-Length: 5\r\ncontent-length: 5";
        assert_eq!(declared_content_length(same), Ok(Some(5)));

        let conflicting = b"POST / HTTP/1.1\r\nContent-Length: 5\r\nContent-Length: 50";
        assert_eq!(
            declared_content_length(conflicting),
            Err(ParseError::ConflictingContentLength)
        );
    }
}
