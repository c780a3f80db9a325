use wicket::http::parser::{ParseError, parse_http_request, parse_http_response};
use wicket::http::request::Method;
use wicket::http::response::StatusCode;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/api");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_body_is_everything_after_blank_line() {
    // Content-Length is not used to cut the body while parsing
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 2\r\n\r\nhello\r\n\r\nworld";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hello\r\n\r\nworld".to_vec());
}

#[test]
fn test_parse_multiple_headers_keep_order() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    let names: Vec<&str> = parsed.headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Host", "User-Agent", "Accept"]);
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_without_blank_line_has_empty_body() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_unknown_method() {
    let req = b"FETCH /x HTTP/1.1\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::UnknownMethod(_))));
}

#[test]
fn test_parse_lowercase_method_is_unknown() {
    let result = parse_http_request(b"get / HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::UnknownMethod(_))));
}

#[test]
fn test_parse_title_line_with_two_tokens() {
    let result = parse_http_request(b"GET /\r\nHost: a\r\n\r\n");
    assert!(matches!(result, Err(ParseError::InvalidTitleLine(_))));
}

#[test]
fn test_parse_empty_buffer() {
    assert!(matches!(parse_http_request(b""), Err(ParseError::InvalidTitleLine(_))));
}

#[test]
fn test_parse_invalid_utf8_header_block() {
    let result = parse_http_request(b"GET /\xff HTTP/1.1\r\n\r\n");
    assert!(matches!(result, Err(ParseError::InvalidEncoding)));
}

#[test]
fn test_parse_malformed_header_is_skipped() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nNoSpace:value\r\nHost: ok\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("Host").unwrap(), "ok");
}

#[test]
fn test_parse_header_value_keeps_further_separators() {
    let req = b"GET / HTTP/1.1\r\nX-Pair: a: b\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("X-Pair").unwrap(), "a: b");
}

#[test]
fn test_parse_various_http_methods() {
    for expected_method in Method::ALL {
        let req = format!("{} / HTTP/1.1\r\n\r\n", expected_method);
        let parsed = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\xff\x03";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 255, 3]);
}

#[test]
fn test_parse_response() {
    let resp = b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\nnope";
    let parsed = parse_http_response(resp).unwrap();

    assert_eq!(parsed.status, StatusCode::NotFound);
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(parsed.body, b"nope".to_vec());
}

#[test]
fn test_parse_response_reason_phrase_not_checked() {
    let parsed = parse_http_response(b"HTTP/1.0 200 Fine Thanks\r\n\r\n").unwrap();
    assert_eq!(parsed.status, StatusCode::Ok);
    assert_eq!(parsed.version, "HTTP/1.0");
}

#[test]
fn test_parse_response_unknown_status() {
    let result = parse_http_response(b"HTTP/1.1 299 Whatever\r\n\r\n");
    assert!(matches!(result, Err(ParseError::UnknownStatus(_))));
}

#[test]
fn test_parse_response_non_numeric_status() {
    let result = parse_http_response(b"HTTP/1.1 abc Whatever\r\n\r\n");
    assert!(matches!(result, Err(ParseError::InvalidStatusCode(_))));
}

#[test]
fn test_parse_error_display_mentions_cause() {
    let err = parse_http_request(b"FETCH /x HTTP/1.1\r\n\r\n").unwrap_err();
    let msg = err.to_string();

    assert!(msg.starts_with("malformed message"));
    assert!(msg.contains("FETCH"));
}
