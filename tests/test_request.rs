use wicket::http::headers::Headers;
use wicket::http::request::{Method, Request, RequestBuilder, UnknownMethod};

fn request_with_headers(method: Method, headers: Headers) -> Request {
    Request {
        method,
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let headers: Headers = [("Host", "example.com"), ("Content-Type", "application/json")]
        .into_iter()
        .collect();
    let req = request_with_headers(Method::GET, headers);

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_method_equality() {
    assert_eq!(Method::GET, Method::GET);
    assert_ne!(Method::GET, Method::POST);
}

#[test]
fn test_request_method_from_string() {
    assert_eq!("GET".parse::<Method>(), Ok(Method::GET));
    assert_eq!("CONNECT".parse::<Method>(), Ok(Method::CONNECT));
    assert_eq!("TRACE".parse::<Method>(), Ok(Method::TRACE));
    assert_eq!(
        "INVALID".parse::<Method>(),
        Err(UnknownMethod("INVALID".to_string()))
    );
    assert!("get".parse::<Method>().is_err()); // Case-sensitive
}

#[test]
fn test_method_display_round_trips() {
    for method in Method::ALL {
        assert_eq!(method.to_string().parse::<Method>(), Ok(method));
    }
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::PUT)
        .path("/items/1")
        .header("Content-Type", "text/plain")
        .body("payload")
        .build()
        .unwrap();

    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.path, "/items/1");
    assert_eq!(req.version, "HTTP/1.1");
    assert_eq!(req.header("Content-Type"), Some("text/plain"));
    assert_eq!(req.body, b"payload".to_vec());
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_with_path_keeps_everything_else() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/api/info")
        .header("X-Trace", "1")
        .body("data")
        .build()
        .unwrap();

    let forwarded = req.clone().with_path("/info");

    assert_eq!(forwarded.path, "/info");
    assert_eq!(forwarded.method, req.method);
    assert_eq!(forwarded.version, req.version);
    assert_eq!(forwarded.headers, req.headers);
    assert_eq!(forwarded.body, req.body);
}

#[test]
fn test_headers_insert_replaces_in_place() {
    let mut headers = Headers::new();
    headers.insert("A", "1");
    headers.insert("B", "2");
    let old = headers.insert("a", "3");

    assert_eq!(old, Some("1".to_string()));
    assert_eq!(headers.len(), 2);
    let pairs: Vec<(&str, &str)> = headers.iter().collect();
    assert_eq!(pairs, vec![("a", "3"), ("B", "2")]);
}

#[test]
fn test_headers_remove() {
    let mut headers: Headers = [("A", "1"), ("B", "2")].into_iter().collect();

    assert_eq!(headers.remove("b"), Some("2".to_string()));
    assert_eq!(headers.remove("b"), None);
    assert!(!headers.contains("B"));
    assert!(headers.contains("A"));
}
