use std::fmt;

use crate::http::headers::Headers;

macro_rules! status_codes {
    ($($(#[$doc:meta])* $variant:ident = ($code:literal, $reason:literal);)+) => {
        /// HTTP status codes known to the server.
        ///
        /// The table is closed: [`StatusCode::from_code`] rejects anything not
        /// listed here.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StatusCode {
            $($(#[$doc])* $variant,)+
        }

        impl StatusCode {
            pub const ALL: &'static [StatusCode] = &[$(StatusCode::$variant,)+];

            /// Returns the numeric HTTP status code.
            ///
            /// # Example
            ///
            /// ```
            /// # use wicket::http::response::StatusCode;
            /// assert_eq!(StatusCode::Ok.as_u16(), 200);
            /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
            /// ```
            pub fn as_u16(&self) -> u16 {
                match self {
                    $(StatusCode::$variant => $code,)+
                }
            }

            /// Returns the standard HTTP reason phrase for this status code.
            ///
            /// # Example
            ///
            /// ```
            /// # use wicket::http::response::StatusCode;
            /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
            /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
            /// ```
            pub fn reason_phrase(&self) -> &'static str {
                match self {
                    $(StatusCode::$variant => $reason,)+
                }
            }

            /// Looks up a status by its numeric code.
            pub fn from_code(code: u16) -> Result<Self, UnknownStatus> {
                match code {
                    $($code => Ok(StatusCode::$variant),)+
                    _ => Err(UnknownStatus(code)),
                }
            }
        }
    };
}

status_codes! {
    // 1xx Informational
    Continue = (100, "Continue");
    SwitchingProtocols = (101, "Switching Protocols");
    EarlyHints = (103, "Early Hints");
    // 2xx Success
    /// 200 OK
    Ok = (200, "OK");
    Created = (201, "Created");
    Accepted = (202, "Accepted");
    NonAuthoritativeInformation = (203, "Non-Authoritative Information");
    /// 204 No Content
    NoContent = (204, "No Content");
    ResetContent = (205, "Reset Content");
    PartialContent = (206, "Partial Content");
    MultiStatus = (207, "Multi-Status");
    ImUsed = (226, "IM Used");
    // 3xx Redirection
    MultipleChoices = (300, "Multiple Choices");
    MovedPermanently = (301, "Moved Permanently");
    Found = (302, "Found");
    SeeOther = (303, "See Other");
    NotModified = (304, "Not Modified");
    TemporaryRedirect = (307, "Temporary Redirect");
    PermanentRedirect = (308, "Permanent Redirect");
    // 4xx Client Error
    /// 400 Bad Request, returned for malformed requests
    BadRequest = (400, "Bad Request");
    Unauthorized = (401, "Unauthorized");
    PaymentRequired = (402, "Payment Required");
    Forbidden = (403, "Forbidden");
    /// 404 Not Found, returned when no route matches
    NotFound = (404, "Not Found");
    MethodNotAllowed = (405, "Method Not Allowed");
    NotAcceptable = (406, "Not Acceptable");
    ProxyAuthenticationRequired = (407, "Proxy Authentication Required");
    /// 408 Request Timeout, returned when a configured read timeout expires
    RequestTimeout = (408, "Request Timeout");
    Conflict = (409, "Conflict");
    Gone = (410, "Gone");
    LengthRequired = (411, "Length Required");
    PreconditionFailed = (412, "Precondition Failed");
    /// 413, returned when the body exceeds the configured limit
    PayloadTooLarge = (413, "Payload Too Large");
    UriTooLong = (414, "URI Too Long");
    UnsupportedMediaType = (415, "Unsupported Media Type");
    RangeNotSatisfiable = (416, "Range Not Satisfiable");
    ExpectationFailed = (417, "Expectation Failed");
    TooManyRequests = (429, "Too Many Requests");
    /// 431, returned when the header block exceeds the configured limit
    RequestHeaderFieldsTooLarge = (431, "Request Header Fields Too Large");
    UnavailableForLegalReasons = (451, "Unavailable For Legal Reasons");
    // 5xx Server Error
    /// 500, returned when a handler fails
    InternalServerError = (500, "Internal Server Error");
    NotImplemented = (501, "Not Implemented");
    BadGateway = (502, "Bad Gateway");
    ServiceUnavailable = (503, "Service Unavailable");
    GatewayTimeout = (504, "Gateway Timeout");
    HttpVersionNotSupported = (505, "HTTP Version Not Supported");
}

/// Returned when a numeric code is not in the [`StatusCode`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatus(pub u16);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status code: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP version written on the status line
    pub version: String,
    /// HTTP headers
    pub headers: Headers,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use wicket::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.headers.get("Content-Type"), Some("application/json"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    version: String,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: "HTTP/1.1".to_string(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` is not added here; the writer computes it when the
    /// response is serialized with a body.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a `text/plain` response with the given status and body.
    pub fn text(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(body)
            .build()
    }

    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Creates a 404 Not Found response reporting the requested path.
    pub fn not_found(path: &str) -> Self {
        Self::closing(StatusCode::NotFound, format!("404 Not Found: {}", path))
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::closing(StatusCode::BadRequest, "400 Bad Request")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::closing(StatusCode::InternalServerError, "500 Internal Server Error")
    }

    /// Creates a plain-text error response that announces connection close.
    pub fn closing(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .header("Connection", "close")
            .body(body)
            .build()
    }
}
