use reqwest::{header::HeaderMap, StatusCode};

use serde::Deserialize;

use serde_with::{serde_as, DefaultOnNull};

use std::fmt;

/// An HTTP response, as handed back by a [`Transport`](crate::client::Transport).
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The envelope every API response decodes into.
///
/// Missing and `null` fields take their default value and unknown fields are ignored.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResponseBody {
    #[serde_as(as = "DefaultOnNull")]
    pub success: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub backtrace: Vec<String>,
}

/// Parse the body of an API response. Only JSON responses are supported.
///
/// An empty body parses as the default envelope.
pub fn parse_body(body: &[u8]) -> Result<ResponseBody, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::default());
    }

    serde_json::from_slice(body)
}

/// Returns the error for an API response, or `None` if the call succeeded.
///
/// The API sometimes answers with an error status but a successful envelope; that is not
/// treated as an error.
pub fn response_error(status: StatusCode, body: &ResponseBody) -> Option<ResponseError> {
    if status.as_u16() < 400 || body.success {
        return None;
    }

    Some(ResponseError {
        status,
        body: body.clone(),
    })
}

/// How much of a [`ResponseError`] to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `HTTP <code> <reason>[: <message>]`.
    Short,
    /// The short form, followed by the whole envelope on an indented line.
    Detailed,
}

/// An error response from the API.
///
/// Two `ResponseError`s are equal when their status codes are; the envelope is left out of the
/// comparison. This is what makes
/// `err == ResponseError::THROTTLED` work regardless of the message the server sent back.
///
/// `Display` renders the [short](Verbosity::Short) form, or the [detailed](Verbosity::Detailed)
/// one with the alternate flag (`{:#}`).
#[derive(Debug, Clone)]
pub struct ResponseError {
    status: StatusCode,
    body: ResponseBody,
}

impl ResponseError {
    /// Matches any response error with a `429 Too Many Requests` status.
    pub const THROTTLED: ResponseError = ResponseError {
        status: StatusCode::TOO_MANY_REQUESTS,
        body: ResponseBody {
            success: false,
            message: String::new(),
            backtrace: Vec::new(),
        },
    };

    pub fn new(status: StatusCode, body: ResponseBody) -> Self {
        ResponseError { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Whether both errors are of the same kind, i.e. have the same status code.
    pub fn matches(&self, other: &ResponseError) -> bool {
        self.status == other.status
    }

    pub fn is_throttled(&self) -> bool {
        self.matches(&Self::THROTTLED)
    }

    pub fn render(&self, verbosity: Verbosity) -> String {
        match verbosity {
            Verbosity::Short => format!("{}", self),
            Verbosity::Detailed => format!("{:#}", self),
        }
    }
}

impl PartialEq for ResponseError {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for ResponseError {}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        )?;

        if !self.body.message.is_empty() {
            write!(f, ": {}", self.body.message)?;
        }

        if f.alternate() {
            write!(f, ":\n    {:?}", self.body)?;
        }

        Ok(())
    }
}

impl std::error::Error for ResponseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(message: &str) -> ResponseBody {
        ResponseBody {
            success: false,
            message: message.into(),
            backtrace: Vec::new(),
        }
    }

    #[test]
    fn parse_full_body() {
        let body = parse_body(
            br#"{"success": false, "message": "nope", "backtrace": ["a.rb:1", "b.rb:2"]}"#,
        )
        .unwrap();

        assert_eq!(
            body,
            ResponseBody {
                success: false,
                message: "nope".into(),
                backtrace: vec!["a.rb:1".into(), "b.rb:2".into()],
            }
        );
    }

    #[test]
    fn parse_partial_body() {
        let body = parse_body(br#"{"success": true, "id": 3, "post_id": 1234}"#).unwrap();

        assert_eq!(
            body,
            ResponseBody {
                success: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn parse_null_fields() {
        let body = parse_body(br#"{"success": false, "message": null, "backtrace": null}"#)
            .unwrap();
        assert_eq!(body, ResponseBody::default());

        let body = parse_body(br#"{"success": null, "message": "throttled"}"#).unwrap();
        assert_eq!(body, failure("throttled"));

        let err = response_error(StatusCode::TOO_MANY_REQUESTS, &body).unwrap();
        assert!(err.is_throttled());
    }

    #[test]
    fn parse_empty_body() {
        assert_eq!(parse_body(b"").unwrap(), ResponseBody::default());
        assert_eq!(parse_body(b" \n").unwrap(), ResponseBody::default());
    }

    #[test]
    fn parse_invalid_body() {
        assert!(parse_body(b"<html>oops</html>").is_err());
        assert!(parse_body(br#"{"success": "yes"}"#).is_err());
        assert!(parse_body(b"[1, 2]").is_err());
    }

    #[test]
    fn no_error_below_400() {
        for code in [200, 201, 204, 301, 302, 399] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(response_error(status, &failure("x")), None);
            assert_eq!(response_error(status, &ResponseBody::default()), None);
        }
    }

    #[test]
    fn no_error_on_successful_envelope() {
        let body = ResponseBody {
            success: true,
            ..Default::default()
        };

        for code in [400, 404, 429, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(response_error(status, &body), None);
        }
    }

    #[test]
    fn error_on_failed_envelope() {
        for code in [400, 404, 422, 429, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = response_error(status, &failure("x")).unwrap();
            assert_eq!(err.status(), status);
            assert_eq!(err.body(), &failure("x"));
        }
    }

    #[test]
    fn is_throttled() {
        let err = ResponseError::new(StatusCode::TOO_MANY_REQUESTS, failure("throttled"));

        assert!(err.is_throttled());
        assert_eq!(err, ResponseError::THROTTLED);
    }

    #[test]
    fn matching_ignores_envelope() {
        let a = ResponseError::new(StatusCode::TOO_MANY_REQUESTS, failure("one"));
        let b = ResponseError::new(StatusCode::TOO_MANY_REQUESTS, failure("two"));
        let c = ResponseError::new(StatusCode::INTERNAL_SERVER_ERROR, failure("one"));

        assert!(a.matches(&b));
        assert!(a.matches(&a));
        assert!(!a.matches(&c));
        assert_ne!(c, ResponseError::THROTTLED);
        assert!(!c.is_throttled());
    }

    #[test]
    fn short_format() {
        let err = ResponseError::new(StatusCode::INTERNAL_SERVER_ERROR, failure("blah"));
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: blah");

        let err = ResponseError::new(StatusCode::INTERNAL_SERVER_ERROR, failure(""));
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");

        assert_eq!(
            ResponseError::THROTTLED.render(Verbosity::Short),
            "HTTP 429 Too Many Requests"
        );
    }

    #[test]
    fn detailed_format() {
        assert_eq!(
            ResponseError::THROTTLED.render(Verbosity::Detailed),
            "HTTP 429 Too Many Requests:\n    \
             ResponseBody { success: false, message: \"\", backtrace: [] }"
        );

        let err = ResponseError::new(StatusCode::TOO_MANY_REQUESTS, failure("throttled"));
        assert_eq!(
            format!("{:#}", err),
            "HTTP 429 Too Many Requests: throttled:\n    \
             ResponseBody { success: false, message: \"throttled\", backtrace: [] }"
        );
    }
}
