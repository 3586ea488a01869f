use base64::{engine::general_purpose::STANDARD, Engine as _};

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method,
};

use serde::Serialize;

use std::time::Duration;

use url::Url;

use crate::client::AuthInfo;

/// An HTTP request for an API call, built but not yet sent.
///
/// Requests are built fresh for every call and handed over to a
/// [`Transport`](crate::client::Transport).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Deadline for the whole exchange, enforced by the transport.
    pub timeout: Option<Duration>,
}

/// A request body.
///
/// Bodies that know their media type override [`RequestBody::content_type`], in which case the
/// request gets a matching `Content-Type` header.
pub trait RequestBody {
    fn into_bytes(self) -> Vec<u8>;

    fn content_type(&self) -> Option<&str> {
        None
    }
}

impl RequestBody for Vec<u8> {
    fn into_bytes(self) -> Vec<u8> {
        self
    }
}

impl RequestBody for String {
    fn into_bytes(self) -> Vec<u8> {
        self.into_bytes()
    }
}

/// A JSON-encoded request body, tagged as `application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody(Vec<u8>);

impl JsonBody {
    /// Encode `value` as JSON.
    ///
    /// # Panics
    ///
    /// Panics if `value` can't be represented as JSON. Only the crate's own request shapes go
    /// through here, so this would be a bug in the crate.
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => JsonBody(bytes),
            Err(e) => panic!("couldn't encode JSON body: {}", e),
        }
    }

    /// Body for endpoints taking a single post: `{"post_id": <id>}`.
    pub fn post_id(id: PostId) -> Self {
        #[derive(Serialize)]
        struct Body {
            post_id: PostId,
        }

        JsonBody::new(&Body { post_id: id })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl RequestBody for JsonBody {
    fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    fn content_type(&self) -> Option<&str> {
        Some("application/json")
    }
}

/// The ID of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        PostId(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Value of the `Authorization` header for HTTP Basic authentication.
fn basic_auth(login: &str, api_key: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{}:{}", login, api_key));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .unwrap_or_else(|e| panic!("invalid basic auth header: {}", e));
    value.set_sensitive(true);
    value
}

/// Build a request for `https://<host><path>`.
///
/// The request is authenticated with `auth` when both its login and API key are set. If `body`
/// declares a content type, it is sent as the `Content-Type` header.
///
/// # Panics
///
/// Panics if `host` and `path` don't make up a valid URL. Hosts are checked when the client is
/// created and paths are fixed by the crate, so this would be a bug in the crate.
pub(crate) fn build_request<B: RequestBody>(
    host: &str,
    auth: Option<&AuthInfo>,
    method: Method,
    path: &str,
    body: Option<B>,
) -> Request {
    let url = match Url::parse(&format!("https://{}{}", host, path)) {
        Ok(url) => url,
        Err(e) => panic!("invalid request URL for {:?} {:?}: {}", host, path, e),
    };

    let mut headers = HeaderMap::new();

    if let Some(auth) = auth.filter(|a| a.is_complete()) {
        headers.insert(header::AUTHORIZATION, basic_auth(&auth.login, &auth.api_key));
    }

    let body = body.map(|body| {
        if let Some(content_type) = body.content_type() {
            match HeaderValue::from_str(content_type) {
                Ok(value) => {
                    headers.insert(header::CONTENT_TYPE, value);
                }
                Err(e) => panic!("invalid content type {:?}: {}", content_type, e),
            }
        }
        body.into_bytes()
    });

    Request {
        method,
        url,
        headers,
        body,
        timeout: None,
    }
}
