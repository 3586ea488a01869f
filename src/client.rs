mod logger;
mod transport;

pub use logger::{LogLogger, Logger, NoopLogger};
pub use transport::Transport;

use super::error::{Error, Result};
use super::request::{build_request, Request, RequestBody};
use super::response::{parse_body, response_error, ResponseBody};

use derivative::Derivative;

use reqwest::{
    header::{self, HeaderValue},
    Method,
};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Login and API key used to authenticate requests.
#[derive(Derivative, Clone, PartialEq, Eq, Default)]
#[derivative(Debug)]
pub struct AuthInfo {
    pub login: String,
    #[derivative(Debug = "ignore")]
    pub api_key: String,
}

impl AuthInfo {
    pub fn new(login: impl Into<String>, api_key: impl Into<String>) -> Self {
        AuthInfo {
            login: login.into(),
            api_key: api_key.into(),
        }
    }

    /// Requests are only authenticated when both the login and the API key are set.
    pub fn is_complete(&self) -> bool {
        !self.login.is_empty() && !self.api_key.is_empty()
    }
}

/// Client struct.
///
/// A client only holds configuration: every call builds its own request, so a single client can
/// be shared between tasks.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Client<T = reqwest::Client> {
    host: String,
    user_agent: HeaderValue,
    auth: Option<AuthInfo>,
    timeout: Option<Duration>,
    #[derivative(Debug = "ignore")]
    transport: T,
    #[derivative(Debug = "ignore")]
    logger: Arc<dyn Logger>,
}

impl Client {
    /// Create a new client for the API served at `https://<host>`, sending the given value for
    /// the User-Agent header. Booru APIs tend to block anonymous user agents, so it must not be
    /// empty; include the name of your project.
    pub fn new(host: &str, user_agent: impl AsRef<[u8]>) -> Result<Self> {
        match reqwest::Client::builder().build() {
            Ok(c) => Client::with_transport(host, user_agent, c),
            Err(e) => Err(Error::CannotCreateClient(format!("{:?}", e))),
        }
    }
}

impl<T: Transport> Client<T> {
    /// Create a new client performing its requests through `transport`.
    pub fn with_transport(host: &str, user_agent: impl AsRef<[u8]>, transport: T) -> Result<Self> {
        if user_agent.as_ref() == b"" {
            return Err(Error::CannotCreateClient(String::from(
                "User Agent mustn't be empty",
            )));
        }

        let user_agent = HeaderValue::from_bytes(user_agent.as_ref())
            .map_err(|e| Error::CannotCreateClient(format!("Invalid header value: {}", e)))?;

        check_host(host)?;

        Ok(Client {
            host: host.to_owned(),
            user_agent,
            auth: None,
            timeout: None,
            transport,
            logger: Arc::new(NoopLogger),
        })
    }

    /// Authenticate every request with the given login and API key. Requests stay
    /// unauthenticated if either of them is empty.
    pub fn login(&mut self, login: impl Into<String>, api_key: impl Into<String>) {
        self.auth = Some(AuthInfo::new(login, api_key));
    }

    /// Stop authenticating requests.
    pub fn logout(&mut self) {
        self.auth = None;
    }

    /// Send diagnostic messages to `logger`.
    pub fn set_logger(&mut self, logger: impl Logger + 'static) {
        self.logger = Arc::new(logger);
    }

    /// Give up on requests taking longer than `timeout`. They fail with
    /// [`Error::Transport`].
    pub fn set_timeout(&mut self, timeout: impl Into<Option<Duration>>) {
        self.timeout = timeout.into();
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The credentials requests are authenticated with, if both the login and API key are set.
    pub fn auth_info(&self) -> Option<&AuthInfo> {
        self.auth.as_ref().filter(|a| a.is_complete())
    }

    fn log(&self, message: &str) {
        self.logger.print(message);
    }

    fn logf(&self, args: fmt::Arguments<'_>) {
        self.logger.print_fmt(args);
    }

    /// Build the request for an API call.
    pub(crate) fn new_request<B: RequestBody>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Request {
        let mut request = build_request(&self.host, self.auth_info(), method, path, body);
        request
            .headers
            .insert(header::USER_AGENT, self.user_agent.clone());
        request.timeout = self.timeout;
        request
    }

    /// Perform an API call and check its response.
    pub(crate) async fn call<B: RequestBody>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<ResponseBody> {
        let request = self.new_request(method, path, body);
        self.logf(format_args!("request {} {}", request.method, request.url));

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                self.logf(format_args!("transport error: {}", e));
                return Err(Error::Transport(e));
            }
        };
        self.logf(format_args!("response {}", response.status));

        let body = parse_body(&response.body).map_err(|e| {
            self.log("couldn't parse response body");
            Error::from(e)
        })?;

        match response_error(response.status, &body) {
            Some(e) => {
                self.logf(format_args!("api error: {}", e));
                Err(e.into())
            }
            None => Ok(body),
        }
    }
}

/// Hosts are used as the authority of `https://` URLs, optionally with a port.
fn check_host(host: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(Error::CannotCreateClient(format!(
            "Invalid host {:?}: {}",
            host, reason
        )))
    };

    if host.is_empty() {
        return invalid("empty");
    }

    if host.contains(|c: char| matches!(c, '/' | '?' | '#' | '@' | '\\')) {
        return invalid("expected a host name, not a URL");
    }

    match url::Url::parse(&format!("https://{}/", host)) {
        Ok(url) if url.host_str().is_some() => Ok(()),
        Ok(_) => invalid("no host name"),
        Err(e) => invalid(&e.to_string()),
    }
}
