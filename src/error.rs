use crate::response::ResponseError;

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Result type for `danbooru`, using [`danbooru::error::Error`].
///
/// [`danbooru::error::Error`]: enum.Error.html
pub type Result<T> = ::std::result::Result<T, Error>;

/// Error returned by a [`Transport`](crate::client::Transport) when the request couldn't be
/// exchanged with the server.
pub type TransportError = Box<dyn StdError + Send + Sync>;

/// Enum for `danbooru` errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The request couldn't be sent or the response couldn't be received. This includes timeouts.
    #[error("{0}")]
    Transport(#[source] TransportError),

    /// The response body isn't a valid API response.
    #[error("parse body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered with an error.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// An error that happened while performing an operation.
    #[error(transparent)]
    Context(ContextError),

    /// The client couldn't be created. Contains a description of the error.
    #[error("couldn't create client: {0}")]
    CannotCreateClient(String),
}

impl Error {
    /// Wrap the error with a description of what was being done.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context(ContextError {
            context: context.into(),
            source: Box::new(self),
        })
    }

    /// The API error response behind this error, if any, looking through context layers.
    pub fn response_error(&self) -> Option<&ResponseError> {
        match self {
            Error::Response(e) => Some(e),
            Error::Context(e) => e.source.response_error(),
            _ => None,
        }
    }

    /// Whether the API rejected the request because of throttling.
    pub fn is_throttled(&self) -> bool {
        self.response_error()
            .map_or(false, ResponseError::is_throttled)
    }
}

impl PartialEq<ResponseError> for Error {
    fn eq(&self, other: &ResponseError) -> bool {
        self.response_error().map_or(false, |e| e.matches(other))
    }
}

/// An [`Error`] along with a description of the operation it happened in, rendered as
/// `<context>: <error>`.
///
/// The alternate flag is passed on to the wrapped error, so `{:#}` still shows the details of a
/// [`ResponseError`].
#[derive(Debug)]
pub struct ContextError {
    context: String,
    source: Box<Error>,
}

impl ContextError {
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn inner(&self) -> &Error {
        &self.source
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}: {:#}", self.context, self.source)
        } else {
            write!(f, "{}: {}", self.context, self.source)
        }
    }
}

impl StdError for ContextError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

/// Find a [`ResponseError`] in the `source()` chain of `err`.
///
/// Works on errors that wrap `danbooru` errors in their own types, as long as they expose them
/// through [`std::error::Error::source`].
pub fn find_response_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ResponseError> {
    let mut current = Some(err);

    while let Some(err) = current {
        let found = err
            .downcast_ref::<ResponseError>()
            .or_else(|| err.downcast_ref::<Error>().and_then(Error::response_error));

        if found.is_some() {
            return found;
        }

        current = err.source();
    }

    None
}
