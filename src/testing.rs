//! Test doubles for [`Transport`] and [`Logger`].

use crate::client::{Logger, Transport};
use crate::error::TransportError;
use crate::request::Request;
use crate::response::Response;

use futures::future::{self, BoxFuture, FutureExt};

use reqwest::{header::HeaderMap, StatusCode};

use std::sync::{Arc, Mutex};

use url::Url;

/// Answers every request with the same response, or fails with the same error.
#[derive(Debug, Clone)]
pub struct TransportStub {
    result: Result<Response, String>,
}

impl TransportStub {
    pub fn respond(status: u16, body: &str) -> Self {
        TransportStub {
            result: Ok(Response {
                status: StatusCode::from_u16(status).unwrap(),
                headers: HeaderMap::new(),
                body: body.as_bytes().to_vec(),
            }),
        }
    }

    pub fn fail(message: &str) -> Self {
        TransportStub {
            result: Err(message.to_owned()),
        }
    }
}

impl Transport for TransportStub {
    fn send(&self, _request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        future::ready(self.result.clone().map_err(TransportError::from)).boxed()
    }
}

/// A [`TransportStub`] remembering the requests it was given.
#[derive(Debug, Clone)]
pub struct TransportSpy {
    stub: TransportStub,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl TransportSpy {
    pub fn new(stub: TransportStub) -> Self {
        TransportSpy {
            stub,
            requests: Default::default(),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for TransportSpy {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        self.requests.lock().unwrap().push(request.clone());
        self.stub.send(request)
    }
}

/// Never answers.
#[derive(Debug, Clone, Copy)]
pub struct TransportHang;

impl Transport for TransportHang {
    fn send(&self, _request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        future::pending().boxed()
    }
}

/// Sends requests to the mockito server instead of `https://<host>`, through a real
/// `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct MockitoTransport {
    client: reqwest::Client,
    server: Url,
}

impl MockitoTransport {
    pub fn new() -> Self {
        MockitoTransport {
            client: reqwest::Client::new(),
            server: Url::parse(&mockito::server_url()).unwrap(),
        }
    }
}

impl Transport for MockitoTransport {
    fn send(&self, mut request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        request.url.set_scheme(self.server.scheme()).unwrap();
        request.url.set_host(self.server.host_str()).unwrap();
        request.url.set_port(self.server.port()).unwrap();
        self.client.send(request)
    }
}

/// Keeps every message it's given.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn print(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_owned());
    }
}
