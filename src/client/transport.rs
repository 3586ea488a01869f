use futures::future::{BoxFuture, FutureExt};

use crate::error::TransportError;
use crate::request::Request;
use crate::response::Response;

/// Performs the network exchange for a [`Request`].
///
/// Implementations are shared by every call made with a [`Client`](super::Client) and may be
/// used concurrently. They must honor [`Request::timeout`] and report an expired deadline as an
/// error. Dropping the returned future cancels the exchange.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        (**self).send(request)
    }
}

impl Transport for reqwest::Client {
    fn send(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        async move {
            let mut req = reqwest::Request::new(request.method, request.url);
            *req.headers_mut() = request.headers;
            *req.body_mut() = request.body.map(reqwest::Body::from);
            *req.timeout_mut() = request.timeout;

            let res = self.execute(req).await?;
            let status = res.status();
            let headers = res.headers().clone();
            let body = res.bytes().await?.to_vec();

            Ok(Response {
                status,
                headers,
                body,
            })
        }
        .boxed()
    }
}
