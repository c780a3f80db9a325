//! The handler capability: turn a request into a response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;

/// Boxed future returned by [`Handler::handle`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Response>> + Send + 'a>>;

/// Anything that can answer a request.
///
/// Errors returned here never reach the client verbatim: the connection logs
/// them and answers `500 Internal Server Error`.
pub trait Handler: Send + Sync {
    fn handle(&self, request: Request) -> HandlerFuture<'_>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, request: Request) -> HandlerFuture<'_> {
        (**self).handle(request)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, request: Request) -> HandlerFuture<'_> {
        (**self).handle(request)
    }
}

/// Adapter that turns an async function into a [`Handler`].
///
/// Created with [`handler_fn`].
#[derive(Clone)]
pub struct FnHandler<F> {
    callback: F,
}

/// Wraps an async function or closure as a [`Handler`].
///
/// # Example
///
/// ```
/// use wicket::handler::handler_fn;
/// use wicket::http::request::Request;
/// use wicket::http::response::Response;
///
/// async fn hello(_req: Request) -> anyhow::Result<Response> {
///     Ok(Response::ok("hello"))
/// }
///
/// let handler = handler_fn(hello);
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(callback: F) -> FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    FnHandler { callback }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    fn handle(&self, request: Request) -> HandlerFuture<'_> {
        Box::pin((self.callback)(request))
    }
}

impl<F> std::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}
