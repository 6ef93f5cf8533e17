//! Adapts the proxy events delivered by API Gateway (REST and HTTP APIs) and
//! Application Load Balancers into [`http`] requests, and turns the handler's
//! [`http::Response`] back into the event shape the caller expects.
//!
//! Implement [`Handler`] for a type that owns whatever state the function
//! needs, wrap it with [`handler`] and hand it to [`lambda::run`]:
//!
//! ```rust,no_run
//! use lead_status_http::{handler, lambda, Context, Error, Handler, Request, Response, Body};
//! use std::{future::Future, pin::Pin};
//!
//! struct Echo;
//!
//! impl Handler for Echo {
//!     type Response = Response<Body>;
//!     type Error = Error;
//!     type Fut = Pin<Box<dyn Future<Output = Result<Self::Response, Error>> + Send + 'static>>;
//!
//!     fn call(&mut self, request: Request, _: Context) -> Self::Fut {
//!         Box::pin(async move { Ok(Response::new(request.into_body())) })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     lambda::run(handler(Echo)).await
//! }
//! ```
pub use aws_lambda_events::encodings::Body;
pub use http::{self, Response, StatusCode};
pub use lamedh_runtime::{self as lambda, Context, Error};

mod ext;
pub mod request;
pub mod response;

pub use crate::{
    ext::{PathParameters, RequestExt},
    response::IntoResponse,
};
use crate::{
    request::{LambdaRequest, RequestOrigin},
    response::LambdaResponse,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context as TaskContext, Poll},
};

/// An `http::Request` carrying a proxy event body
pub type Request = http::Request<Body>;

/// Functions serving proxy events implement this trait.
///
/// `call` takes `&mut self` so implementations may keep per-container state,
/// but anything that must outlive a single invocation should be moved into
/// the returned future.
pub trait Handler: Sized {
    /// The type of error a handler may return
    type Error;
    /// The type of response a handler returns
    type Response: IntoResponse;
    /// The future returned by `call`
    type Fut: Future<Output = Result<Self::Response, Self::Error>> + Send + 'static;

    /// Handle an incoming request
    fn call(&mut self, event: Request, context: Context) -> Self::Fut;
}

/// Wraps a [`Handler`] so it can be driven by [`lambda::run`]
pub fn handler<H: Handler>(handler: H) -> Adapter<H> {
    Adapter { handler }
}

/// Converts the raw event into a [`Request`] before calling the wrapped
/// handler, and the handler's response into the matching [`LambdaResponse`].
pub struct Adapter<H: Handler> {
    handler: H,
}

impl<H: Handler> lambda::Handler<LambdaRequest, LambdaResponse> for Adapter<H> {
    type Error = H::Error;
    type Fut = TransformResponse<H::Response, H::Error>;

    fn call(&mut self, event: LambdaRequest, context: Context) -> Self::Fut {
        let request_origin = event.request_origin();
        let fut = Box::pin(self.handler.call(event.into(), context));
        TransformResponse { request_origin, fut }
    }
}

#[doc(hidden)]
pub struct TransformResponse<R, E> {
    request_origin: RequestOrigin,
    fut: Pin<Box<dyn Future<Output = Result<R, E>> + Send>>,
}

impl<R, E> Future for TransformResponse<R, E>
where
    R: IntoResponse,
{
    type Output = Result<LambdaResponse, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        let result = match self.fut.as_mut().poll(cx) {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };
        Poll::Ready(result.map(|response| LambdaResponse::from_response(&self.request_origin, response.into_response())))
    }
}
