use crate::{handler::update_lead_status, store::LeadStore};
use lead_status_http::{Body, Context, Error, Handler, Request, Response};
use std::{future::Future, pin::Pin, sync::Arc};
use tracing::Instrument;

/// The function served by the runtime.
///
/// It owns the only state shared between invocations: a handle to the lead
/// store, which every invocation borrows for the duration of one update.
pub struct LeadStatusFunction<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> LeadStatusFunction<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> Handler for LeadStatusFunction<S>
where
    S: LeadStore + ?Sized + 'static,
{
    type Response = Response<Body>;
    type Error = Error;
    type Fut = Pin<Box<dyn Future<Output = Result<Self::Response, Error>> + Send + 'static>>;

    fn call(&mut self, request: Request, context: Context) -> Self::Fut {
        let store = Arc::clone(&self.store);
        let span = tracing::info_span!(
            "Lead status request",
            request_id = %context.request_id,
            http.method = %request.method(),
            http.path = %request.uri().path(),
        );
        let fut = async move { Ok::<_, Error>(update_lead_status(store.as_ref(), request).await) };
        Box::pin(fut.instrument(span))
    }
}
