//! ALB and API Gateway request adaptations
//!
//! Every supported event shape is converted into the same [`Request`]:
//! method, rebuilt URI, headers and decoded body, with the route's path
//! parameters attached as a [`PathParameters`] extension.
use crate::{ext::PathParameters, Body, Request};
use aws_lambda_events::event::alb::AlbTargetGroupRequest;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayV2httpRequest};
use http::{
    header::{HeaderName, HeaderValue, COOKIE, HOST},
    HeaderMap, Method, Uri,
};
use serde::Deserialize;
use serde_json::error::Error as JsonError;
use std::io::Read;

/// Internal representation of a proxy event from the ALB, API Gateway REST
/// and API Gateway HTTP API perspectives.
///
/// The order of the variants matters: serde tries them top to bottom.
#[doc(hidden)]
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum LambdaRequest {
    ApiGatewayV1(ApiGatewayProxyRequest),
    ApiGatewayV2(ApiGatewayV2httpRequest),
    Alb(AlbTargetGroupRequest),
}

impl LambdaRequest {
    /// Return where the event came from, so that the response can be
    /// shaped the way that origin expects.
    pub fn request_origin(&self) -> RequestOrigin {
        match self {
            LambdaRequest::ApiGatewayV1 { .. } => RequestOrigin::ApiGatewayV1,
            LambdaRequest::ApiGatewayV2 { .. } => RequestOrigin::ApiGatewayV2,
            LambdaRequest::Alb { .. } => RequestOrigin::Alb,
        }
    }
}

/// The origin a request was delivered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    /// API Gateway REST API proxy integration
    ApiGatewayV1,
    /// API Gateway HTTP API (payload format 2.0)
    ApiGatewayV2,
    /// Application Load Balancer target group
    Alb,
}

impl From<LambdaRequest> for Request {
    fn from(value: LambdaRequest) -> Self {
        match value {
            LambdaRequest::ApiGatewayV2(ag) => from_http_api_event(ag),
            LambdaRequest::ApiGatewayV1(ag) => from_rest_api_event(ag),
            LambdaRequest::Alb(alb) => from_alb_event(alb),
        }
    }
}

fn from_http_api_event(ag: ApiGatewayV2httpRequest) -> Request {
    let method = ag.request_context.http.method.clone();
    let uri = rebuild_uri(
        &ag.headers,
        ag.request_context.domain_name.as_deref(),
        ag.raw_path.as_deref().unwrap_or_default(),
        ag.raw_query_string.as_deref(),
    );

    // HTTP APIs strip cookies out of the headers into their own list
    let mut headers = ag.headers;
    if let Some(cookies) = ag.cookies {
        if let Ok(value) = HeaderValue::from_str(&cookies.join("; ")) {
            headers.append(COOKIE, value);
        }
    }

    let body = decode_body(ag.body.as_deref(), ag.is_base64_encoded);
    assemble(method, uri, headers, body, PathParameters::from(ag.path_parameters))
}

fn from_rest_api_event(ag: ApiGatewayProxyRequest) -> Request {
    let uri = rebuild_uri(&ag.headers, None, ag.path.as_deref().unwrap_or_default(), None);

    // multi-value headers are a superset of the single-valued ones
    let mut headers = ag.multi_value_headers;
    headers.extend(ag.headers);

    let body = decode_body(ag.body.as_deref(), ag.is_base64_encoded.unwrap_or_default());
    assemble(
        ag.http_method,
        uri,
        headers,
        body,
        PathParameters::from(ag.path_parameters),
    )
}

fn from_alb_event(alb: AlbTargetGroupRequest) -> Request {
    let uri = rebuild_uri(&alb.headers, None, alb.path.as_deref().unwrap_or_default(), None);

    let mut headers = alb.multi_value_headers;
    headers.extend(alb.headers);

    let body = decode_body(alb.body.as_deref(), alb.is_base64_encoded);
    assemble(alb.http_method, uri, headers, body, PathParameters::default())
}

fn assemble(method: Method, uri: Uri, headers: HeaderMap, body: Body, path_parameters: PathParameters) -> Request {
    let mut request = http::Request::new(body);
    *request.method_mut() = method;
    *request.uri_mut() = uri;
    *request.headers_mut() = headers;
    request.extensions_mut().insert(path_parameters);
    request
}

/// A body flagged as base64 that fails to decode is kept as the raw text, so
/// that the handler sees (and rejects) what the client actually sent.
fn decode_body(body: Option<&str>, is_base64_encoded: bool) -> Body {
    match body {
        None => Body::Empty,
        Some(b) if is_base64_encoded => base64::decode(b).map_or_else(|_| Body::from(b), Body::from),
        Some(b) => Body::from(b),
    }
}

/// Rebuild an absolute URI from the forwarded scheme, the host header and
/// the raw path. A host that does not form a valid URI degrades to the bare
/// path, and an unparseable path to `/`.
fn rebuild_uri(headers: &HeaderMap, fallback_host: Option<&str>, path: &str, query: Option<&str>) -> Uri {
    let scheme = headers
        .get(x_forwarded_proto())
        .and_then(|s| s.to_str().ok())
        .unwrap_or("https");
    let host = headers
        .get(HOST)
        .and_then(|s| s.to_str().ok())
        .or(fallback_host)
        .unwrap_or("localhost");

    let mut url = format!("{}://{}{}", scheme, host, path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url.parse::<Uri>()
        .or_else(|_| path.parse::<Uri>())
        .unwrap_or_default()
}

/// Deserializes a `Request` from a `Read` impl providing JSON events.
///
/// # Example
///
/// ```rust,no_run
/// use lead_status_http::request::from_reader;
/// use std::fs::File;
/// use std::error::Error;
///
/// fn main() -> Result<(), Box<dyn Error>> {
///     let request = from_reader(
///         File::open("path/to/request.json")?
///     )?;
///     Ok(println!("{:#?}", request))
/// }
/// ```
pub fn from_reader<R>(rdr: R) -> Result<Request, JsonError>
where
    R: Read,
{
    serde_json::from_reader(rdr).map(LambdaRequest::into)
}

/// Deserializes a `Request` from a string of JSON text.
pub fn from_str(s: &str) -> Result<Request, JsonError> {
    serde_json::from_str(s).map(LambdaRequest::into)
}

fn x_forwarded_proto() -> HeaderName {
    HeaderName::from_static("x-forwarded-proto")
}
