//! Response types

use crate::{request::RequestOrigin, Body};
use aws_lambda_events::event::alb::AlbTargetGroupResponse;
use aws_lambda_events::event::apigw::{ApiGatewayProxyResponse, ApiGatewayV2httpResponse};
use http::{
    header::{HeaderValue, CONTENT_TYPE, SET_COOKIE},
    Response, StatusCode,
};
use serde::Serialize;

/// Representation of a proxy integration response
#[doc(hidden)]
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum LambdaResponse {
    ApiGatewayV2(ApiGatewayV2httpResponse),
    ApiGatewayV1(ApiGatewayProxyResponse),
    Alb(AlbTargetGroupResponse),
}

impl LambdaResponse {
    /// Shape `value` the way the origin of the request expects it
    pub fn from_response<T>(request_origin: &RequestOrigin, value: Response<T>) -> Self
    where
        T: Into<Body>,
    {
        let (parts, body) = value.into_parts();
        let (is_base64_encoded, body) = match body.into() {
            Body::Empty => (false, None),
            b @ Body::Text(_) => (false, Some(b)),
            b @ Body::Binary(_) => (true, Some(b)),
        };

        let mut headers = parts.headers;
        let status_code = i64::from(parts.status.as_u16());

        match request_origin {
            RequestOrigin::ApiGatewayV2 => {
                // HTTP APIs expect set-cookie values in their own attribute
                let cookies = headers
                    .get_all(SET_COOKIE)
                    .iter()
                    .filter_map(|v| v.to_str().ok())
                    .map(str::to_owned)
                    .collect();
                headers.remove(SET_COOKIE);

                LambdaResponse::ApiGatewayV2(ApiGatewayV2httpResponse {
                    body,
                    status_code,
                    is_base64_encoded: Some(is_base64_encoded),
                    cookies,
                    headers: headers.clone(),
                    multi_value_headers: headers,
                })
            }
            RequestOrigin::ApiGatewayV1 => LambdaResponse::ApiGatewayV1(ApiGatewayProxyResponse {
                body,
                status_code,
                is_base64_encoded: Some(is_base64_encoded),
                headers: headers.clone(),
                multi_value_headers: headers,
            }),
            RequestOrigin::Alb => LambdaResponse::Alb(AlbTargetGroupResponse {
                body,
                status_code,
                is_base64_encoded,
                headers: headers.clone(),
                multi_value_headers: headers,
                status_description: Some(format!(
                    "{} {}",
                    status_code,
                    parts.status.canonical_reason().unwrap_or_default()
                )),
            }),
        }
    }
}

/// A conversion of self into a `Response<Body>` for various types.
///
/// A `serde_json::Value` paired with a [`StatusCode`] becomes a JSON response
/// with that status.
pub trait IntoResponse {
    /// Return a translation of `self` into a `Response<Body>`
    fn into_response(self) -> Response<Body>;
}

impl<B> IntoResponse for Response<B>
where
    B: Into<Body>,
{
    fn into_response(self) -> Response<Body> {
        let (parts, body) = self.into_parts();
        Response::from_parts(parts, body.into())
    }
}

impl IntoResponse for (StatusCode, serde_json::Value) {
    fn into_response(self) -> Response<Body> {
        let (status, value) = self;
        let mut response = Response::new(Body::Text(value.to_string()));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, IntoResponse, LambdaResponse, RequestOrigin};
    use http::{header::CONTENT_TYPE, Response, StatusCode};
    use serde_json::{json, Value};

    fn not_found() -> Response<Body> {
        (StatusCode::NOT_FOUND, json!({ "message": "Lead not found." })).into_response()
    }

    fn serialized(origin: RequestOrigin, response: Response<Body>) -> Value {
        let event = LambdaResponse::from_response(&origin, response);
        serde_json::to_value(&event).expect("failed to serialize response")
    }

    #[test]
    fn status_and_json_into_response() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        match response.body() {
            Body::Text(json) => assert_eq!(json, r#"{"message":"Lead not found."}"#),
            _ => panic!("invalid body"),
        }
        assert_eq!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .map(|h| h.to_str().expect("invalid header")),
            Some("application/json")
        )
    }

    #[test]
    fn responses_keep_their_parts() {
        let response = Response::builder()
            .status(StatusCode::ACCEPTED)
            .header("x-lead-id", "42")
            .body("queued")
            .expect("failed to create response")
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-lead-id"], "42");
        match response.body() {
            Body::Text(text) => assert_eq!(text, "queued"),
            _ => panic!("invalid body"),
        }
    }

    #[test]
    fn rest_api_responses_keep_status_headers_and_body() {
        let event = serialized(RequestOrigin::ApiGatewayV1, not_found());
        assert_eq!(event["statusCode"], 404);
        assert_eq!(event["body"], r#"{"message":"Lead not found."}"#);
        assert_eq!(event["headers"]["content-type"], "application/json");
        assert_eq!(event["multiValueHeaders"]["content-type"], json!(["application/json"]));
        assert_eq!(event["isBase64Encoded"], false);
    }

    #[test]
    fn alb_responses_carry_a_status_description() {
        let event = serialized(RequestOrigin::Alb, not_found());
        assert_eq!(event["statusCode"], 404);
        assert_eq!(event["statusDescription"], "404 Not Found");
    }

    #[test]
    fn http_api_responses_move_cookies_out_of_the_headers() {
        let response = Response::builder()
            .header("set-cookie", "cookie1=a")
            .header("set-cookie", "cookie2=b")
            .body(Body::from(()))
            .expect("failed to create response");
        let event = serialized(RequestOrigin::ApiGatewayV2, response);
        assert_eq!(event["cookies"], json!(["cookie1=a", "cookie2=b"]));
        assert!(event["headers"].get("set-cookie").is_none());
    }

    #[test]
    fn empty_bodies_are_omitted() {
        let response = Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::Empty)
            .expect("failed to create response");
        let event = serialized(RequestOrigin::ApiGatewayV1, response);
        assert!(event.get("body").is_none());
    }
}
