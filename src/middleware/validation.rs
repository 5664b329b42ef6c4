use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::{errors::AppError, schema::Contract};

/// Normalized (defaulted, unknown keys stripped) copy of a body that passed
/// its contract. Attached as a request extension; the body itself is untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBody(pub Map<String, Value>);

/// State for [`validate_body`]: which contract to enforce and how many body
/// bytes to buffer at most.
#[derive(Debug, Clone, Copy)]
pub struct ValidationGate {
    pub contract: Contract,
    pub body_limit: usize,
}

impl ValidationGate {
    pub fn new(contract: Contract, body_limit: usize) -> Self {
        Self {
            contract,
            body_limit,
        }
    }
}

/// Gates a request body through its contract before the handler runs.
///
/// Schema failures end the request with a 400 listing every violation. Any
/// other failure (unreadable body, non-JSON payload) is returned as-is for the
/// outer error mapping. On success the original bytes are forwarded unchanged.
pub async fn validate_body(
    State(gate): State<ValidationGate>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, gate.body_limit).await?;
    let input = parse_body(&parts.headers, &bytes)?;

    let normalized = gate.contract.schema().validate(&input).map_err(|e| {
        tracing::debug!(
            contract = %gate.contract,
            violations = e.len(),
            "request body rejected"
        );
        e
    })?;

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(NormalizedBody(normalized));

    Ok(next.run(request).await)
}

// An absent body is treated as an empty object.
fn parse_body(headers: &HeaderMap, bytes: &Bytes) -> Result<Value, AppError> {
    if bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    if !is_json(headers) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        return Err(AppError::UnsupportedContentType(content_type.to_string()));
    }

    Ok(serde_json::from_slice(bytes)?)
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Router,
        http::{self, Method, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::errors::ValidationFailure;

    async fn echo(
        Extension(NormalizedBody(normalized)): Extension<NormalizedBody>,
        raw: Bytes,
    ) -> axum::Json<Value> {
        axum::Json(json!({
            "raw": String::from_utf8_lossy(&raw),
            "normalized": normalized,
        }))
    }

    fn app(contract: Contract) -> Router {
        Router::new().route(
            "/",
            post(echo).route_layer(from_fn_with_state(
                ValidationGate::new(contract, 1024),
                validate_body,
            )),
        )
    }

    fn json_request(body: impl Into<Body>) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn forwards_original_body_and_attaches_normalized_copy() {
        let raw = r#"{"amount":50,"description":"Coffee","category":"Food","note":"x"}"#;
        let response = app(Contract::TransactionCreate)
            .oneshot(json_request(raw))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["raw"], json!(raw));
        assert_eq!(
            body["normalized"],
            json!({"amount": 50, "description": "Coffee", "category": "Food", "recurring": false})
        );
    }

    #[tokio::test]
    async fn schema_failure_short_circuits_with_400() {
        let response = app(Contract::GoalUpdate)
            .oneshot(json_request(r#"{"status":"unknown"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let failure: ValidationFailure = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(failure.error, "Validation failed");
        assert_eq!(failure.details.len(), 1);
        assert_eq!(failure.details[0].field, "status");
    }

    #[tokio::test]
    async fn empty_body_is_validated_as_empty_object() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app(Contract::TransactionCreate).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let failure: ValidationFailure = serde_json::from_value(read_json(response).await).unwrap();
        let fields: Vec<_> = failure.details.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["amount", "description", "category"]);
    }

    #[tokio::test]
    async fn malformed_json_goes_to_generic_error_path() {
        let response = app(Contract::GoalCreate)
            .oneshot(json_request(r#"{"title": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], json!(400));
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn non_json_content_type_is_rejected_upstream() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("title=Car"))
            .unwrap();
        let response = app(Contract::GoalCreate).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn oversized_body_is_not_a_schema_failure() {
        let big = format!(r#"{{"title":"{}"}}"#, "x".repeat(2048));
        let response = app(Contract::GoalCreate).oneshot(json_request(big)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], json!("Failed to read request body."));
    }

    #[test]
    fn recognises_json_media_types() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(is_json(&headers));

        headers.insert(CONTENT_TYPE, "text/json-ish".parse().unwrap());
        assert!(!is_json(&headers));
    }
}
