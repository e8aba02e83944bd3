//! Route handlers.

use super::error::ApiError;
use crate::domain::{DigitResponse, HealthStatus, HomeResponse, LetterResponse, ModelKind};
use crate::service::ServiceContext;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use std::sync::Arc;

pub(crate) type AppState = Arc<ServiceContext>;

const NO_IMAGE: &str = "No image data provided";

pub(crate) async fn home() -> Json<HomeResponse> {
    Json(HomeResponse::default())
}

pub(crate) async fn health(State(ctx): State<AppState>) -> Json<HealthStatus> {
    Json(ctx.health())
}

pub(crate) async fn predict_digit(
    State(ctx): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DigitResponse>, ApiError> {
    ctx.require(ModelKind::Digit)?;
    let image = extract_image(body)?;
    let response = tokio::task::spawn_blocking(move || ctx.predict_digit(&image)).await??;
    Ok(Json(response))
}

pub(crate) async fn predict_letter(
    State(ctx): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LetterResponse>, ApiError> {
    ctx.require(ModelKind::Letter)?;
    let image = extract_image(body)?;
    let response = tokio::task::spawn_blocking(move || ctx.predict_letter(&image)).await??;
    Ok(Json(response))
}

/// Pulls the `image` string out of the request body.
fn extract_image(body: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
    let Json(mut value) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    match value.get_mut("image").map(Value::take) {
        Some(Value::String(image)) => Ok(image),
        _ => Err(ApiError::bad_request(NO_IMAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_image() {
        let image = extract_image(Ok(Json(json!({ "image": "abc" })))).unwrap();
        assert_eq!(image, "abc");
    }

    #[test]
    fn test_extract_image_requires_string_field() {
        for body in [json!({}), json!({ "image": 5 }), json!([1, 2]), json!(null)] {
            let err = extract_image(Ok(Json(body))).unwrap_err();
            assert_eq!(err.message, NO_IMAGE);
            assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        }
    }
}
