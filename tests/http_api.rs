mod common;

use axum::http::StatusCode;
use common::{FixedClassifier, canvas_data_uri, get, post_json, post_raw, router};
use serde_json::json;

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body) = get(router(None, None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "MNIST/EMNIST Recognition API");
    assert_eq!(body["endpoints"]["/predict/digit"], "Predict digit (0-9)");
    assert_eq!(body["endpoints"]["/predict/letter"], "Predict letter (A-Z)");
    assert_eq!(body["endpoints"]["/health"], "Check model status");
}

#[tokio::test]
async fn health_reports_digit_only() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "mnist_model": "loaded", "emnist_model": "not loaded" }));
}

#[tokio::test]
async fn digit_prediction_succeeds() {
    let app = router(
        Some(FixedClassifier::peaked(10, &[(1, 0.7), (7, 0.2), (4, 0.1)])),
        None,
    );
    let (status, body) =
        post_json(app, "/predict/digit", &json!({ "image": canvas_data_uri() })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["prediction"], 1);
    let top: Vec<i64> = body["top_3"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["digit"].as_i64().unwrap())
        .collect();
    assert_eq!(top, vec![1, 7, 4]);
    assert_eq!(body["all_probabilities"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn letter_prediction_uses_one_based_scheme() {
    let app = router(
        None,
        Some(FixedClassifier::peaked(27, &[(26, 0.5), (1, 0.3), (2, 0.2)])),
    );
    let (status, body) =
        post_json(app, "/predict/letter", &json!({ "image": canvas_data_uri() })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "Z");
    assert_eq!(body["top_3"][0]["letter"], "Z");
    assert_eq!(body["top_3"][1]["letter"], "A");
    assert_eq!(body["top_3"][2]["letter"], "B");
    assert_eq!(body["all_probabilities"].as_array().unwrap().len(), 27);
}

#[tokio::test]
async fn letter_prediction_accepts_raw_base64() {
    let uri = canvas_data_uri();
    let raw = uri.split_once(',').unwrap().1.to_string();
    let app = router(None, Some(FixedClassifier::peaked(26, &[(0, 0.9)])));
    let (status, body) = post_json(app, "/predict/letter", &json!({ "image": raw })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], "A");
}

#[tokio::test]
async fn missing_image_is_bad_request() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, body) = post_json(app, "/predict/digit", &json!({ "data": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image data provided");
}

#[tokio::test]
async fn letter_route_without_model_is_internal_error() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, body) =
        post_json(app, "/predict/letter", &json!({ "image": canvas_data_uri() })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "EMNIST model not loaded");
}

#[tokio::test]
async fn missing_model_is_checked_before_body() {
    let (status, body) = post_json(router(None, None), "/predict/digit", &json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "MNIST model not loaded");
}

#[tokio::test]
async fn invalid_base64_is_bad_request() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, body) = post_json(
        app,
        "/predict/digit",
        &json!({ "image": "data:image/png;base64,!!!not-base64!!!" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to process image")
    );
}

#[tokio::test]
async fn non_image_bytes_are_bad_request() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, _) = post_json(app, "/predict/digit", &json!({ "image": "aGVsbG8=" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let app = router(Some(FixedClassifier::peaked(10, &[(0, 1.0)])), None);
    let (status, body) = post_raw(app, "/predict/digit", "not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn wrong_output_width_is_internal_error() {
    #[derive(Debug)]
    struct Truncated;

    impl glyph_serve::core::traits::Classifier for Truncated {
        fn predict(
            &self,
            _input: &glyph_serve::processors::NormalizedTensor,
        ) -> glyph_serve::core::GlyphResult<Vec<f32>> {
            Ok(Vec::new())
        }

        fn num_classes(&self) -> usize {
            10
        }

        fn name(&self) -> &str {
            "truncated"
        }
    }

    let app = router(Some(std::sync::Arc::new(Truncated)), None);
    let (status, body) =
        post_json(app, "/predict/digit", &json!({ "image": canvas_data_uri() })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}
