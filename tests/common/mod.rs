#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glyph_serve::core::errors::GlyphResult;
use glyph_serve::core::traits::Classifier;
use glyph_serve::processors::NormalizedTensor;
use glyph_serve::server::build_router;
use glyph_serve::service::ServiceContext;
use http_body_util::BodyExt;
use image::{GrayImage, ImageFormat, Luma};
use serde_json::Value;
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;

/// Returns the same scores for every input.
#[derive(Debug)]
pub struct FixedClassifier {
    pub scores: Vec<f32>,
}

impl FixedClassifier {
    /// A distribution with `peaks` set and the rest zero.
    pub fn peaked(num_classes: usize, peaks: &[(usize, f32)]) -> Arc<dyn Classifier> {
        let mut scores = vec![0.0; num_classes];
        for &(index, score) in peaks {
            scores[index] = score;
        }
        Arc::new(Self { scores })
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, input: &NormalizedTensor) -> GlyphResult<Vec<f32>> {
        self.validate_inference_input(input)?;
        Ok(self.scores.clone())
    }

    fn num_classes(&self) -> usize {
        self.scores.len()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

pub fn router(
    digit: Option<Arc<dyn Classifier>>,
    letter: Option<Arc<dyn Classifier>>,
) -> Router {
    let context = ServiceContext::new(digit, letter).expect("context");
    build_router(Arc::new(context), 1024 * 1024)
}

/// A white 280x280 canvas with a dark vertical stroke, as a PNG data-URI.
pub fn canvas_data_uri() -> String {
    let mut img = GrayImage::from_pixel(280, 280, Luma([255]));
    for y in 40..240 {
        for x in 130..150 {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    format!("data:image/png;base64,{}", STANDARD.encode(buf.into_inner()))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
