//! HTTP router and handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ApiError;
use crate::model::{AnnotationAck, AnnotationRequest};
use crate::synth::Synthesizer;
use crate::validate::validate_bboxes;

/// Response header carrying the correlation token.
pub const IMAGE_ID_HEADER: HeaderName = HeaderName::from_static("image-id");

/// Shared, immutable application state.
pub struct AppState {
    /// The image synthesizer, with its font loaded at startup.
    pub synthesizer: Synthesizer,
}

/// Build the application router with the CORS policy applied.
pub fn router(state: Arc<AppState>) -> Router {
    // Any origin may call the API and read the correlation header.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([IMAGE_ID_HEADER]);

    Router::new()
        .route("/", get(root))
        .route("/get-mock-image", get(get_mock_image))
        .route("/submit-bbox", post(submit_bbox))
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello, World!!!" }))
}

/// Synthesize a placeholder image and return it with a fresh correlation
/// token in the `Image-ID` header.
async fn get_mock_image(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut rng = StdRng::from_os_rng();
    let image = state.synthesizer.generate(&mut rng)?;
    tracing::info!(image_id = %image.image_id, bytes = image.png.len(), "image synthesized");

    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static("image/png")),
        (IMAGE_ID_HEADER, HeaderValue::from_str(&image.image_id)?),
    ];
    Ok((headers, image.png))
}

/// Validate a bounding-box submission and echo it back.
async fn submit_bbox(
    Json(request): Json<AnnotationRequest>,
) -> Result<Json<AnnotationAck>, ApiError> {
    validate_bboxes(&request.bboxes)?;
    tracing::debug!(image_id = %request.image_id, count = request.bboxes.len(), "bounding boxes received");
    Ok(Json(AnnotationAck::received(request)))
}
