//! Request and response types for the annotation API.

use serde::{Deserialize, Serialize};

/// Fixed acknowledgment message returned on a successful submission.
pub const ACK_MESSAGE: &str = "Bounding boxes received successfully";

/// An axis-aligned bounding box with display metadata.
///
/// `color` and `shape` are free-form tags; only the coordinates are
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum x-coordinate.
    pub x_min: i64,
    /// Minimum y-coordinate.
    pub y_min: i64,
    /// Maximum x-coordinate.
    pub x_max: i64,
    /// Maximum y-coordinate.
    pub y_max: i64,
    /// Display color (e.g., `"red"`, `"blue"`).
    pub color: String,
    /// Shape tag (e.g., `"rectangle"`, `"circle"`).
    pub shape: String,
}

impl BoundingBox {
    /// Whether the box satisfies `x_min < x_max && y_min < y_max`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x_min < self.x_max && self.y_min < self.y_max
    }
}

/// A bounding-box submission tied to a previously issued image ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationRequest {
    /// Opaque correlation token from an earlier image response.
    pub image_id: String,
    /// Submitted boxes, in client order.
    pub bboxes: Vec<BoundingBox>,
}

/// Acknowledgment echoing a validated submission unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationAck {
    /// Always [`ACK_MESSAGE`].
    pub message: String,
    /// The submitted correlation token.
    pub image_id: String,
    /// The submitted boxes, order and values preserved.
    pub bboxes: Vec<BoundingBox>,
}

impl AnnotationAck {
    /// Build the acknowledgment for an accepted request.
    #[must_use]
    pub fn received(request: AnnotationRequest) -> Self {
        Self { message: ACK_MESSAGE.to_string(), image_id: request.image_id, bboxes: request.bboxes }
    }
}
