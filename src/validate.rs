//! Bounding-box geometry validation.

use crate::error::ApiError;
use crate::model::BoundingBox;

/// Validate submitted boxes in order.
///
/// Stops at the first box whose minimum coordinate is not strictly less
/// than its maximum on both axes. The whole submission is rejected
/// atomically; earlier valid boxes do not produce partial acceptance.
///
/// # Errors
///
/// Returns [`ApiError::InvalidBoundingBox`] on the first violation.
pub fn validate_bboxes(bboxes: &[BoundingBox]) -> Result<(), ApiError> {
    for bbox in bboxes {
        if !bbox.is_valid() {
            return Err(ApiError::InvalidBoundingBox);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> BoundingBox {
        BoundingBox { x_min, y_min, x_max, y_max, color: "red".into(), shape: "rectangle".into() }
    }

    #[test]
    fn accepts_valid_box() {
        assert!(validate_bboxes(&[bbox(10, 20, 100, 200)]).is_ok());
    }

    #[test]
    fn accepts_empty_submission() {
        assert!(validate_bboxes(&[]).is_ok());
    }

    #[test]
    fn rejects_equal_x() {
        assert!(matches!(
            validate_bboxes(&[bbox(10, 20, 10, 200)]),
            Err(ApiError::InvalidBoundingBox)
        ));
    }

    #[test]
    fn rejects_equal_y() {
        assert!(validate_bboxes(&[bbox(10, 20, 100, 20)]).is_err());
    }

    #[test]
    fn rejects_inverted_x() {
        assert!(validate_bboxes(&[bbox(100, 20, 10, 200)]).is_err());
    }

    #[test]
    fn rejects_inverted_y() {
        assert!(validate_bboxes(&[bbox(10, 200, 100, 20)]).is_err());
    }

    #[test]
    fn rejection_is_atomic() {
        // One valid box does not save a submission with an invalid one.
        let boxes = [bbox(10, 20, 100, 200), bbox(50, 50, 50, 60)];
        assert!(validate_bboxes(&boxes).is_err());
    }

    #[test]
    fn invalid_box_position_does_not_matter() {
        let boxes = [bbox(5, 5, 5, 10), bbox(10, 20, 100, 200)];
        assert!(validate_bboxes(&boxes).is_err());
    }

    #[test]
    fn accepts_negative_coordinates() {
        assert!(validate_bboxes(&[bbox(-50, -50, -10, -10)]).is_ok());
    }
}
