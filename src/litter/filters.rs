use crate::litter::WasteDetection;
use crate::utils::{iou, BBox};

/// Drops detections whose confidence is known and falls below
/// `min_confidence`. Unscored detections are kept.
pub fn retain_confident(detections: &mut Vec<WasteDetection>, min_confidence: f32) {
    detections.retain(|detection| match detection.confidence {
        Some(confidence) => confidence >= min_confidence,
        None => true,
    });
}

/// Drops detections whose box center lies inside any disposal zone. Waste
/// put into a configured bin region never enters tracking.
pub fn retain_outside_zones(detections: &mut Vec<WasteDetection>, zones: &[BBox]) {
    detections.retain(|detection| {
        let center = detection.bbox.center();
        !zones.iter().any(|zone| zone.contains(&center))
    });
}

/// Drops detections overlapping any person box with IoU strictly above
/// `min_iou`. Waste still carried on a person is not free-standing litter.
pub fn retain_clear_of_persons(
    detections: &mut Vec<WasteDetection>,
    persons: &[BBox],
    min_iou: f32,
) {
    detections.retain(|detection| {
        !persons
            .iter()
            .any(|person| iou(&detection.bbox, person) > min_iou)
    });
}
