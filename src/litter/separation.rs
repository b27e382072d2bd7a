use crate::utils::{euclidean_distance, BBox};

/// Distance between a hand box and a waste box, measured center to center.
pub fn center_distance(hand: &BBox, waste: &BBox) -> f32 {
    euclidean_distance(&hand.center(), &waste.center())
}

/// Distance from the waste box to the closest hand seen this frame, if any
/// hand was detected at all.
pub fn nearest_hand_distance(waste: &BBox, hands: &[BBox]) -> Option<f32> {
    hands
        .iter()
        .map(|hand| center_distance(hand, waste))
        .reduce(f32::min)
}

/// A waste box counts as attached while at least one hand center lies
/// strictly closer than `separation_threshold` pixels. No hands in the
/// frame means separated.
pub fn is_attached(waste: &BBox, hands: &[BBox], separation_threshold: f32) -> bool {
    hands
        .iter()
        .any(|hand| center_distance(hand, waste) < separation_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        // Centers sit exactly 50px apart (30-40-50 triangle)
        let waste = BBox::new(20.0, 30.0, 40.0, 50.0);
        let hand = BBox::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(center_distance(&hand, &waste), 50.0);
        assert!(!is_attached(&waste, &[hand], 50.0));
        assert!(is_attached(&waste, &[hand], 50.1));
    }

    #[test]
    fn test_no_hands_means_separated() {
        let waste = BBox::new(100.0, 100.0, 150.0, 150.0);
        assert!(!is_attached(&waste, &[], 1000.0));
        assert_eq!(nearest_hand_distance(&waste, &[]), None);
    }

    #[test]
    fn test_nearest_hand_wins() {
        let waste = BBox::new(20.0, 30.0, 40.0, 50.0);
        let far = BBox::new(-10.0, -10.0, 10.0, 10.0);
        // Center offset from the waste center by (3, 4)
        let near = BBox::new(23.0, 34.0, 43.0, 54.0);
        assert_eq!(nearest_hand_distance(&waste, &[far, near]), Some(5.0));
        assert!(is_attached(&waste, &[far, near], 6.0));
    }
}
