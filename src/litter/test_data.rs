//! Shared fixtures for tracker tests: a fixed reference clock and a few
//! frame scripts.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::litter::WasteDetection;
use crate::utils::BBox;

// Reference instant all test frames are offset from
pub fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Frame timestamp `seconds` after the reference instant
pub fn at(seconds: f64) -> DateTime<Utc> {
    t0() + Duration::milliseconds((seconds * 1000.0).round() as i64)
}

pub fn waste(x1: f32, y1: f32, x2: f32, y2: f32) -> WasteDetection {
    WasteDetection::new(BBox::new(x1, y1, x2, y2))
}

pub fn hand(x1: f32, y1: f32, x2: f32, y2: f32) -> BBox {
    BBox::new(x1, y1, x2, y2)
}

/// Three well-separated waste objects drifting right two pixels per frame,
/// emulating a slow camera pan over ten frames.
pub fn get_drift_data() -> (Vec<BBox>, Vec<BBox>, Vec<BBox>) {
    let mut ones: Vec<BBox> = Vec::new();
    let mut twos: Vec<BBox> = Vec::new();
    let mut threes: Vec<BBox> = Vec::new();
    for step in 0..10 {
        let shift = step as f32 * 2.0;
        ones.push(BBox::new(50.0 + shift, 100.0, 100.0 + shift, 150.0));
        twos.push(BBox::new(300.0 + shift, 100.0, 350.0 + shift, 150.0));
        threes.push(BBox::new(550.0 + shift, 400.0, 600.0 + shift, 450.0));
    }
    (ones, twos, threes)
}
