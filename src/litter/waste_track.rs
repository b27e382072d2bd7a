use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::litter::WasteDetection;
use crate::utils::BBox;

/// Lifecycle state of a tracked waste object, derived from its separation
/// timer and littered latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// A hand is (or was most recently) close enough to hold the object
    Attached,
    /// No hand within reach; the littering timer is running
    Separated,
    /// Separation outlasted the time threshold and the event already fired
    Littered,
}

impl TrackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackState::Attached => "ATTACHED",
            TrackState::Separated => "SEPARATED",
            TrackState::Littered => "LITTERED",
        }
    }
}

impl fmt::Display for TrackState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Waste object carried across frames by the tracker.
///
/// Tracks are created and mutated only by `WasteTracker::update`; callers
/// read them through the snapshot returned from each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteTrack {
    id: u64,
    bbox: BBox,
    label: Option<String>,
    confidence: Option<f32>,
    // First frame timestamp of the current separation episode, if any
    separated_since: Option<DateTime<Utc>>,
    littered: bool,
    no_match_times: usize,
}

impl WasteTrack {
    pub(crate) fn new(id: u64, detection: &WasteDetection) -> Self {
        WasteTrack {
            id,
            bbox: detection.bbox,
            label: detection.label.clone(),
            confidence: detection.confidence,
            separated_since: None,
            littered: false,
            no_match_times: 0,
        }
    }

    pub fn get_id(&self) -> u64 {
        self.id
    }
    pub fn get_bbox(&self) -> BBox {
        self.bbox
    }
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    pub fn get_confidence(&self) -> Option<f32> {
        self.confidence
    }
    pub fn get_separated_since(&self) -> Option<DateTime<Utc>> {
        self.separated_since
    }
    pub fn get_no_match_times(&self) -> usize {
        self.no_match_times
    }
    pub fn is_littered(&self) -> bool {
        self.littered
    }

    pub fn get_state(&self) -> TrackState {
        if self.littered {
            TrackState::Littered
        } else if self.separated_since.is_some() {
            TrackState::Separated
        } else {
            TrackState::Attached
        }
    }

    /// Continuous separation time accumulated by `now`, if the object is
    /// currently away from every hand.
    pub fn separated_for(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.separated_since.map(|since| now - since)
    }

    /// Overlay caption for this track at time `now`, in the format the
    /// rendering side paints next to boxes: `ATTACHED`, `SEPARATED (1.3s)`
    /// or `LITTERED`.
    pub fn status_label(&self, now: DateTime<Utc>) -> String {
        if self.littered {
            return "LITTERED".to_string();
        }
        match self.separated_for(now) {
            Some(elapsed) => format!(
                "SEPARATED ({:.1}s)",
                elapsed.num_milliseconds() as f64 / 1000.0
            ),
            None => "ATTACHED".to_string(),
        }
    }

    // Take over bbox/label/confidence from the matched detection and reset
    // the miss counter
    pub(crate) fn refresh(&mut self, detection: &WasteDetection) {
        self.bbox = detection.bbox;
        self.label = detection.label.clone();
        self.confidence = detection.confidence;
        self.no_match_times = 0;
    }

    pub(crate) fn inc_no_match(&mut self) {
        self.no_match_times += 1
    }

    // Starts the separation clock on the first hands-free frame; later
    // separated frames keep the first instant so elapsed time accumulates
    pub(crate) fn mark_separated(&mut self, now: DateTime<Utc>) {
        if self.separated_since.is_none() {
            self.separated_since = Some(now);
        }
    }

    // Re-attachment resets the timer and re-arms the littering event
    pub(crate) fn mark_attached(&mut self) {
        self.separated_since = None;
        self.littered = false;
    }

    pub(crate) fn latch_littered(&mut self) {
        self.littered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::litter::test_data::at;
    use crate::utils::BBox;

    #[test]
    fn test_state_follows_timer_and_latch() {
        let detection = WasteDetection::new(BBox::new(10.0, 10.0, 60.0, 60.0));
        let mut track = WasteTrack::new(1, &detection);
        assert_eq!(track.get_state(), TrackState::Attached);
        assert_eq!(track.get_state().to_string(), "ATTACHED");

        track.mark_separated(at(1.0));
        assert_eq!(track.get_state(), TrackState::Separated);
        assert_eq!(track.get_separated_since(), Some(at(1.0)));

        // Repeated separated frames must not restart the clock
        track.mark_separated(at(2.0));
        assert_eq!(track.get_separated_since(), Some(at(1.0)));

        track.latch_littered();
        assert_eq!(track.get_state(), TrackState::Littered);

        track.mark_attached();
        assert_eq!(track.get_state(), TrackState::Attached);
        assert_eq!(track.get_separated_since(), None);
        assert!(!track.is_littered());
    }

    #[test]
    fn test_separated_for_measures_from_episode_start() {
        let detection = WasteDetection::new(BBox::new(10.0, 10.0, 60.0, 60.0));
        let mut track = WasteTrack::new(7, &detection);
        assert_eq!(track.separated_for(at(5.0)), None);

        track.mark_separated(at(1.0));
        assert_eq!(
            track.separated_for(at(3.5)),
            Some(Duration::milliseconds(2500))
        );
    }

    #[test]
    fn test_status_label_formats() {
        let detection = WasteDetection::new(BBox::new(10.0, 10.0, 60.0, 60.0));
        let mut track = WasteTrack::new(3, &detection);
        assert_eq!(track.status_label(at(0.0)), "ATTACHED");

        track.mark_separated(at(0.0));
        assert_eq!(track.status_label(at(1.3)), "SEPARATED (1.3s)");

        track.latch_littered();
        assert_eq!(track.status_label(at(2.0)), "LITTERED");
    }

    #[test]
    fn test_refresh_overwrites_observation_only() {
        let first = WasteDetection::new(BBox::new(10.0, 10.0, 60.0, 60.0));
        let mut track = WasteTrack::new(2, &first);
        track.mark_separated(at(1.0));
        track.inc_no_match();
        assert_eq!(track.get_no_match_times(), 1);

        let second = WasteDetection::new(BBox::new(12.0, 11.0, 62.0, 61.0))
            .with_label("plastic_bottle")
            .with_confidence(0.88);
        track.refresh(&second);

        assert_eq!(track.get_id(), 2);
        assert_eq!(track.get_bbox(), BBox::new(12.0, 11.0, 62.0, 61.0));
        assert_eq!(track.get_label(), Some("plastic_bottle"));
        assert_eq!(track.get_confidence(), Some(0.88));
        assert_eq!(track.get_no_match_times(), 0);
        // The separation episode survives a refresh
        assert_eq!(track.get_separated_since(), Some(at(1.0)));
    }
}
