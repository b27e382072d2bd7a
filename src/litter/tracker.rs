use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::litter::{is_attached, TrackerError, WasteDetection, WasteTrack};
use crate::utils::{euclidean_distance, iou, BBox};

/// Rule for deciding whether a raw waste detection is the same physical
/// object as an existing track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchingPolicy {
    /// Boxes must repeat coordinate for coordinate. Suits deterministic
    /// upstream detectors only: any jitter forks a fresh track.
    Exact,
    /// Greedy nearest neighbour on box centers. A detection claims the
    /// closest unclaimed track when the distance undercuts half the
    /// detection's diagonal or `max_distance` pixels.
    ClosestCenter { max_distance: f32 },
    /// Greedy greatest overlap. A detection claims the unclaimed track of
    /// maximal IoU when the overlap strictly exceeds `min_iou`.
    Overlap { min_iou: f32 },
}

/// One-shot record emitted on the frame a waste track crosses the littering
/// time threshold.
#[derive(Debug, Clone)]
pub struct LitteringEvent {
    /// Unique id of this emission. A track that re-attaches and litters
    /// again produces a fresh incident.
    pub incident: Uuid,
    pub track_id: u64,
    pub bbox: BBox,
    /// Continuous separation accumulated when the event fired
    pub separated_for: Duration,
    pub label: Option<String>,
}

impl LitteringEvent {
    /// Separation time in seconds, the unit reports and overlays work in.
    pub fn seconds(&self) -> f64 {
        as_seconds(self.separated_for)
    }
}

/// Outcome of a single `update` call: the littering events that fired this
/// frame plus a snapshot of every live track for rendering or reporting.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub events: Vec<LitteringEvent>,
    pub tracks: HashMap<u64, WasteTrack>,
}

// Littering timers live in wall-clock space, thresholds in plain seconds
fn as_seconds(elapsed: Duration) -> f64 {
    elapsed.num_milliseconds() as f64 / 1000.0
}

/// Tracks waste objects against hand positions and flags waste as littered
/// once hand-to-waste separation outlasts the configured time threshold.
pub struct WasteTracker {
    // Pixel distance below which a hand still holds a waste object. Default is 50.0
    separation_threshold: f32,
    // Seconds of continuous separation before a littering event fires. Default is 2.0
    littering_time_threshold: f64,
    // Rule for carrying identity across frames. Default is exact repetition
    matching: MatchingPolicy,
    // Max no match (max number of frames when object could not be found again). Default is 0
    max_no_match: usize,
    // Storage
    objects: HashMap<u64, WasteTrack>,
    // Monotone id source; pre-incremented so the first track gets id 1
    waste_counter: u64,
}

impl WasteTracker {
    /// Creates default instance of WasteTracker
    ///
    /// Basic usage:
    ///
    /// ```
    /// use litter_rs::litter::WasteTracker;
    /// let mut tracker = WasteTracker::default();
    /// ```
    pub fn default() -> Self {
        return WasteTracker {
            separation_threshold: 50.0,
            littering_time_threshold: 2.0,
            matching: MatchingPolicy::Exact,
            max_no_match: 0,
            objects: HashMap::new(),
            waste_counter: 0,
        };
    }
    /// Creates new instance of WasteTracker
    ///
    /// Basic usage:
    ///
    /// ```
    /// use litter_rs::litter::WasteTracker;
    /// let separation_threshold: f32 = 80.0;
    /// let littering_time_threshold: f64 = 2.0;
    /// let mut tracker = WasteTracker::new(separation_threshold, littering_time_threshold).unwrap();
    /// ```
    pub fn new(
        separation_threshold: f32,
        littering_time_threshold: f64,
    ) -> Result<Self, TrackerError> {
        if !separation_threshold.is_finite() || separation_threshold < 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "separation_threshold must be a finite non-negative number of pixels, got {}",
                separation_threshold
            )));
        }
        if !littering_time_threshold.is_finite() || littering_time_threshold < 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "littering_time_threshold must be a finite non-negative number of seconds, got {}",
                littering_time_threshold
            )));
        }
        Ok(WasteTracker {
            separation_threshold,
            littering_time_threshold,
            matching: MatchingPolicy::Exact,
            max_no_match: 0,
            objects: HashMap::new(),
            waste_counter: 0,
        })
    }

    /// Selects how raw detections are associated to existing tracks
    ///
    /// Basic usage:
    ///
    /// ```
    /// use litter_rs::litter::{MatchingPolicy, WasteTracker};
    /// let mut tracker = WasteTracker::default()
    ///     .with_matching(MatchingPolicy::ClosestCenter { max_distance: 30.0 });
    /// ```
    pub fn with_matching(mut self, matching: MatchingPolicy) -> Self {
        self.matching = matching;
        self
    }

    /// Lets a track survive the given number of consecutive undetected
    /// frames before removal, keeping its id and separation timer across
    /// short detector misses. Zero (the default) deletes on the first miss.
    pub fn with_max_no_match(mut self, max_no_match: usize) -> Self {
        self.max_no_match = max_no_match;
        self
    }

    pub fn get_separation_threshold(&self) -> f32 {
        self.separation_threshold
    }
    pub fn get_littering_time_threshold(&self) -> f64 {
        self.littering_time_threshold
    }
    /// Live tracks keyed by id
    pub fn tracks(&self) -> &HashMap<u64, WasteTrack> {
        &self.objects
    }
    pub fn len(&self) -> usize {
        self.objects.len()
    }
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Advances the tracker by one frame.
    ///
    /// `hand_boxes` and `waste_detections` are this frame's detector output,
    /// `now` is the frame timestamp. Returns the littering events that fired
    /// during this call together with a snapshot of every live track.
    ///
    /// A malformed box (x1 >= x2 or y1 >= y2) rejects the whole frame before
    /// any tracker state changes.
    ///
    /// Basic usage:
    ///
    /// ```
    /// use chrono::Utc;
    /// use litter_rs::litter::{WasteDetection, WasteTracker};
    /// use litter_rs::utils::BBox;
    ///
    /// let mut tracker = WasteTracker::default();
    /// let hands = vec![BBox::new(90.0, 90.0, 140.0, 140.0)];
    /// let waste = vec![WasteDetection::new(BBox::new(100.0, 100.0, 150.0, 150.0))];
    /// let result = tracker.update(&hands, &waste, Utc::now()).unwrap();
    /// assert!(result.events.is_empty());
    /// assert_eq!(result.tracks.len(), 1);
    /// ```
    pub fn update(
        &mut self,
        hand_boxes: &[BBox],
        waste_detections: &[WasteDetection],
        now: DateTime<Utc>,
    ) -> Result<FrameResult, TrackerError> {
        for bbox in hand_boxes {
            if !bbox.is_valid() {
                return Err(TrackerError::InvalidBBox(format!(
                    "hand box must satisfy x1 < x2 and y1 < y2, got {:?}",
                    bbox
                )));
            }
        }
        for detection in waste_detections {
            if !detection.bbox.is_valid() {
                return Err(TrackerError::InvalidBBox(format!(
                    "waste box must satisfy x1 < x2 and y1 < y2, got {:?}",
                    detection.bbox
                )));
            }
        }

        // Associate detections to existing tracks before touching any state
        let matches = self.associate(waste_detections);
        let mut matched_tracks: HashSet<u64> = HashSet::new();
        let mut matched_detections: HashSet<usize> = HashSet::new();
        for (track_id, detection_idx) in &matches {
            if let Some(track) = self.objects.get_mut(track_id) {
                track.refresh(&waste_detections[*detection_idx]);
            }
            matched_tracks.insert(*track_id);
            matched_detections.insert(*detection_idx);
        }

        // Age unmatched tracks and clean up the ones past their allowance
        self.objects.retain(|track_id, track| {
            if !matched_tracks.contains(track_id) {
                track.inc_no_match();
            }
            track.get_no_match_times() <= self.max_no_match // <- keep while within the allowance
        });

        // Classify survivors against this frame's hands. Tracks registered
        // further down enter as attached and get classified on their next
        // appearance.
        let mut events: Vec<LitteringEvent> = Vec::new();
        for (track_id, track) in self.objects.iter_mut() {
            let bbox = track.get_bbox();
            if is_attached(&bbox, hand_boxes, self.separation_threshold) {
                track.mark_attached();
                continue;
            }
            track.mark_separated(now);
            let elapsed = match track.separated_for(now) {
                Some(elapsed) => elapsed,
                None => continue,
            };
            if as_seconds(elapsed) >= self.littering_time_threshold && !track.is_littered() {
                track.latch_littered();
                events.push(LitteringEvent {
                    incident: Uuid::new_v4(),
                    track_id: *track_id,
                    bbox,
                    separated_for: elapsed,
                    label: track.get_label().map(String::from),
                });
            }
        }

        // Register brand-new waste objects last
        for (detection_idx, detection) in waste_detections.iter().enumerate() {
            if matched_detections.contains(&detection_idx) {
                continue;
            }
            if matches!(self.matching, MatchingPolicy::Exact)
                && self
                    .objects
                    .values()
                    .any(|track| track.get_bbox() == detection.bbox)
            {
                // Exact mode keeps at most one track per distinct box, so a
                // same-frame duplicate detection is dropped
                continue;
            }
            self.waste_counter += 1;
            self.objects
                .insert(self.waste_counter, WasteTrack::new(self.waste_counter, detection));
        }

        Ok(FrameResult {
            events,
            tracks: self.objects.clone(),
        })
    }

    // Computes (track id, detection index) pairs for this frame under the
    // configured policy. Each track and each detection is claimed at most once
    fn associate(&self, waste_detections: &[WasteDetection]) -> Vec<(u64, usize)> {
        let mut matches: Vec<(u64, usize)> = Vec::new();
        // We need to prevent double update of tracks
        let mut reserved_tracks: HashSet<u64> = HashSet::new();
        for (detection_idx, detection) in waste_detections.iter().enumerate() {
            let candidate = match self.matching {
                MatchingPolicy::Exact => self.find_exact(detection, &reserved_tracks),
                MatchingPolicy::ClosestCenter { max_distance } => {
                    self.find_closest_center(detection, &reserved_tracks, max_distance)
                }
                MatchingPolicy::Overlap { min_iou } => {
                    self.find_best_overlap(detection, &reserved_tracks, min_iou)
                }
            };
            if let Some(track_id) = candidate {
                reserved_tracks.insert(track_id);
                matches.push((track_id, detection_idx));
            }
        }
        matches
    }

    fn find_exact(&self, detection: &WasteDetection, reserved: &HashSet<u64>) -> Option<u64> {
        for (track_id, track) in self.objects.iter() {
            if reserved.contains(track_id) {
                continue;
            }
            if track.get_bbox() == detection.bbox {
                return Some(*track_id);
            }
        }
        None
    }

    fn find_closest_center(
        &self,
        detection: &WasteDetection,
        reserved: &HashSet<u64>,
        max_distance: f32,
    ) -> Option<u64> {
        // Find existing track with min distance to the new detection
        let detection_center = detection.bbox.center();
        let mut min_id: Option<u64> = None;
        let mut min_distance = f32::MAX;
        for (track_id, track) in self.objects.iter() {
            if reserved.contains(track_id) {
                continue;
            }
            let dist = euclidean_distance(&detection_center, &track.get_bbox().center());
            if dist < min_distance {
                min_distance = dist;
                min_id = Some(*track_id);
            }
        }
        // Additional check to filter objects
        if min_distance < detection.bbox.diagonal() * 0.5 || min_distance < max_distance {
            return min_id;
        }
        None
    }

    fn find_best_overlap(
        &self,
        detection: &WasteDetection,
        reserved: &HashSet<u64>,
        min_iou: f32,
    ) -> Option<u64> {
        let mut max_id: Option<u64> = None;
        let mut max_iou = 0.0;
        for (track_id, track) in self.objects.iter() {
            if reserved.contains(track_id) {
                continue;
            }
            let iou_value = iou(&detection.bbox, &track.get_bbox());
            if iou_value > max_iou {
                max_iou = iou_value;
                max_id = Some(*track_id);
            }
        }
        // Filter by min IoU threshold
        if max_iou > min_iou {
            return max_id;
        }
        None
    }
}

use std::fmt;
impl fmt::Display for WasteTracker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Separation threshold: {}px\n\tLittering time threshold: {}s\n\tLive tracks: {}",
            self.separation_threshold,
            self.littering_time_threshold,
            self.objects.len()
        )
    }
}
