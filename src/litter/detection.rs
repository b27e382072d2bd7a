use crate::utils::BBox;

/// Single waste observation produced by the upstream detector for one frame.
///
/// The tracker never interprets `label` or `confidence`; they ride along so
/// tracks and littering events can report the object the way the detector
/// described it.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteDetection {
    pub bbox: BBox,
    pub label: Option<String>,
    pub confidence: Option<f32>,
}

impl WasteDetection {
    /// Creates new instance of WasteDetection
    ///
    /// Basic usage:
    ///
    /// ```
    /// use litter_rs::litter::WasteDetection;
    /// use litter_rs::utils::BBox;
    /// let detection = WasteDetection::new(BBox::new(100.0, 100.0, 150.0, 150.0));
    /// ```
    pub fn new(bbox: BBox) -> Self {
        WasteDetection {
            bbox,
            label: None,
            confidence: None,
        }
    }

    /// Attach the class label reported by the detector
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Attach the detector's confidence score
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}
