#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(_x: f32, _y: f32) -> Self {
        Point { x: _x, y: _y }
    }
}

/// Axis-aligned box in frame pixel space, stored corner-to-corner.
/// A well-formed box satisfies `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(_x1: f32, _y1: f32, _x2: f32, _y2: f32) -> Self {
        BBox {
            x1: _x1,
            y1: _y1,
            x2: _x2,
            y2: _y2,
        }
    }
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
    pub fn diagonal(&self) -> f32 {
        f32::sqrt(self.width() * self.width() + self.height() * self.height())
    }
    /// Inclusive bounds test: points on the edge are inside.
    pub fn contains(&self, p: &Point) -> bool {
        self.x1 <= p.x && p.x <= self.x2 && self.y1 <= p.y && p.y <= self.y2
    }
    pub fn is_valid(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }
}

pub fn euclidean_distance(p1: &Point, p2: &Point) -> f32 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    f32::sqrt(dx * dx + dy * dy)
}

/// Intersection over union of two boxes. Zero for disjoint boxes; the tiny
/// denominator epsilon keeps degenerate inputs finite.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let xa = f32::max(a.x1, b.x1);
    let ya = f32::max(a.y1, b.y1);
    let xb = f32::min(a.x2, b.x2);
    let yb = f32::min(a.y2, b.y2);

    let inter_w = f32::max(0.0, xb - xa);
    let inter_h = f32::max(0.0, yb - ya);
    let inter_area = inter_w * inter_h;

    inter_area / (a.area() + b.area() - inter_area + 1e-6)
}
