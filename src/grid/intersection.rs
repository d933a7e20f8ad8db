use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grows the rectangle by `margin` on every side.
    #[must_use]
    pub fn expanded(self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right >= left && bottom >= top).then(|| Self::new(left, top, right - left, bottom - top))
    }
}

/// Fraction of `target` visible inside `root` grown by `root_margin`.
///
/// Zero-area targets report `1.0` when they touch the root and `0.0` otherwise.
#[must_use]
pub fn intersection_ratio(target: PixelRect, root: PixelRect, root_margin: f64) -> f64 {
    let root = root.expanded(root_margin);
    let Some(overlap) = target.intersection(root) else {
        return 0.0;
    };
    let target_area = target.area();
    if target_area <= 0.0 {
        return 1.0;
    }
    (overlap.area() / target_area).clamp(0.0, 1.0)
}

/// Intersection-observer style visibility test.
///
/// A zero threshold accepts any touching placeholder.
#[must_use]
pub fn is_intersecting(target: PixelRect, root: PixelRect, root_margin: f64, threshold: f64) -> bool {
    let root_grown = root.expanded(root_margin);
    if target.intersection(root_grown).is_none() {
        return false;
    }
    threshold <= 0.0 || intersection_ratio(target, root, root_margin) >= threshold
}
