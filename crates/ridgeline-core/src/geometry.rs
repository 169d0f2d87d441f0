//! Basic 2D geometry shared by the transform, render and hit-test modules.
//!
//! All coordinates use a y-down convention: `(0, 0)` is the top-left corner
//! of the image or view, x grows to the right and y grows downward.

use serde::{Deserialize, Serialize};

/// A point in floating-point image or view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset this point by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Round to the nearest integer point.
    pub fn round(&self) -> IntPoint {
        IntPoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An integer pixel position, as stored on minutiae.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}

impl IntPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Corners in clockwise order on screen: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

/// Even-odd (ray casting) point-in-polygon test.
///
/// A horizontal ray is cast from `point` toward +x and edge crossings are
/// counted; an odd count means inside. Polygons with fewer than three
/// vertices contain nothing.
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Area-weighted centroid of a simple polygon.
///
/// Falls back to the vertex average for degenerate (zero-area) input.
pub fn polygon_centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }

    let n = vertices.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    if area2.abs() < 1e-9 {
        let sum = vertices.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
        return Some(Point::new(sum.x / n as f64, sum.y / n as f64));
    }

    Some(Point::new(cx / (3.0 * area2), cy / (3.0 * area2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point> {
        Rect::new(0.0, 0.0, size, size).corners().to_vec()
    }

    #[test]
    fn test_polygon_contains_inside_and_outside() {
        let poly = square(10.0);
        assert!(polygon_contains(&poly, Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&poly, Point::new(15.0, 5.0)));
        assert!(!polygon_contains(&poly, Point::new(-1.0, 5.0)));
    }

    #[test]
    fn test_polygon_contains_rotated_quad() {
        // Diamond centered at (10, 10)
        let poly = vec![
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 20.0),
            Point::new(0.0, 10.0),
        ];
        assert!(polygon_contains(&poly, Point::new(10.0, 10.0)));
        // Inside the bounding box but outside the diamond
        assert!(!polygon_contains(&poly, Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_polygon_contains_degenerate() {
        assert!(!polygon_contains(&[], Point::ORIGIN));
        assert!(!polygon_contains(
            &[Point::ORIGIN, Point::new(1.0, 1.0)],
            Point::new(0.5, 0.5)
        ));
    }

    #[test]
    fn test_centroid_of_rectangle() {
        let c = polygon_centroid(&Rect::new(10.0, 20.0, 100.0, 50.0).corners()).unwrap();
        assert!((c.x - 60.0).abs() < 1e-9);
        assert!((c.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_degenerate_falls_back_to_average() {
        let pts = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)];
        let c = polygon_centroid(&pts).unwrap();
        assert!((c.x - 2.0).abs() < 1e-9);
        assert!(c.y.abs() < 1e-9);
        assert!(polygon_centroid(&[]).is_none());
    }
}
