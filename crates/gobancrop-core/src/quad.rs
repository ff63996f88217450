use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A sub-pixel coordinate in image space.
pub type Point = Point2<f64>;

/// Grid lines on one board axis. A 19x19 goban has 19 of them per axis.
pub const GRID_LINES: usize = 19;

/// An ordered quadrilateral.
///
/// Corner order is fixed: top-left, top-right, bottom-right, bottom-left.
/// Every producer and consumer relies on it; building a quad with corners
/// swapped makes the bilinear mapping silently mirror the output.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

/// Integer pixel rectangle, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl IntRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> usize {
        (self.x1 - self.x0).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.y1 - self.y0).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn intersect(&self, other: IntRect) -> IntRect {
        IntRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

impl Quad {
    pub fn new(tl: Point, tr: Point, br: Point, bl: Point) -> Self {
        Self { tl, tr, br, bl }
    }

    /// Build an axis-aligned quad from bounding-box extremes, corners in the
    /// canonical order.
    pub fn axis_aligned(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            tl: Point::new(min_x, min_y),
            tr: Point::new(max_x, min_y),
            br: Point::new(max_x, max_y),
            bl: Point::new(min_x, max_y),
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Bilinear blend of the corners: `(0,0)` is the top-left corner,
    /// `(1,0)` top-right, `(1,1)` bottom-right, `(0,1)` bottom-left.
    #[inline]
    pub fn interpolate(&self, u: f64, v: f64) -> Point {
        let top_x = (1.0 - u) * self.tl.x + u * self.tr.x;
        let bot_x = (1.0 - u) * self.bl.x + u * self.br.x;
        let top_y = (1.0 - u) * self.tl.y + u * self.tr.y;
        let bot_y = (1.0 - u) * self.bl.y + u * self.br.y;
        Point::new((1.0 - v) * top_x + v * bot_x, (1.0 - v) * top_y + v * bot_y)
    }

    /// Inset an axis-aligned quad by half a grid cell on every side.
    ///
    /// A board's 19 lines span its surface edge-to-edge minus margins, so
    /// one cell is span/18 and half of it trims the margin and coordinate
    /// labels. This is the fallback applied when grid detection fails.
    pub fn shrink_aligned(&self) -> Quad {
        let (min_x, min_y) = (self.tl.x, self.tl.y);
        let (max_x, max_y) = (self.br.x, self.br.y);
        let cell = (max_x - min_x) / (GRID_LINES - 1) as f64;
        let inset = cell * 0.5;
        Quad::axis_aligned(min_x + inset, min_y + inset, max_x - inset, max_y - inset)
    }

    /// Integer bounding rectangle: floor of the minima, ceil of the maxima,
    /// half-open.
    pub fn bounding_rect(&self) -> IntRect {
        let corners = self.corners();
        let mut min_x = corners[0].x;
        let mut min_y = corners[0].y;
        let mut max_x = min_x;
        let mut max_y = min_y;
        for p in &corners[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        IntRect::new(
            min_x.floor() as i32,
            min_y.floor() as i32,
            max_x.ceil() as i32,
            max_y.ceil() as i32,
        )
    }
}
