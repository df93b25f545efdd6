//! Geometry value model
//!
//! Plain value types for the four geometric kinds a layout stream can carry,
//! plus edge insets:
//!
//! - [`Point`], [`Size`] and [`Rect`] in a top-left-origin coordinate space
//! - [`EdgeInsets`] for insetting rects
//! - [`GeometryValue`], the closed tagged union every combinator works on
//!
//! All types are `Copy`. Operations return new values and never mutate
//! shared instances.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2D size
///
/// Components may be negative transiently (after a subtraction, for
/// example). Operations that never grow a rect clamp them back to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// The null rect: an infinite origin with zero size
    ///
    /// Used as the fallback for insets that exceed a rect's dimensions.
    pub const NULL: Rect = Rect {
        origin: Point::new(f64::INFINITY, f64::INFINITY),
        size: Size::ZERO,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rect at the origin (0, 0) with the given size
    pub fn with_size(size: Size) -> Self {
        size.to_rect()
    }

    /// Create a rect from center point and size
    pub fn from_center(center: Point, size: Size) -> Self {
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    /// Create a rect from two corner points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let max_x = p1.x.max(p2.x);
        let max_y = p1.y.max(p2.y);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x.min(self.origin.x + self.size.width)
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x.max(self.origin.x + self.size.width)
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y.min(self.origin.y + self.size.height)
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y.max(self.origin.y + self.size.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Whether this is [`Rect::NULL`]
    pub fn is_null(&self) -> bool {
        self.origin.x.is_infinite() && self.origin.y.is_infinite()
    }

    /// Whether the rect covers no area
    pub fn is_empty(&self) -> bool {
        self.is_null() || self.size.width == 0.0 || self.size.height == 0.0
    }

    /// Standard form: non-negative width and height, origin at the
    /// minimum-coordinate corner
    pub fn standardized(&self) -> Self {
        Rect::new(
            self.min_x(),
            self.min_y(),
            self.size.width.abs(),
            self.size.height.abs(),
        )
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Coordinate of the given edge
    pub fn edge_position(&self, edge: RectEdge) -> f64 {
        match edge {
            RectEdge::MinX => self.min_x(),
            RectEdge::MinY => self.min_y(),
            RectEdge::MaxX => self.max_x(),
            RectEdge::MaxY => self.max_y(),
        }
    }

    /// Extent of the rect along the axis that `edge` lies on
    pub fn extent(&self, edge: RectEdge) -> f64 {
        if edge.is_horizontal() {
            self.size.width.abs()
        } else {
            self.size.height.abs()
        }
    }
}

/// Edge of a rect, in a top-left-origin coordinate space
///
/// `MinY` is the top edge and `MaxY` the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RectEdge {
    MinX,
    MinY,
    MaxX,
    MaxY,
}

impl RectEdge {
    /// Whether the edge bounds the rect along the X axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, RectEdge::MinX | RectEdge::MaxX)
    }

    /// The edge on the other side of the same axis
    pub fn opposite(self) -> Self {
        match self {
            RectEdge::MinX => RectEdge::MaxX,
            RectEdge::MaxX => RectEdge::MinX,
            RectEdge::MinY => RectEdge::MaxY,
            RectEdge::MaxY => RectEdge::MinY,
        }
    }
}

/// Insets applied to each side of a rect
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// `dx` on the left and right, `dy` on the top and bottom
    pub const fn symmetric(dx: f64, dy: f64) -> Self {
        Self::new(dy, dx, dy, dx)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.x, self.y)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.width, self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.origin, self.size)
    }
}

impl fmt::Display for EdgeInsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}}}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tagged values
// ─────────────────────────────────────────────────────────────────────────────

/// The kind tag of a [`GeometryValue`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Point,
    Size,
    Rect,
    EdgeInsets,
}

impl ValueKind {
    /// Whether add/subtract/multiply/divide accept this kind
    pub fn is_arithmetic(self) -> bool {
        matches!(self, ValueKind::Scalar | ValueKind::Point | ValueKind::Size)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Point => "point",
            ValueKind::Size => "size",
            ValueKind::Rect => "rect",
            ValueKind::EdgeInsets => "edge insets",
        };
        f.write_str(name)
    }
}

/// A geometric value of one of the supported kinds
///
/// Adding a kind only requires a new variant here; every consumer matches
/// exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryValue {
    Scalar(f64),
    Point(Point),
    Size(Size),
    Rect(Rect),
    EdgeInsets(EdgeInsets),
}

impl GeometryValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            GeometryValue::Scalar(_) => ValueKind::Scalar,
            GeometryValue::Point(_) => ValueKind::Point,
            GeometryValue::Size(_) => ValueKind::Size,
            GeometryValue::Rect(_) => ValueKind::Rect,
            GeometryValue::EdgeInsets(_) => ValueKind::EdgeInsets,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            GeometryValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            GeometryValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<Size> {
        match self {
            GeometryValue::Size(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            GeometryValue::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_edge_insets(&self) -> Option<EdgeInsets> {
        match self {
            GeometryValue::EdgeInsets(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether every component is within `epsilon` of `other`'s
    ///
    /// Values of different kinds are never close.
    pub fn approx_eq(&self, other: &GeometryValue, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= epsilon || a == b;
        match (self, other) {
            (GeometryValue::Scalar(a), GeometryValue::Scalar(b)) => close(*a, *b),
            (GeometryValue::Point(a), GeometryValue::Point(b)) => {
                close(a.x, b.x) && close(a.y, b.y)
            }
            (GeometryValue::Size(a), GeometryValue::Size(b)) => {
                close(a.width, b.width) && close(a.height, b.height)
            }
            (GeometryValue::Rect(a), GeometryValue::Rect(b)) => {
                close(a.origin.x, b.origin.x)
                    && close(a.origin.y, b.origin.y)
                    && close(a.size.width, b.size.width)
                    && close(a.size.height, b.size.height)
            }
            (GeometryValue::EdgeInsets(a), GeometryValue::EdgeInsets(b)) => {
                close(a.top, b.top)
                    && close(a.left, b.left)
                    && close(a.bottom, b.bottom)
                    && close(a.right, b.right)
            }
            _ => false,
        }
    }
}

impl fmt::Display for GeometryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryValue::Scalar(v) => write!(f, "{v}"),
            GeometryValue::Point(p) => p.fmt(f),
            GeometryValue::Size(s) => s.fmt(f),
            GeometryValue::Rect(r) => r.fmt(f),
            GeometryValue::EdgeInsets(i) => i.fmt(f),
        }
    }
}

impl From<f64> for GeometryValue {
    fn from(value: f64) -> Self {
        GeometryValue::Scalar(value)
    }
}

impl From<Point> for GeometryValue {
    fn from(value: Point) -> Self {
        GeometryValue::Point(value)
    }
}

impl From<Size> for GeometryValue {
    fn from(value: Size) -> Self {
        GeometryValue::Size(value)
    }
}

impl From<Rect> for GeometryValue {
    fn from(value: Rect) -> Self {
        GeometryValue::Rect(value)
    }
}

impl From<EdgeInsets> for GeometryValue {
    fn from(value: EdgeInsets) -> Self {
        GeometryValue::EdgeInsets(value)
    }
}
