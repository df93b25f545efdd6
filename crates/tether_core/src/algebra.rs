//! Type-preserving arithmetic and rounding over [`GeometryValue`]
//!
//! Arithmetic accepts scalars, points and sizes. Every operand of one
//! combination must carry the same kind, and the result carries that kind.
//! Points and sizes are combined component-wise.
//!
//! Rounding is directional so pixel-snapped content never stretches:
//! `floor` never grows a size, `ceil` on a rect returns the smallest integral
//! rect containing it, and points always round toward negative infinity.

use crate::error::{GeometryError, Result};
use crate::geometry::{GeometryValue, Point, Rect, Size};

/// Sum of the operands
pub fn add(values: &[GeometryValue]) -> Result<GeometryValue> {
    fold("add", values, |a, b| a + b)
}

/// First operand minus every following operand, left to right
pub fn subtract(values: &[GeometryValue]) -> Result<GeometryValue> {
    fold("subtract", values, |a, b| a - b)
}

/// Product of the operands
pub fn multiply(values: &[GeometryValue]) -> Result<GeometryValue> {
    fold("multiply", values, |a, b| a * b)
}

/// First operand divided by every following operand, left to right
pub fn divide(values: &[GeometryValue]) -> Result<GeometryValue> {
    fold("divide", values, |a, b| a / b)
}

fn fold(
    operation: &'static str,
    values: &[GeometryValue],
    op: fn(f64, f64) -> f64,
) -> Result<GeometryValue> {
    let (first, rest) = values
        .split_first()
        .ok_or_else(|| GeometryError::unsupported(operation, "no operands"))?;

    if !first.kind().is_arithmetic() {
        return Err(not_arithmetic(operation, first));
    }

    rest.iter()
        .try_fold(*first, |acc, value| combine(operation, acc, *value, op))
}

fn combine(
    operation: &'static str,
    lhs: GeometryValue,
    rhs: GeometryValue,
    op: fn(f64, f64) -> f64,
) -> Result<GeometryValue> {
    match (lhs, rhs) {
        (GeometryValue::Scalar(a), GeometryValue::Scalar(b)) => Ok(GeometryValue::Scalar(op(a, b))),
        (GeometryValue::Point(a), GeometryValue::Point(b)) => {
            Ok(GeometryValue::Point(Point::new(op(a.x, b.x), op(a.y, b.y))))
        }
        (GeometryValue::Size(a), GeometryValue::Size(b)) => Ok(GeometryValue::Size(Size::new(
            op(a.width, b.width),
            op(a.height, b.height),
        ))),
        (lhs, rhs) if lhs.kind() != rhs.kind() => Err(GeometryError::unsupported(
            operation,
            format!("cannot combine {} with {}", lhs.kind(), rhs.kind()),
        )),
        (lhs, _) => Err(not_arithmetic(operation, &lhs)),
    }
}

fn not_arithmetic(operation: &'static str, value: &GeometryValue) -> GeometryError {
    GeometryError::unsupported(
        operation,
        format!("{} values do not support arithmetic", value.kind()),
    )
}

/// Multiply every component by -1
///
/// Rects are flipped across both axes and then standardized.
pub fn negate(value: GeometryValue) -> Result<GeometryValue> {
    match value {
        GeometryValue::Scalar(v) => Ok(GeometryValue::Scalar(-v)),
        GeometryValue::Point(p) => Ok(GeometryValue::Point(Point::new(-p.x, -p.y))),
        GeometryValue::Size(s) => Ok(GeometryValue::Size(Size::new(-s.width, -s.height))),
        GeometryValue::Rect(r) => Ok(GeometryValue::Rect(
            Rect::new(-r.origin.x, -r.origin.y, -r.size.width, -r.size.height).standardized(),
        )),
        GeometryValue::EdgeInsets(_) => Err(GeometryError::unsupported(
            "negate",
            "edge insets cannot be negated",
        )),
    }
}

/// Round to integral values, preferring smaller sizes
pub fn floor(value: GeometryValue) -> Result<GeometryValue> {
    match value {
        GeometryValue::Scalar(v) => Ok(GeometryValue::Scalar(v.floor())),
        GeometryValue::Point(p) => Ok(GeometryValue::Point(floor_point(p))),
        GeometryValue::Size(s) => Ok(GeometryValue::Size(Size::new(
            s.width.floor(),
            s.height.floor(),
        ))),
        GeometryValue::Rect(r) => Ok(GeometryValue::Rect(floor_rect(r))),
        GeometryValue::EdgeInsets(_) => Err(GeometryError::unsupported(
            "floor",
            "edge insets cannot be rounded",
        )),
    }
}

/// Round to integral values, preferring larger sizes
///
/// Points still round toward negative infinity, matching how integral rects
/// round their origin.
pub fn ceil(value: GeometryValue) -> Result<GeometryValue> {
    match value {
        GeometryValue::Scalar(v) => Ok(GeometryValue::Scalar(v.ceil())),
        GeometryValue::Point(p) => Ok(GeometryValue::Point(floor_point(p))),
        GeometryValue::Size(s) => Ok(GeometryValue::Size(Size::new(
            s.width.ceil(),
            s.height.ceil(),
        ))),
        GeometryValue::Rect(r) => Ok(GeometryValue::Rect(integral_rect(r))),
        GeometryValue::EdgeInsets(_) => Err(GeometryError::unsupported(
            "ceil",
            "edge insets cannot be rounded",
        )),
    }
}

/// Move a point up and left onto integral coordinates
pub fn floor_point(point: Point) -> Point {
    Point::new(point.x.floor(), point.y.floor())
}

/// Floor the origin and the size of the standardized rect, so it never grows
pub fn floor_rect(rect: Rect) -> Rect {
    if rect.is_null() {
        return rect;
    }
    let rect = rect.standardized();
    Rect::new(
        rect.origin.x.floor(),
        rect.origin.y.floor(),
        rect.size.width.floor(),
        rect.size.height.floor(),
    )
}

/// Smallest integral rect containing `rect`
pub fn integral_rect(rect: Rect) -> Rect {
    if rect.is_null() {
        return rect;
    }
    let min_x = rect.min_x().floor();
    let min_y = rect.min_y().floor();
    let max_x = rect.max_x().ceil();
    let max_y = rect.max_y().ceil();
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
