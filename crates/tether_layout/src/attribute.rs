//! Layout attributes
//!
//! The named pieces of geometry a binding can drive. Attributes are totally
//! ordered: when several are bound, they are applied in that order, each
//! overwriting only the component it governs.

use std::fmt;

use tether_core::{
    GeometryError, GeometryValue, Point, Rect, RectEdge, Result, ValueKind, WritingDirection,
};

/// A bindable piece of a target's geometry, in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayoutAttribute {
    Rect,
    Size,
    Origin,
    Height,
    Width,
    Center,
    CenterX,
    CenterY,
    Bottom,
    Right,
    Top,
    Left,
    Trailing,
    Leading,
    /// Absolute Y position the target's first baseline should land on
    ///
    /// Usually bound to another element's baselines (see
    /// `Target::baselines` and `Trampoline::baselines`).
    Baseline,
}

impl LayoutAttribute {
    /// Every attribute in evaluation order
    pub const ALL: [LayoutAttribute; 15] = [
        LayoutAttribute::Rect,
        LayoutAttribute::Size,
        LayoutAttribute::Origin,
        LayoutAttribute::Height,
        LayoutAttribute::Width,
        LayoutAttribute::Center,
        LayoutAttribute::CenterX,
        LayoutAttribute::CenterY,
        LayoutAttribute::Bottom,
        LayoutAttribute::Right,
        LayoutAttribute::Top,
        LayoutAttribute::Left,
        LayoutAttribute::Trailing,
        LayoutAttribute::Leading,
        LayoutAttribute::Baseline,
    ];

    /// The value kind bindings of this attribute must carry
    pub fn expected_kind(self) -> ValueKind {
        match self {
            LayoutAttribute::Rect => ValueKind::Rect,
            LayoutAttribute::Size => ValueKind::Size,
            LayoutAttribute::Origin | LayoutAttribute::Center => ValueKind::Point,
            _ => ValueKind::Scalar,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutAttribute::Rect => "rect",
            LayoutAttribute::Size => "size",
            LayoutAttribute::Origin => "origin",
            LayoutAttribute::Height => "height",
            LayoutAttribute::Width => "width",
            LayoutAttribute::Center => "center",
            LayoutAttribute::CenterX => "center_x",
            LayoutAttribute::CenterY => "center_y",
            LayoutAttribute::Bottom => "bottom",
            LayoutAttribute::Right => "right",
            LayoutAttribute::Top => "top",
            LayoutAttribute::Left => "left",
            LayoutAttribute::Trailing => "trailing",
            LayoutAttribute::Leading => "leading",
            LayoutAttribute::Baseline => "baseline",
        }
    }

    /// The edge an edge attribute aligns
    pub fn edge(self) -> Option<Edge> {
        match self {
            LayoutAttribute::Bottom => Some(Edge::Bottom),
            LayoutAttribute::Right => Some(Edge::Right),
            LayoutAttribute::Top => Some(Edge::Top),
            LayoutAttribute::Left => Some(Edge::Left),
            LayoutAttribute::Trailing => Some(Edge::Trailing),
            LayoutAttribute::Leading => Some(Edge::Leading),
            _ => None,
        }
    }

    /// Whether applying this attribute needs the writing direction
    pub fn depends_on_direction(self) -> bool {
        self.edge().is_some_and(Edge::depends_on_direction)
    }

    /// Fail with `AttributeTypeMismatch` unless `value` has the expected kind
    pub fn check(self, value: &GeometryValue) -> Result<()> {
        let expected = self.expected_kind();
        let found = value.kind();
        if found == expected {
            Ok(())
        } else {
            Err(GeometryError::AttributeTypeMismatch {
                attribute: self.name(),
                expected,
                found,
            })
        }
    }

    /// Overwrite the part of `rect` this attribute governs with `value`
    ///
    /// Baseline alignment depends on the target and is not handled here.
    pub fn apply(
        self,
        rect: Rect,
        value: &GeometryValue,
        direction: WritingDirection,
    ) -> Result<Rect> {
        self.check(value)?;

        let applied = match (self, *value) {
            (LayoutAttribute::Rect, GeometryValue::Rect(value)) => value,
            (LayoutAttribute::Size, GeometryValue::Size(size)) => {
                Rect::from_origin_size(rect.origin, size)
            }
            (LayoutAttribute::Origin, GeometryValue::Point(origin)) => {
                Rect::from_origin_size(origin, rect.size)
            }
            (LayoutAttribute::Height, GeometryValue::Scalar(height)) => {
                Rect::new(rect.x(), rect.y(), rect.width(), height)
            }
            (LayoutAttribute::Width, GeometryValue::Scalar(width)) => {
                Rect::new(rect.x(), rect.y(), width, rect.height())
            }
            (LayoutAttribute::Center, GeometryValue::Point(center)) => {
                Rect::from_center(center, rect.size)
            }
            (LayoutAttribute::CenterX, GeometryValue::Scalar(x)) => {
                Rect::from_center(Point::new(x, rect.mid_y()), rect.size)
            }
            (LayoutAttribute::CenterY, GeometryValue::Scalar(y)) => {
                Rect::from_center(Point::new(rect.mid_x(), y), rect.size)
            }
            (attribute, GeometryValue::Scalar(position)) => match attribute.edge() {
                Some(edge) => rect.aligned(edge.resolve(direction), position),
                None => {
                    return Err(GeometryError::unsupported(
                        "apply",
                        format!("{attribute} cannot be applied without a target"),
                    ))
                }
            },
            (attribute, value) => {
                return Err(GeometryError::AttributeTypeMismatch {
                    attribute: attribute.name(),
                    expected: attribute.expected_kind(),
                    found: value.kind(),
                })
            }
        };

        Ok(applied)
    }
}

impl fmt::Display for LayoutAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rect edge, possibly relative to the writing direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
}

impl Edge {
    pub fn resolve(self, direction: WritingDirection) -> RectEdge {
        match self {
            Edge::Left => RectEdge::MinX,
            Edge::Right => RectEdge::MaxX,
            Edge::Top => RectEdge::MinY,
            Edge::Bottom => RectEdge::MaxY,
            Edge::Leading => direction.leading_edge(),
            Edge::Trailing => direction.trailing_edge(),
        }
    }

    pub fn depends_on_direction(self) -> bool {
        matches!(self, Edge::Leading | Edge::Trailing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::Size;

    const LTR: WritingDirection = WritingDirection::LeftToRight;

    #[test]
    fn test_evaluation_order() {
        let mut sorted = LayoutAttribute::ALL;
        sorted.sort();
        assert_eq!(sorted, LayoutAttribute::ALL);
        assert!(LayoutAttribute::Width < LayoutAttribute::Right);
        assert!(LayoutAttribute::Trailing < LayoutAttribute::Leading);
        assert_eq!(LayoutAttribute::ALL.last(), Some(&LayoutAttribute::Baseline));
    }

    #[test]
    fn test_expected_kinds() {
        assert_eq!(LayoutAttribute::Rect.expected_kind(), ValueKind::Rect);
        assert_eq!(LayoutAttribute::Size.expected_kind(), ValueKind::Size);
        assert_eq!(LayoutAttribute::Center.expected_kind(), ValueKind::Point);
        assert_eq!(LayoutAttribute::Baseline.expected_kind(), ValueKind::Scalar);
    }

    #[test]
    fn test_check_reports_mismatch() {
        let err = LayoutAttribute::Width
            .check(&Size::new(1.0, 1.0).into())
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::AttributeTypeMismatch {
                attribute: "width",
                expected: ValueKind::Scalar,
                found: ValueKind::Size,
            }
        );
        assert_eq!(
            err.to_string(),
            "Attribute `width` expects scalar values, got size"
        );
    }

    #[test]
    fn test_apply_overwrites_only_governed_component() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(
            LayoutAttribute::Width.apply(rect, &30.0.into(), LTR),
            Ok(Rect::new(10.0, 20.0, 30.0, 50.0))
        );
        assert_eq!(
            LayoutAttribute::Origin.apply(rect, &Point::new(0.0, 0.0).into(), LTR),
            Ok(Rect::new(0.0, 0.0, 100.0, 50.0))
        );
        assert_eq!(
            LayoutAttribute::CenterX.apply(rect, &0.0.into(), LTR),
            Ok(Rect::new(-50.0, 20.0, 100.0, 50.0))
        );
        assert_eq!(
            LayoutAttribute::Bottom.apply(rect, &100.0.into(), LTR),
            Ok(Rect::new(10.0, 50.0, 100.0, 50.0))
        );
    }

    #[test]
    fn test_leading_and_trailing_follow_direction() {
        let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        let rtl = WritingDirection::RightToLeft;
        assert_eq!(
            LayoutAttribute::Leading.apply(rect, &100.0.into(), LTR),
            Ok(Rect::new(100.0, 0.0, 20.0, 10.0))
        );
        assert_eq!(
            LayoutAttribute::Leading.apply(rect, &100.0.into(), rtl),
            Ok(Rect::new(80.0, 0.0, 20.0, 10.0))
        );
        assert_eq!(
            LayoutAttribute::Trailing.apply(rect, &100.0.into(), rtl),
            Ok(Rect::new(100.0, 0.0, 20.0, 10.0))
        );
        assert!(LayoutAttribute::Leading.depends_on_direction());
        assert!(!LayoutAttribute::Left.depends_on_direction());
    }

    #[test]
    fn test_baseline_needs_a_target() {
        let result = LayoutAttribute::Baseline.apply(Rect::ZERO, &5.0.into(), LTR);
        assert!(matches!(result, Err(GeometryError::UnsupportedOperand { .. })));
    }
}
