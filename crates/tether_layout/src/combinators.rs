//! Geometry stream combinators
//!
//! Lifts the geometry algebra and rect partitioning onto streams of
//! [`GeometryValue`]. Every combinator that reads several streams combines
//! them by latest value: it waits until each input has emitted once, then
//! recomputes from the newest value of every input whenever any of them
//! emits.
//!
//! Operands of the wrong kind fail the derived stream with a terminal
//! `UnsupportedOperand` error at the first offending emission.
//!
//! ```ignore
//! use tether_layout::combinators::GeometryStreamExt;
//!
//! let (sidebar, content) = bounds.divide_with_padding(200.0, 8.0, Edge::Leading);
//! let title = content.slice(44.0, Edge::Top).inset_width_height(16.0, 0.0, Rect::NULL);
//! ```

use tether_core::algebra;
use tether_core::{
    combine_latest, combine_latest2, EdgeInsets, GeometryError, GeometryValue, Point, Rect, Result,
    Size, Stream, ValueKind, WritingDirection,
};

use crate::attribute::{Edge, LayoutAttribute};
use crate::binding::AttributeSource;
use crate::config::writing_direction;
use crate::target::BaselineOrigin;

// ─────────────────────────────────────────────────────────────────────────────
// N-ary arithmetic
// ─────────────────────────────────────────────────────────────────────────────

/// Sum of the latest values of `streams`
pub fn add(streams: Vec<Stream<GeometryValue>>) -> Stream<GeometryValue> {
    combine_latest(streams).try_map(|values| algebra::add(&values))
}

/// First stream's latest value minus the latest value of every other stream
pub fn subtract(streams: Vec<Stream<GeometryValue>>) -> Stream<GeometryValue> {
    combine_latest(streams).try_map(|values| algebra::subtract(&values))
}

/// Product of the latest values of `streams`
pub fn multiply(streams: Vec<Stream<GeometryValue>>) -> Stream<GeometryValue> {
    combine_latest(streams).try_map(|values| algebra::multiply(&values))
}

/// First stream's latest value divided by the latest value of every other stream
pub fn divide(streams: Vec<Stream<GeometryValue>>) -> Stream<GeometryValue> {
    combine_latest(streams).try_map(|values| algebra::divide(&values))
}

/// Largest latest value, re-emitted only when it changes
///
/// Recomputed over every input on each update, so a drop in the current
/// maximum correctly falls back to the next-highest input.
pub fn max(streams: Vec<Stream<f64>>) -> Stream<f64> {
    combine_latest(streams)
        .filter_map(|values| values.into_iter().reduce(f64::max))
        .distinct_until_changed()
}

/// Smallest latest value, re-emitted only when it changes
pub fn min(streams: Vec<Stream<f64>>) -> Stream<f64> {
    combine_latest(streams)
        .filter_map(|values| values.into_iter().reduce(f64::min))
        .distinct_until_changed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Constants and constructors
// ─────────────────────────────────────────────────────────────────────────────

pub fn zero() -> Stream<GeometryValue> {
    Stream::just(GeometryValue::Scalar(0.0))
}

pub fn zero_rect() -> Stream<GeometryValue> {
    Stream::just(Rect::ZERO.into())
}

pub fn zero_size() -> Stream<GeometryValue> {
    Stream::just(Size::ZERO.into())
}

pub fn zero_point() -> Stream<GeometryValue> {
    Stream::just(Point::ZERO.into())
}

pub fn rects_with_x_y_width_height(
    x: impl Into<AttributeSource>,
    y: impl Into<AttributeSource>,
    width: impl Into<AttributeSource>,
    height: impl Into<AttributeSource>,
) -> Stream<GeometryValue> {
    let op = "rects_with_x_y_width_height";
    combine(vec![x.into(), y.into(), width.into(), height.into()], move |values| {
        Ok(Rect::new(
            scalar(op, &values[0])?,
            scalar(op, &values[1])?,
            scalar(op, &values[2])?,
            scalar(op, &values[3])?,
        )
        .into())
    })
}

pub fn rects_with_origin_size(
    origin: impl Into<AttributeSource>,
    size: impl Into<AttributeSource>,
) -> Stream<GeometryValue> {
    let op = "rects_with_origin_size";
    combine(vec![origin.into(), size.into()], move |values| {
        Ok(Rect::from_origin_size(point(op, &values[0])?, self::size(op, &values[1])?).into())
    })
}

pub fn rects_with_center_size(
    center: impl Into<AttributeSource>,
    size: impl Into<AttributeSource>,
) -> Stream<GeometryValue> {
    let op = "rects_with_center_size";
    combine(vec![center.into(), size.into()], move |values| {
        Ok(Rect::from_center(point(op, &values[0])?, self::size(op, &values[1])?).into())
    })
}

/// Zero-origin rects of each size
pub fn rects_with_size(size: impl Into<AttributeSource>) -> Stream<GeometryValue> {
    size.into()
        .to_stream()
        .try_map(|value| Ok(Rect::with_size(self::size("rects_with_size", &value)?).into()))
}

pub fn sizes_with_width_height(
    width: impl Into<AttributeSource>,
    height: impl Into<AttributeSource>,
) -> Stream<GeometryValue> {
    let op = "sizes_with_width_height";
    combine(vec![width.into(), height.into()], move |values| {
        Ok(Size::new(scalar(op, &values[0])?, scalar(op, &values[1])?).into())
    })
}

pub fn points_with_x_y(
    x: impl Into<AttributeSource>,
    y: impl Into<AttributeSource>,
) -> Stream<GeometryValue> {
    let op = "points_with_x_y";
    combine(vec![x.into(), y.into()], move |values| {
        Ok(Point::new(scalar(op, &values[0])?, scalar(op, &values[1])?).into())
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Operand helpers
// ─────────────────────────────────────────────────────────────────────────────

fn scalar(op: &'static str, value: &GeometryValue) -> Result<f64> {
    value
        .as_scalar()
        .ok_or_else(|| GeometryError::unexpected_kind(op, ValueKind::Scalar, value.kind()))
}

fn point(op: &'static str, value: &GeometryValue) -> Result<Point> {
    value
        .as_point()
        .ok_or_else(|| GeometryError::unexpected_kind(op, ValueKind::Point, value.kind()))
}

fn size(op: &'static str, value: &GeometryValue) -> Result<Size> {
    value
        .as_size()
        .ok_or_else(|| GeometryError::unexpected_kind(op, ValueKind::Size, value.kind()))
}

fn rect(op: &'static str, value: &GeometryValue) -> Result<Rect> {
    value
        .as_rect()
        .ok_or_else(|| GeometryError::unexpected_kind(op, ValueKind::Rect, value.kind()))
}

fn insets(op: &'static str, value: &GeometryValue) -> Result<EdgeInsets> {
    value
        .as_edge_insets()
        .ok_or_else(|| GeometryError::unexpected_kind(op, ValueKind::EdgeInsets, value.kind()))
}

fn combine(
    sources: Vec<AttributeSource>,
    f: impl Fn(&[GeometryValue]) -> Result<GeometryValue> + 'static,
) -> Stream<GeometryValue> {
    let streams = sources.iter().map(AttributeSource::to_stream).collect();
    combine_latest(streams).try_map(move |values| f(&values))
}

/// Writing direction for resolving `edge`
///
/// Physical edges never change, so they skip the configured stream.
fn direction_for(edge: Edge) -> Stream<WritingDirection> {
    if edge.depends_on_direction() {
        writing_direction()
    } else {
        Stream::just(WritingDirection::default())
    }
}

fn combine_directed(
    sources: Vec<AttributeSource>,
    edge: Edge,
    f: impl Fn(&[GeometryValue], WritingDirection) -> Result<GeometryValue> + 'static,
) -> Stream<GeometryValue> {
    let streams = sources.iter().map(AttributeSource::to_stream).collect();
    combine_latest2(&combine_latest(streams), &direction_for(edge))
        .try_map(move |(values, direction)| f(&values, direction))
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream extension
// ─────────────────────────────────────────────────────────────────────────────

/// Geometry operations on streams of [`GeometryValue`]
///
/// Operands accept anything convertible to an [`AttributeSource`], so
/// constants and streams mix freely.
pub trait GeometryStreamExt {
    fn plus(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn minus(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn multiplied_by(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn divided_by(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn negate(&self) -> Stream<GeometryValue>;
    fn floor(&self) -> Stream<GeometryValue>;
    fn ceil(&self) -> Stream<GeometryValue>;

    fn size(&self) -> Stream<GeometryValue>;
    fn origin(&self) -> Stream<GeometryValue>;
    fn center(&self) -> Stream<GeometryValue>;
    fn width(&self) -> Stream<GeometryValue>;
    fn height(&self) -> Stream<GeometryValue>;
    fn x(&self) -> Stream<GeometryValue>;
    fn y(&self) -> Stream<GeometryValue>;
    fn left(&self) -> Stream<GeometryValue>;
    fn right(&self) -> Stream<GeometryValue>;
    fn top(&self) -> Stream<GeometryValue>;
    fn bottom(&self) -> Stream<GeometryValue>;
    fn center_x(&self) -> Stream<GeometryValue>;
    fn center_y(&self) -> Stream<GeometryValue>;
    fn leading(&self) -> Stream<GeometryValue>;
    fn trailing(&self) -> Stream<GeometryValue>;
    fn value_for_attribute(&self, attribute: LayoutAttribute) -> Stream<GeometryValue>;

    fn replace_size(&self, size: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn replace_origin(&self, origin: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn replace_width(&self, width: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn replace_height(&self, height: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn replace_x(&self, x: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn replace_y(&self, y: impl Into<AttributeSource>) -> Stream<GeometryValue>;

    fn inset_by(
        &self,
        insets: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue>;
    fn inset_width_height(
        &self,
        width: impl Into<AttributeSource>,
        height: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue>;
    fn inset_edges(
        &self,
        top: impl Into<AttributeSource>,
        left: impl Into<AttributeSource>,
        bottom: impl Into<AttributeSource>,
        right: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue>;

    fn offset_toward(
        &self,
        amount: impl Into<AttributeSource>,
        edge: Edge,
    ) -> Stream<GeometryValue>;
    fn move_left(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn move_right(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn move_up(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn move_down(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn move_leading_outward(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn move_trailing_outward(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn extend_attribute(
        &self,
        attribute: LayoutAttribute,
        amount: impl Into<AttributeSource>,
    ) -> Stream<GeometryValue>;

    fn slice(&self, amount: impl Into<AttributeSource>, edge: Edge) -> Stream<GeometryValue>;
    fn remainder(&self, amount: impl Into<AttributeSource>, edge: Edge) -> Stream<GeometryValue>;
    fn divide(
        &self,
        amount: impl Into<AttributeSource>,
        edge: Edge,
    ) -> (Stream<GeometryValue>, Stream<GeometryValue>);
    fn divide_with_padding(
        &self,
        amount: impl Into<AttributeSource>,
        padding: impl Into<AttributeSource>,
        edge: Edge,
    ) -> (Stream<GeometryValue>, Stream<GeometryValue>);

    fn align_attribute(
        &self,
        attribute: LayoutAttribute,
        value: impl Into<AttributeSource>,
    ) -> Stream<GeometryValue>;
    fn align_center(&self, center: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_left(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_right(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_top(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_bottom(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_leading(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_trailing(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_width(&self, width: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_height(&self, height: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_center_x(&self, x: impl Into<AttributeSource>) -> Stream<GeometryValue>;
    fn align_center_y(&self, y: impl Into<AttributeSource>) -> Stream<GeometryValue>;

    /// Move each rect vertically so its baseline lines up with the reference
    /// rect's baseline
    ///
    /// Baselines are offsets from the `origin` edge of their rect.
    fn align_baseline(
        &self,
        baselines: &Stream<f64>,
        reference_baselines: &Stream<f64>,
        reference_rects: &Stream<GeometryValue>,
        origin: BaselineOrigin,
    ) -> Stream<GeometryValue>;
}

impl GeometryStreamExt for Stream<GeometryValue> {
    fn plus(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        add(vec![self.clone(), other.into().to_stream()])
    }

    fn minus(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        subtract(vec![self.clone(), other.into().to_stream()])
    }

    fn multiplied_by(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        multiply(vec![self.clone(), other.into().to_stream()])
    }

    fn divided_by(&self, other: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        divide(vec![self.clone(), other.into().to_stream()])
    }

    fn negate(&self) -> Stream<GeometryValue> {
        self.try_map(algebra::negate)
    }

    fn floor(&self) -> Stream<GeometryValue> {
        self.try_map(algebra::floor)
    }

    fn ceil(&self) -> Stream<GeometryValue> {
        self.try_map(algebra::ceil)
    }

    fn size(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("size", &value)?.size.into()))
    }

    fn origin(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("origin", &value)?.origin.into()))
    }

    fn center(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("center", &value)?.center().into()))
    }

    /// Width of rects or sizes
    fn width(&self) -> Stream<GeometryValue> {
        self.try_map(|value| match value {
            GeometryValue::Rect(rect) => Ok(rect.width().into()),
            GeometryValue::Size(size) => Ok(size.width.into()),
            other => Err(GeometryError::unexpected_kind("width", ValueKind::Rect, other.kind())),
        })
    }

    /// Height of rects or sizes
    fn height(&self) -> Stream<GeometryValue> {
        self.try_map(|value| match value {
            GeometryValue::Rect(rect) => Ok(rect.height().into()),
            GeometryValue::Size(size) => Ok(size.height.into()),
            other => Err(GeometryError::unexpected_kind("height", ValueKind::Rect, other.kind())),
        })
    }

    /// X coordinate of rect origins or points
    fn x(&self) -> Stream<GeometryValue> {
        self.try_map(|value| match value {
            GeometryValue::Rect(rect) => Ok(rect.x().into()),
            GeometryValue::Point(point) => Ok(point.x.into()),
            other => Err(GeometryError::unexpected_kind("x", ValueKind::Rect, other.kind())),
        })
    }

    /// Y coordinate of rect origins or points
    fn y(&self) -> Stream<GeometryValue> {
        self.try_map(|value| match value {
            GeometryValue::Rect(rect) => Ok(rect.y().into()),
            GeometryValue::Point(point) => Ok(point.y.into()),
            other => Err(GeometryError::unexpected_kind("y", ValueKind::Rect, other.kind())),
        })
    }

    fn left(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("left", &value)?.min_x().into()))
    }

    fn right(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("right", &value)?.max_x().into()))
    }

    fn top(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("top", &value)?.min_y().into()))
    }

    fn bottom(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("bottom", &value)?.max_y().into()))
    }

    fn center_x(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("center_x", &value)?.mid_x().into()))
    }

    fn center_y(&self) -> Stream<GeometryValue> {
        self.try_map(|value| Ok(rect("center_y", &value)?.mid_y().into()))
    }

    /// Leading edge position, re-emitted when the writing direction changes
    fn leading(&self) -> Stream<GeometryValue> {
        combine_latest2(self, &writing_direction()).try_map(|(value, direction)| {
            Ok(rect("leading", &value)?
                .edge_position(direction.leading_edge())
                .into())
        })
    }

    /// Trailing edge position, re-emitted when the writing direction changes
    fn trailing(&self) -> Stream<GeometryValue> {
        combine_latest2(self, &writing_direction()).try_map(|(value, direction)| {
            Ok(rect("trailing", &value)?
                .edge_position(direction.trailing_edge())
                .into())
        })
    }

    fn value_for_attribute(&self, attribute: LayoutAttribute) -> Stream<GeometryValue> {
        match attribute {
            LayoutAttribute::Rect => self.try_map(|value| Ok(rect("rect", &value)?.into())),
            LayoutAttribute::Size => self.size(),
            LayoutAttribute::Origin => self.origin(),
            LayoutAttribute::Height => self.height(),
            LayoutAttribute::Width => self.width(),
            LayoutAttribute::Center => self.center(),
            LayoutAttribute::CenterX => self.center_x(),
            LayoutAttribute::CenterY => self.center_y(),
            LayoutAttribute::Bottom => self.bottom(),
            LayoutAttribute::Right => self.right(),
            LayoutAttribute::Top => self.top(),
            LayoutAttribute::Left => self.left(),
            LayoutAttribute::Trailing => self.trailing(),
            LayoutAttribute::Leading => self.leading(),
            LayoutAttribute::Baseline => Stream::fail(GeometryError::unsupported(
                "value_for_attribute",
                "the baseline of a rect depends on its target",
            )),
        }
    }

    fn replace_size(&self, size: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_size";
        combine(vec![self.into(), size.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::from_origin_size(rect.origin, self::size(op, &values[1])?).into())
        })
    }

    fn replace_origin(&self, origin: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_origin";
        combine(vec![self.into(), origin.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::from_origin_size(point(op, &values[1])?, rect.size).into())
        })
    }

    fn replace_width(&self, width: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_width";
        combine(vec![self.into(), width.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::new(rect.x(), rect.y(), scalar(op, &values[1])?, rect.height()).into())
        })
    }

    fn replace_height(&self, height: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_height";
        combine(vec![self.into(), height.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::new(rect.x(), rect.y(), rect.width(), scalar(op, &values[1])?).into())
        })
    }

    fn replace_x(&self, x: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_x";
        combine(vec![self.into(), x.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::new(scalar(op, &values[1])?, rect.y(), rect.width(), rect.height()).into())
        })
    }

    fn replace_y(&self, y: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        let op = "replace_y";
        combine(vec![self.into(), y.into()], move |values| {
            let rect = rect(op, &values[0])?;
            Ok(Rect::new(rect.x(), scalar(op, &values[1])?, rect.width(), rect.height()).into())
        })
    }

    /// Inset each rect, yielding `null_rect` when the insets overflow it
    fn inset_by(
        &self,
        insets: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue> {
        let op = "inset_by";
        combine(vec![self.into(), insets.into()], move |values| {
            Ok(rect(op, &values[0])?
                .inset_by(self::insets(op, &values[1])?, null_rect)
                .into())
        })
    }

    /// Remove `width` from the left and right and `height` from the top and
    /// bottom of each rect, yielding `null_rect` when that overflows it
    fn inset_width_height(
        &self,
        width: impl Into<AttributeSource>,
        height: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue> {
        let op = "inset_width_height";
        combine(vec![self.into(), width.into(), height.into()], move |values| {
            Ok(rect(op, &values[0])?
                .inset(scalar(op, &values[1])?, scalar(op, &values[2])?, null_rect)
                .into())
        })
    }

    fn inset_edges(
        &self,
        top: impl Into<AttributeSource>,
        left: impl Into<AttributeSource>,
        bottom: impl Into<AttributeSource>,
        right: impl Into<AttributeSource>,
        null_rect: Rect,
    ) -> Stream<GeometryValue> {
        let op = "inset_edges";
        let sources = vec![self.into(), top.into(), left.into(), bottom.into(), right.into()];
        combine(sources, move |values| {
            let insets = EdgeInsets::new(
                scalar(op, &values[1])?,
                scalar(op, &values[2])?,
                scalar(op, &values[3])?,
                scalar(op, &values[4])?,
            );
            Ok(rect(op, &values[0])?.inset_by(insets, null_rect).into())
        })
    }

    /// Move rects or points `amount` toward `edge`
    fn offset_toward(
        &self,
        amount: impl Into<AttributeSource>,
        edge: Edge,
    ) -> Stream<GeometryValue> {
        let op = "offset_toward";
        combine_directed(vec![self.into(), amount.into()], edge, move |values, direction| {
            let amount = scalar(op, &values[1])?;
            let edge = edge.resolve(direction);
            match values[0] {
                GeometryValue::Rect(rect) => Ok(rect.offset_toward(amount, edge).into()),
                GeometryValue::Point(point) => Ok(point.offset_toward(amount, edge).into()),
                other => Err(GeometryError::unexpected_kind(op, ValueKind::Rect, other.kind())),
            }
        })
    }

    fn move_left(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Left)
    }

    fn move_right(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Right)
    }

    fn move_up(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Top)
    }

    fn move_down(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Bottom)
    }

    fn move_leading_outward(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Leading)
    }

    fn move_trailing_outward(&self, amount: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.offset_toward(amount, Edge::Trailing)
    }

    /// Grow each rect by `amount` at an edge attribute, or evenly for
    /// `Width` and `Height`
    fn extend_attribute(
        &self,
        attribute: LayoutAttribute,
        amount: impl Into<AttributeSource>,
    ) -> Stream<GeometryValue> {
        let op = "extend_attribute";
        let sources = vec![self.into(), amount.into()];
        match (attribute, attribute.edge()) {
            (LayoutAttribute::Width, _) => combine(sources, move |values| {
                Ok(rect(op, &values[0])?.outset_width(scalar(op, &values[1])?).into())
            }),
            (LayoutAttribute::Height, _) => combine(sources, move |values| {
                Ok(rect(op, &values[0])?.outset_height(scalar(op, &values[1])?).into())
            }),
            (_, Some(edge)) => combine_directed(sources, edge, move |values, direction| {
                Ok(rect(op, &values[0])?
                    .grow(scalar(op, &values[1])?, edge.resolve(direction))
                    .into())
            }),
            (attribute, None) => Stream::fail(GeometryError::unsupported(
                op,
                format!("{attribute} cannot be extended"),
            )),
        }
    }

    fn slice(&self, amount: impl Into<AttributeSource>, edge: Edge) -> Stream<GeometryValue> {
        let op = "slice";
        combine_directed(vec![self.into(), amount.into()], edge, move |values, direction| {
            Ok(rect(op, &values[0])?
                .slice(scalar(op, &values[1])?, edge.resolve(direction))
                .into())
        })
    }

    fn remainder(&self, amount: impl Into<AttributeSource>, edge: Edge) -> Stream<GeometryValue> {
        let op = "remainder";
        combine_directed(vec![self.into(), amount.into()], edge, move |values, direction| {
            Ok(rect(op, &values[0])?
                .remainder(scalar(op, &values[1])?, edge.resolve(direction))
                .into())
        })
    }

    fn divide(
        &self,
        amount: impl Into<AttributeSource>,
        edge: Edge,
    ) -> (Stream<GeometryValue>, Stream<GeometryValue>) {
        self.divide_with_padding(amount, 0.0, edge)
    }

    /// `(slices, remainders)`, with `padding` skipped between each pair
    fn divide_with_padding(
        &self,
        amount: impl Into<AttributeSource>,
        padding: impl Into<AttributeSource>,
        edge: Edge,
    ) -> (Stream<GeometryValue>, Stream<GeometryValue>) {
        let op = "divide_with_padding";
        let streams = vec![
            self.clone(),
            amount.into().to_stream(),
            padding.into().to_stream(),
        ];
        // Both halves are projected from one division per update
        let divided = combine_latest2(&combine_latest(streams), &direction_for(edge)).try_map(
            move |(values, direction)| {
                Ok(rect(op, &values[0])?.divide_with_padding(
                    scalar(op, &values[1])?,
                    scalar(op, &values[2])?,
                    edge.resolve(direction),
                ))
            },
        );
        (
            divided.map(|(slice, _)| slice.into()),
            divided.map(|(_, remainder)| remainder.into()),
        )
    }

    fn align_attribute(
        &self,
        attribute: LayoutAttribute,
        value: impl Into<AttributeSource>,
    ) -> Stream<GeometryValue> {
        let op = "align_attribute";
        let sources = vec![self.into(), value.into()];
        let apply = move |values: &[GeometryValue], direction| {
            attribute
                .apply(rect(op, &values[0])?, &values[1], direction)
                .map(GeometryValue::from)
        };
        match attribute.edge() {
            Some(edge) => combine_directed(sources, edge, apply),
            None => combine(sources, move |values| apply(values, WritingDirection::default())),
        }
    }

    fn align_center(&self, center: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Center, center)
    }

    fn align_left(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Left, position)
    }

    fn align_right(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Right, position)
    }

    fn align_top(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Top, position)
    }

    fn align_bottom(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Bottom, position)
    }

    fn align_leading(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Leading, position)
    }

    fn align_trailing(&self, position: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Trailing, position)
    }

    fn align_width(&self, width: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Width, width)
    }

    fn align_height(&self, height: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::Height, height)
    }

    fn align_center_x(&self, x: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::CenterX, x)
    }

    fn align_center_y(&self, y: impl Into<AttributeSource>) -> Stream<GeometryValue> {
        self.align_attribute(LayoutAttribute::CenterY, y)
    }

    fn align_baseline(
        &self,
        baselines: &Stream<f64>,
        reference_baselines: &Stream<f64>,
        reference_rects: &Stream<GeometryValue>,
        origin: BaselineOrigin,
    ) -> Stream<GeometryValue> {
        let op = "align_baseline";
        let rects = combine_latest2(self, reference_rects);
        let offsets = combine_latest2(baselines, reference_baselines);
        combine_latest2(&rects, &offsets).try_map(
            move |((value, reference), (offset, reference_offset))| {
                let rect = rect(op, &value)?;
                let baseline = origin.baseline_of(self::rect(op, &reference)?, reference_offset);
                Ok(origin.align(rect, baseline, offset).into())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{set_layout_config, LayoutConfig};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tether_core::{Event, Subject};

    type Log<T> = Rc<RefCell<Vec<Event<T>>>>;

    fn record<T: 'static>(stream: &Stream<T>) -> Log<T> {
        let log: Log<T> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _ = stream.subscribe(move |event| sink.borrow_mut().push(event));
        log
    }

    fn values<T: Clone>(log: &Log<T>) -> Vec<T> {
        log.borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    fn rects(log: &Log<GeometryValue>) -> Vec<Rect> {
        values(log).iter().filter_map(GeometryValue::as_rect).collect()
    }

    fn scalars(log: &Log<GeometryValue>) -> Vec<f64> {
        values(log).iter().filter_map(GeometryValue::as_scalar).collect()
    }

    #[test]
    fn test_constants_combine_exactly_once() {
        let log = record(&add(vec![
            Stream::just(GeometryValue::Scalar(1.0)),
            Stream::just(GeometryValue::Scalar(2.0)),
        ]));
        assert_eq!(
            *log.borrow(),
            vec![Event::Next(GeometryValue::Scalar(3.0)), Event::Completed]
        );
    }

    #[test]
    fn test_reemission_uses_other_inputs_latest_value() {
        let a = Subject::new();
        let b = Subject::new();
        let log = record(&a.stream().plus(b.stream()));

        a.send(GeometryValue::Scalar(1.0));
        b.send(GeometryValue::Scalar(10.0));
        a.send(GeometryValue::Scalar(2.0));
        a.send(GeometryValue::Scalar(3.0));
        assert_eq!(scalars(&log), vec![11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_completes_when_last_input_completes() {
        let a = Subject::new();
        let log = record(&subtract(vec![a.stream(), zero()]));

        a.send(GeometryValue::Scalar(4.0));
        assert!(!log.borrow().iter().any(Event::is_terminal));
        a.complete();
        assert_eq!(log.borrow().last(), Some(&Event::Completed));
    }

    #[test]
    fn test_mismatched_operands_fail_stream() {
        let points = Stream::just(GeometryValue::Point(Point::new(1.0, 1.0)));
        let log = record(&points.plus(Size::new(1.0, 1.0)));
        assert!(matches!(
            log.borrow().as_slice(),
            [Event::Error(GeometryError::UnsupportedOperand { operation: "add", .. })]
        ));
    }

    #[test]
    fn test_binary_arithmetic() {
        let size: Stream<GeometryValue> = Stream::just(Size::new(10.0, 20.0).into());
        let log = record(&size.multiplied_by(Size::new(2.0, 0.5)).divided_by(Size::new(4.0, 5.0)));
        assert_eq!(values(&log), vec![GeometryValue::Size(Size::new(5.0, 2.0))]);

        let log = record(&Stream::just(GeometryValue::Scalar(7.5)).minus(0.5).floor().negate());
        assert_eq!(scalars(&log), vec![-7.0]);
    }

    #[test]
    fn test_max_recomputes_from_every_input() {
        let a = Subject::new();
        let b = Subject::new();
        let log = record(&max(vec![a.stream(), b.stream()]));

        a.send(5.0);
        b.send(3.0);
        a.send(1.0);
        // Unchanged maximum is not re-sent
        a.send(2.0);
        b.send(4.0);
        assert_eq!(values(&log), vec![5.0, 3.0, 4.0]);
    }

    #[test]
    fn test_min_only_emits_changes() {
        let a = Subject::new();
        let log = record(&min(vec![a.stream(), Stream::just(2.0)]));
        a.send(3.0);
        a.send(4.0);
        a.send(1.0);
        assert_eq!(values(&log), vec![2.0, 1.0]);
    }

    #[test]
    fn test_constructors() {
        let log = record(&rects_with_x_y_width_height(1.0, 2.0, 3.0, 4.0));
        assert_eq!(rects(&log), vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);

        let log = record(&rects_with_center_size(Point::new(10.0, 10.0), Size::new(4.0, 2.0)));
        assert_eq!(rects(&log), vec![Rect::new(8.0, 9.0, 4.0, 2.0)]);

        let log = record(&rects_with_size(sizes_with_width_height(5.0, 6.0)));
        assert_eq!(rects(&log), vec![Rect::new(0.0, 0.0, 5.0, 6.0)]);

        let log = record(&rects_with_origin_size(points_with_x_y(1.0, 1.0), zero_size()));
        assert_eq!(rects(&log), vec![Rect::new(1.0, 1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_projections() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(10.0, 20.0, 100.0, 50.0).into());
        assert_eq!(scalars(&record(&rect.width())), vec![100.0]);
        assert_eq!(scalars(&record(&rect.right())), vec![110.0]);
        assert_eq!(scalars(&record(&rect.bottom())), vec![70.0]);
        assert_eq!(scalars(&record(&rect.center_x())), vec![60.0]);
        assert_eq!(scalars(&record(&rect.leading())), vec![10.0]);
        assert_eq!(scalars(&record(&rect.trailing())), vec![110.0]);
        assert_eq!(
            values(&record(&rect.center())),
            vec![GeometryValue::Point(Point::new(60.0, 45.0))]
        );
        assert_eq!(
            values(&record(&rect.value_for_attribute(LayoutAttribute::Size))),
            vec![GeometryValue::Size(Size::new(100.0, 50.0))]
        );
        assert!(matches!(
            record(&rect.value_for_attribute(LayoutAttribute::Baseline)).borrow()[0],
            Event::Error(_)
        ));
    }

    #[test]
    fn test_leading_follows_writing_direction() {
        let direction = Subject::with_value(WritingDirection::LeftToRight);
        let previous =
            set_layout_config(LayoutConfig::new().with_writing_direction(direction.stream()));

        let rect: Stream<GeometryValue> = Stream::just(Rect::new(10.0, 0.0, 100.0, 50.0).into());
        let leading = record(&rect.leading());
        let small: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 20.0, 10.0).into());
        let aligned = record(&small.align_leading(50.0));

        direction.send(WritingDirection::RightToLeft);
        assert_eq!(scalars(&leading), vec![10.0, 110.0]);
        assert_eq!(
            rects(&aligned),
            vec![Rect::new(50.0, 0.0, 20.0, 10.0), Rect::new(30.0, 0.0, 20.0, 10.0)]
        );

        set_layout_config(previous);
    }

    #[test]
    fn test_replacements() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(10.0, 20.0, 100.0, 50.0).into());
        assert_eq!(
            rects(&record(&rect.replace_width(5.0))),
            vec![Rect::new(10.0, 20.0, 5.0, 50.0)]
        );
        assert_eq!(
            rects(&record(&rect.replace_origin(Point::ZERO))),
            vec![Rect::new(0.0, 0.0, 100.0, 50.0)]
        );
        assert_eq!(
            rects(&record(&rect.replace_y(1.0).replace_size(Size::new(2.0, 3.0)))),
            vec![Rect::new(10.0, 1.0, 2.0, 3.0)]
        );
    }

    #[test]
    fn test_insets() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 100.0, 50.0).into());
        assert_eq!(
            rects(&record(&rect.inset_width_height(10.0, 5.0, Rect::NULL))),
            vec![Rect::new(10.0, 5.0, 80.0, 40.0)]
        );
        assert_eq!(
            rects(&record(&rect.inset_edges(1.0, 2.0, 3.0, 4.0, Rect::NULL))),
            vec![Rect::new(2.0, 1.0, 94.0, 46.0)]
        );

        let sentinel = Rect::new(-1.0, -1.0, 0.0, 0.0);
        let overflow = GeometryValue::EdgeInsets(EdgeInsets::uniform(30.0));
        assert_eq!(rects(&record(&rect.inset_by(overflow, sentinel))), vec![sentinel]);
    }

    #[test]
    fn test_over_inset_yields_caller_sentinel() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 100.0, 50.0).into());
        let sentinel = Rect::new(-1.0, -1.0, 0.0, 0.0);

        assert_eq!(
            rects(&record(&rect.inset_width_height(10.0, 30.0, sentinel))),
            vec![sentinel]
        );
        assert_eq!(
            rects(&record(&rect.inset_edges(0.0, 60.0, 0.0, 60.0, sentinel))),
            vec![sentinel]
        );
        assert!(rects(&record(&rect.inset_width_height(60.0, 0.0, Rect::NULL)))[0].is_null());
    }

    #[test]
    fn test_partitioning_streams() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 100.0, 50.0).into());
        assert_eq!(
            rects(&record(&rect.slice(30.0, Edge::Right))),
            vec![Rect::new(70.0, 0.0, 30.0, 50.0)]
        );
        assert_eq!(
            rects(&record(&rect.remainder(10.0, Edge::Top))),
            vec![Rect::new(0.0, 10.0, 100.0, 40.0)]
        );

        let amounts = Subject::new();
        let (slices, remainders) = rect.divide_with_padding(amounts.stream(), 10.0, Edge::Left);
        let slices = record(&slices);
        let remainders = record(&remainders);
        amounts.send(GeometryValue::Scalar(30.0));
        amounts.send(GeometryValue::Scalar(95.0));

        assert_eq!(
            rects(&slices),
            vec![Rect::new(0.0, 0.0, 30.0, 50.0), Rect::new(0.0, 0.0, 95.0, 50.0)]
        );
        assert_eq!(
            rects(&remainders),
            vec![Rect::new(40.0, 0.0, 60.0, 50.0), Rect::ZERO]
        );
    }

    #[test]
    fn test_movement_and_extension() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(10.0, 10.0, 20.0, 20.0).into());
        assert_eq!(
            rects(&record(&rect.move_down(5.0).move_left(2.0))),
            vec![Rect::new(8.0, 15.0, 20.0, 20.0)]
        );
        assert_eq!(
            rects(&record(&rect.move_leading_outward(3.0))),
            vec![Rect::new(7.0, 10.0, 20.0, 20.0)]
        );
        assert_eq!(
            rects(&record(&rect.extend_attribute(LayoutAttribute::Top, 5.0))),
            vec![Rect::new(10.0, 5.0, 20.0, 25.0)]
        );
        assert_eq!(
            rects(&record(&rect.extend_attribute(LayoutAttribute::Width, 10.0))),
            vec![Rect::new(5.0, 10.0, 30.0, 20.0)]
        );
        assert!(matches!(
            record(&rect.extend_attribute(LayoutAttribute::Center, 1.0)).borrow()[0],
            Event::Error(_)
        ));

        let point: Stream<GeometryValue> = Stream::just(Point::new(1.0, 1.0).into());
        assert_eq!(
            values(&record(&point.move_up(1.0))),
            vec![GeometryValue::Point(Point::new(1.0, 0.0))]
        );
    }

    #[test]
    fn test_alignment() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 20.0, 10.0).into());
        assert_eq!(
            rects(&record(&rect.align_center(Point::new(50.0, 50.0)))),
            vec![Rect::new(40.0, 45.0, 20.0, 10.0)]
        );
        assert_eq!(
            rects(&record(&rect.align_right(100.0).align_bottom(100.0))),
            vec![Rect::new(80.0, 90.0, 20.0, 10.0)]
        );
        assert_eq!(
            rects(&record(&rect.align_width(5.0).align_center_y(0.0))),
            vec![Rect::new(0.0, -5.0, 5.0, 10.0)]
        );
        assert!(matches!(
            record(&rect.align_top(Size::ZERO)).borrow()[0],
            Event::Error(GeometryError::AttributeTypeMismatch { attribute: "top", .. })
        ));
    }

    #[test]
    fn test_align_baseline() {
        let label: Stream<GeometryValue> = Stream::just(Rect::new(0.0, 0.0, 50.0, 20.0).into());
        let reference: Stream<GeometryValue> =
            Stream::just(Rect::new(100.0, 30.0, 80.0, 40.0).into());

        let aligned = label.align_baseline(
            &Stream::just(4.0),
            &Stream::just(10.0),
            &reference,
            BaselineOrigin::MaxY,
        );
        // Reference baseline sits at 70 - 10 = 60
        assert_eq!(rects(&record(&aligned)), vec![Rect::new(0.0, 44.0, 50.0, 20.0)]);
    }

    #[test]
    fn test_rounding_streams() {
        let rect: Stream<GeometryValue> = Stream::just(Rect::new(0.5, 0.5, 10.2, 10.2).into());
        assert_eq!(rects(&record(&rect.ceil())), vec![Rect::new(0.0, 0.0, 11.0, 11.0)]);
        assert_eq!(rects(&record(&zero_rect().floor())), vec![Rect::ZERO]);
        assert_eq!(
            values(&record(&zero_point().ceil())),
            vec![GeometryValue::Point(Point::ZERO)]
        );
    }
}
