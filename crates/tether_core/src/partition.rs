//! Rect partitioning and alignment
//!
//! Slicing, dividing, aligning, centering and insetting rects. Operations
//! that consume part of a rect never grow it: amounts past the rect's extent
//! clamp to the whole rect (slice) or the zero rect (remainder).

use crate::error::{GeometryError, Result};
use crate::geometry::{EdgeInsets, Point, Rect, RectEdge};

impl Rect {
    /// The part of the rect `amount` points deep, measured inward from `edge`
    ///
    /// Returns the whole rect if `amount` covers its extent along that axis.
    pub fn slice(&self, amount: f64, edge: RectEdge) -> Rect {
        let rect = self.standardized();
        let amount = amount.max(0.0);
        if amount >= rect.extent(edge) {
            return *self;
        }

        match edge {
            RectEdge::MinX => Rect::new(rect.x(), rect.y(), amount, rect.height()),
            RectEdge::MaxX => Rect::new(rect.max_x() - amount, rect.y(), amount, rect.height()),
            RectEdge::MinY => Rect::new(rect.x(), rect.y(), rect.width(), amount),
            RectEdge::MaxY => Rect::new(rect.x(), rect.max_y() - amount, rect.width(), amount),
        }
    }

    /// What is left after slicing `amount` points off `edge`
    ///
    /// Returns [`Rect::ZERO`] if `amount` covers the rect's extent.
    pub fn remainder(&self, amount: f64, edge: RectEdge) -> Rect {
        let rect = self.standardized();
        let amount = amount.max(0.0);
        if amount >= rect.extent(edge) {
            return Rect::ZERO;
        }

        match edge {
            RectEdge::MinX => Rect::new(
                rect.x() + amount,
                rect.y(),
                rect.width() - amount,
                rect.height(),
            ),
            RectEdge::MaxX => Rect::new(rect.x(), rect.y(), rect.width() - amount, rect.height()),
            RectEdge::MinY => Rect::new(
                rect.x(),
                rect.y() + amount,
                rect.width(),
                rect.height() - amount,
            ),
            RectEdge::MaxY => Rect::new(rect.x(), rect.y(), rect.width(), rect.height() - amount),
        }
    }

    /// Split into `(slice, remainder)` with no padding between them
    pub fn divide(&self, amount: f64, edge: RectEdge) -> (Rect, Rect) {
        self.divide_with_padding(amount, 0.0, edge)
    }

    /// Split into `(slice, remainder)`, skipping `padding` points between them
    ///
    /// The slice is `slice_amount` deep from `edge`. The remainder starts
    /// `padding` points past the slice's far edge, and is the zero rect when
    /// `slice_amount + padding` covers the rect's extent. Padding never eats
    /// into the slice.
    pub fn divide_with_padding(
        &self,
        slice_amount: f64,
        padding: f64,
        edge: RectEdge,
    ) -> (Rect, Rect) {
        let slice_amount = slice_amount.max(0.0);
        let slice = self.slice(slice_amount, edge);
        let remainder = self.remainder(slice_amount + padding.max(0.0), edge);
        (slice, remainder)
    }

    /// Move the rect so its `edge` sits at `position`
    ///
    /// The size and the coordinate along the other axis are unchanged.
    pub fn aligned(&self, edge: RectEdge, position: f64) -> Rect {
        let rect = self.standardized();
        match edge {
            RectEdge::MinX => Rect::new(position, rect.y(), rect.width(), rect.height()),
            RectEdge::MaxX => Rect::new(
                position - rect.width(),
                rect.y(),
                rect.width(),
                rect.height(),
            ),
            RectEdge::MinY => Rect::new(rect.x(), position, rect.width(), rect.height()),
            RectEdge::MaxY => Rect::new(
                rect.x(),
                position - rect.height(),
                rect.width(),
                rect.height(),
            ),
        }
    }

    /// Move the rect so its `edge` coincides with the same edge of `reference`
    pub fn align_edge(&self, reference: &Rect, edge: RectEdge) -> Rect {
        self.aligned(edge, reference.edge_position(edge))
    }

    /// This rect's size, centered in `outer`
    pub fn centered_in(&self, outer: &Rect) -> Rect {
        Rect::from_center(outer.center(), self.standardized().size)
    }

    /// Rescale into the unit square defined by `containing`
    ///
    /// Fails with [`GeometryError::DegenerateBounds`] when `containing` has a
    /// zero width or height.
    pub fn to_unit(&self, containing: &Rect) -> Result<Rect> {
        let bounds = containing.standardized();
        if bounds.width() == 0.0 || bounds.height() == 0.0 || bounds.is_null() {
            return Err(GeometryError::DegenerateBounds(*containing));
        }

        Ok(Rect::new(
            (self.x() - bounds.x()) / bounds.width(),
            (self.y() - bounds.y()) / bounds.height(),
            self.width() / bounds.width(),
            self.height() / bounds.height(),
        ))
    }

    /// Inverse of [`Rect::to_unit`]: scale a unit rect out into `containing`
    pub fn from_unit(&self, containing: &Rect) -> Rect {
        let bounds = containing.standardized();
        Rect::new(
            bounds.x() + self.x() * bounds.width(),
            bounds.y() + self.y() * bounds.height(),
            self.width() * bounds.width(),
            self.height() * bounds.height(),
        )
    }

    /// Shrink each side by the matching inset
    ///
    /// If either resulting dimension would be negative the whole result is
    /// `fallback`. Pass [`Rect::NULL`] for null-rect semantics.
    pub fn inset_by(&self, insets: EdgeInsets, fallback: Rect) -> Rect {
        if self.is_null() {
            return fallback;
        }

        let rect = self.standardized();
        let width = rect.width() - insets.left - insets.right;
        let height = rect.height() - insets.top - insets.bottom;
        if width < 0.0 || height < 0.0 {
            return fallback;
        }

        Rect::new(rect.x() + insets.left, rect.y() + insets.top, width, height)
    }

    /// Remove `dx` from the left and right, `dy` from the top and bottom
    pub fn inset(&self, dx: f64, dy: f64, fallback: Rect) -> Rect {
        self.inset_by(EdgeInsets::symmetric(dx, dy), fallback)
    }

    /// Extend the rect outward from `edge`, keeping every other edge in place
    ///
    /// Negative amounts pull the edge inward.
    pub fn grow(&self, amount: f64, edge: RectEdge) -> Rect {
        let rect = self.standardized();
        match edge {
            RectEdge::MinX => Rect::new(
                rect.x() - amount,
                rect.y(),
                rect.width() + amount,
                rect.height(),
            ),
            RectEdge::MaxX => Rect::new(rect.x(), rect.y(), rect.width() + amount, rect.height()),
            RectEdge::MinY => Rect::new(
                rect.x(),
                rect.y() - amount,
                rect.width(),
                rect.height() + amount,
            ),
            RectEdge::MaxY => Rect::new(rect.x(), rect.y(), rect.width(), rect.height() + amount),
        }
    }

    /// Widen by `amount`, split evenly between the left and right sides
    pub fn outset_width(&self, amount: f64) -> Rect {
        let rect = self.standardized();
        Rect::new(
            rect.x() - amount / 2.0,
            rect.y(),
            rect.width() + amount,
            rect.height(),
        )
    }

    /// Heighten by `amount`, split evenly between the top and bottom sides
    pub fn outset_height(&self, amount: f64) -> Rect {
        let rect = self.standardized();
        Rect::new(
            rect.x(),
            rect.y() - amount / 2.0,
            rect.width(),
            rect.height() + amount,
        )
    }

    /// Move the whole rect `amount` points toward `edge`
    pub fn offset_toward(&self, amount: f64, edge: RectEdge) -> Rect {
        let delta = Point::ZERO.offset_toward(amount, edge);
        self.offset(delta.x, delta.y)
    }
}

impl Point {
    /// Move the point `amount` points toward `edge`
    pub fn offset_toward(&self, amount: f64, edge: RectEdge) -> Point {
        match edge {
            RectEdge::MinX => Point::new(self.x - amount, self.y),
            RectEdge::MaxX => Point::new(self.x + amount, self.y),
            RectEdge::MinY => Point::new(self.x, self.y - amount),
            RectEdge::MaxY => Point::new(self.x, self.y + amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: [RectEdge; 4] = [RectEdge::MinX, RectEdge::MinY, RectEdge::MaxX, RectEdge::MaxY];

    #[test]
    fn test_slice_from_each_edge() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.slice(30.0, RectEdge::MinX), Rect::new(10.0, 20.0, 30.0, 50.0));
        assert_eq!(rect.slice(30.0, RectEdge::MaxX), Rect::new(80.0, 20.0, 30.0, 50.0));
        assert_eq!(rect.slice(10.0, RectEdge::MinY), Rect::new(10.0, 20.0, 100.0, 10.0));
        assert_eq!(rect.slice(10.0, RectEdge::MaxY), Rect::new(10.0, 60.0, 100.0, 10.0));
    }

    #[test]
    fn test_slice_past_extent_returns_whole_rect() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        for edge in EDGES {
            assert_eq!(rect.slice(40.0, edge), rect);
            assert_eq!(rect.slice(1000.0, edge), rect);
        }
    }

    #[test]
    fn test_remainder_from_each_edge() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.remainder(30.0, RectEdge::MinX), Rect::new(40.0, 20.0, 70.0, 50.0));
        assert_eq!(rect.remainder(30.0, RectEdge::MaxX), Rect::new(10.0, 20.0, 70.0, 50.0));
        assert_eq!(rect.remainder(10.0, RectEdge::MinY), Rect::new(10.0, 30.0, 100.0, 40.0));
        assert_eq!(rect.remainder(10.0, RectEdge::MaxY), Rect::new(10.0, 20.0, 100.0, 40.0));
    }

    #[test]
    fn test_remainder_past_extent_is_zero() {
        let rect = Rect::new(5.0, 5.0, 40.0, 20.0);
        assert_eq!(rect.remainder(40.0, RectEdge::MinX), Rect::ZERO);
        assert_eq!(rect.remainder(25.0, RectEdge::MaxY), Rect::ZERO);
    }

    #[test]
    fn test_negative_amount_clamps_to_zero() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert_eq!(rect.slice(-5.0, RectEdge::MinX), Rect::new(0.0, 0.0, 0.0, 20.0));
        assert_eq!(rect.remainder(-5.0, RectEdge::MinX), rect);
    }

    #[test]
    fn test_divide_with_padding() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let (slice, remainder) = rect.divide_with_padding(30.0, 10.0, RectEdge::MinX);
        assert_eq!(slice, Rect::new(0.0, 0.0, 30.0, 50.0));
        assert_eq!(remainder, Rect::new(40.0, 0.0, 60.0, 50.0));

        let (slice, remainder) = rect.divide_with_padding(20.0, 5.0, RectEdge::MaxY);
        assert_eq!(slice, Rect::new(0.0, 30.0, 100.0, 20.0));
        assert_eq!(remainder, Rect::new(0.0, 0.0, 100.0, 25.0));
    }

    #[test]
    fn test_divide_with_padding_properties() {
        let rect = Rect::new(3.0, 7.0, 120.0, 80.0);
        let cases = [
            (0.0, 0.0),
            (10.0, 5.0),
            (60.0, 59.0),
            (60.0, 60.0),
            (100.0, 30.0),
            (200.0, 0.0),
        ];

        for edge in EDGES {
            let extent = rect.extent(edge);
            for (amount, padding) in cases {
                let (slice, remainder) = rect.divide_with_padding(amount, padding, edge);
                assert_eq!(slice.extent(edge), amount.min(extent));

                if amount + padding < extent {
                    assert_ne!(remainder, Rect::ZERO);
                    let gap = match edge {
                        RectEdge::MinX => remainder.min_x() - slice.max_x(),
                        RectEdge::MaxX => slice.min_x() - remainder.max_x(),
                        RectEdge::MinY => remainder.min_y() - slice.max_y(),
                        RectEdge::MaxY => slice.min_y() - remainder.max_y(),
                    };
                    assert_eq!(gap, padding);
                } else {
                    assert_eq!(remainder, Rect::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_divide_has_no_padding() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (slice, remainder) = rect.divide(4.0, RectEdge::MinY);
        assert_eq!(slice, Rect::new(0.0, 0.0, 10.0, 4.0));
        assert_eq!(remainder, Rect::new(0.0, 4.0, 10.0, 6.0));
    }

    #[test]
    fn test_align_edge() {
        let rect = Rect::new(5.0, 5.0, 20.0, 10.0);
        let reference = Rect::new(100.0, 200.0, 50.0, 40.0);
        assert_eq!(rect.align_edge(&reference, RectEdge::MinX), Rect::new(100.0, 5.0, 20.0, 10.0));
        assert_eq!(rect.align_edge(&reference, RectEdge::MaxX), Rect::new(130.0, 5.0, 20.0, 10.0));
        assert_eq!(rect.align_edge(&reference, RectEdge::MinY), Rect::new(5.0, 200.0, 20.0, 10.0));
        assert_eq!(rect.align_edge(&reference, RectEdge::MaxY), Rect::new(5.0, 230.0, 20.0, 10.0));
    }

    #[test]
    fn test_centered_in() {
        let inner = Rect::new(0.0, 0.0, 40.0, 20.0);
        let outer = Rect::new(0.0, 0.0, 200.0, 100.0);
        let centered = inner.centered_in(&outer);
        assert_eq!(centered, Rect::new(80.0, 40.0, 40.0, 20.0));
        assert_eq!(centered.center(), outer.center());
    }

    #[test]
    fn test_unit_conversion() {
        let containing = Rect::new(100.0, 100.0, 200.0, 400.0);
        let rect = Rect::new(150.0, 200.0, 100.0, 100.0);
        let unit = rect.to_unit(&containing).unwrap();
        assert_eq!(unit, Rect::new(0.25, 0.25, 0.5, 0.25));
        assert_eq!(unit.from_unit(&containing), rect);
    }

    #[test]
    fn test_unit_conversion_rejects_degenerate_bounds() {
        let flat = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert_eq!(
            Rect::new(0.0, 0.0, 1.0, 1.0).to_unit(&flat),
            Err(GeometryError::DegenerateBounds(flat))
        );

        let thin = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(
            Rect::new(0.0, 0.0, 1.0, 1.0).to_unit(&thin),
            Err(GeometryError::DegenerateBounds(thin))
        );
    }

    #[test]
    fn test_inset_by() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let insets = EdgeInsets::new(5.0, 10.0, 15.0, 20.0);
        assert_eq!(rect.inset_by(insets, Rect::NULL), Rect::new(10.0, 5.0, 70.0, 30.0));
    }

    #[test]
    fn test_inset_overflow_uses_fallback() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let sentinel = Rect::new(-1.0, -1.0, 0.0, 0.0);
        assert_eq!(rect.inset_by(EdgeInsets::new(30.0, 0.0, 30.0, 0.0), sentinel), sentinel);
        assert!(rect.inset(60.0, 0.0, Rect::NULL).is_null());
        // Exactly consuming a dimension is not an overflow
        assert_eq!(rect.inset(50.0, 0.0, Rect::NULL), Rect::new(50.0, 0.0, 0.0, 50.0));
    }

    #[test]
    fn test_grow_keeps_other_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(rect.grow(5.0, RectEdge::MinX), Rect::new(5.0, 10.0, 25.0, 20.0));
        assert_eq!(rect.grow(5.0, RectEdge::MaxY), Rect::new(10.0, 10.0, 20.0, 25.0));
        assert_eq!(rect.outset_width(10.0), Rect::new(5.0, 10.0, 30.0, 20.0));
        assert_eq!(rect.outset_height(-4.0), Rect::new(10.0, 12.0, 20.0, 16.0));
    }

    #[test]
    fn test_offset_toward() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(rect.offset_toward(3.0, RectEdge::MinX), Rect::new(7.0, 10.0, 20.0, 20.0));
        assert_eq!(rect.offset_toward(3.0, RectEdge::MaxY), Rect::new(10.0, 13.0, 20.0, 20.0));
        assert_eq!(
            Point::new(1.0, 1.0).offset_toward(2.0, RectEdge::MinY),
            Point::new(1.0, -1.0)
        );
    }
}
