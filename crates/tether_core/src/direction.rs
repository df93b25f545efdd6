//! Writing direction
//!
//! Leading and trailing edges are horizontal edges whose side depends on the
//! writing direction of the surrounding content.

use crate::geometry::RectEdge;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WritingDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl WritingDirection {
    /// The edge text starts from
    pub fn leading_edge(self) -> RectEdge {
        match self {
            WritingDirection::LeftToRight => RectEdge::MinX,
            WritingDirection::RightToLeft => RectEdge::MaxX,
        }
    }

    /// The edge text runs toward
    pub fn trailing_edge(self) -> RectEdge {
        self.leading_edge().opposite()
    }
}
