//! Tether Core
//!
//! Geometry values and the stream primitive the layout engine is built on:
//!
//! - **Geometry**: points, sizes, rects and edge insets, plus the
//!   [`GeometryValue`] variant carried by layout streams
//! - **Algebra**: kind-preserving arithmetic and pixel-aligned rounding
//! - **Partitioning**: slicing, dividing, aligning and insetting rects
//! - **Streams**: synchronous push streams with disposal-based cancellation
//!
//! # Example
//!
//! ```rust
//! use tether_core::{Rect, RectEdge};
//!
//! let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
//! let (sidebar, content) = bounds.divide_with_padding(60.0, 8.0, RectEdge::MinX);
//!
//! assert_eq!(sidebar, Rect::new(0.0, 0.0, 60.0, 100.0));
//! assert_eq!(content, Rect::new(68.0, 0.0, 132.0, 100.0));
//! ```

pub mod algebra;
pub mod direction;
pub mod error;
pub mod geometry;
pub mod partition;
pub mod stream;
pub mod subject;

pub use direction::WritingDirection;
pub use error::{GeometryError, Result};
pub use geometry::{EdgeInsets, GeometryValue, Point, Rect, RectEdge, Size, ValueKind};
pub use stream::{combine_latest, combine_latest2, Event, Observer, Stream, Subscription};
pub use subject::{ObserverId, Subject};
