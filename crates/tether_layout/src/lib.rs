//! Tether Layout
//!
//! Declarative, reactive frame layout. Bind layout attributes of a view to
//! constants or geometry streams and the layout engine keeps the view's rect
//! up to date.
//!
//! # Features
//!
//! - **Combinators**: geometry arithmetic, projections, partitioning and
//!   alignment lifted onto streams
//! - **Attributes**: the fixed set of bindable layout attributes and their
//!   evaluation order
//! - **Trampoline**: resolves a binding set into rects and commits them to a
//!   platform [`Target`]
//! - **Configuration**: per-thread writing direction for leading/trailing edges
//!
//! # Example
//!
//! ```ignore
//! use tether_layout::prelude::*;
//!
//! let mut trampoline = Trampoline::new(view, RectProperty::Frame);
//! trampoline.set(
//!     Bindings::new()
//!         .bind(LayoutAttribute::Size, Size::new(40.0, 20.0))
//!         .bind(LayoutAttribute::Center, parent_bounds.center()),
//! )?;
//! trampoline.start();
//! ```

pub mod attribute;
pub mod binding;
pub mod combinators;
pub mod config;
pub mod target;
pub mod trampoline;

#[cfg(test)]
mod test_support;

pub use attribute::{Edge, LayoutAttribute};
pub use binding::{AttributeSource, Bindings};
pub use combinators::GeometryStreamExt;
pub use config::{layout_config, set_layout_config, writing_direction, LayoutConfig};
pub use target::{
    baseline_positions, bind_rects, BaselineOrigin, CommitContext, RectProperty, Target,
};
pub use trampoline::{Trampoline, TrampolineState};

/// Prelude for building layouts
pub mod prelude {
    pub use crate::attribute::{Edge, LayoutAttribute};
    pub use crate::binding::{AttributeSource, Bindings};
    pub use crate::combinators::GeometryStreamExt;
    pub use crate::target::{RectProperty, Target};
    pub use crate::trampoline::Trampoline;

    pub use tether_animation::{AnimatedStreamExt, AnimationCurve, AnimationParams};
    pub use tether_core::{GeometryValue, Point, Rect, Size, Stream, Subject, WritingDirection};
}
