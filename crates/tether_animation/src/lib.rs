//! Tether Animation
//!
//! Animated delivery for layout streams.
//!
//! # Features
//!
//! - **Animation Parameters**: duration and timing curve, with platform defaults
//! - **Animated Scope**: thread-local, strictly nested marker read at commit time
//! - **Drivers**: pluggable animation engines, including a tick-driven scheduler
//! - **Stream Adapters**: serialized and interruptible animated streams

pub mod animated;
pub mod context;
pub mod curve;
pub mod driver;
pub mod scheduler;

pub use animated::AnimatedStreamExt;
pub use context::{current_animation, in_animated_context, with_animation, AnimationScope};
pub use curve::{AnimationCurve, AnimationParams, DEFAULT_DURATION};
pub use driver::{AnimationDriver, ImmediateDriver};
pub use scheduler::{AnimationScheduler, TransactionId};
