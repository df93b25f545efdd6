//! Layout configuration
//!
//! Per-thread settings the layout engine reads when it builds streams.
//! Layout graphs are confined to the thread that built them, so the
//! configuration is too.
//!
//! ```ignore
//! use tether_layout::config::{set_layout_config, LayoutConfig};
//!
//! // Feed locale changes into the layout engine
//! let direction = Subject::with_value(WritingDirection::LeftToRight);
//! set_layout_config(LayoutConfig::new().with_writing_direction(direction.stream()));
//! ```

use std::cell::RefCell;

use tether_core::{Stream, WritingDirection};

thread_local! {
    static LAYOUT_CONFIG: RefCell<LayoutConfig> = RefCell::new(LayoutConfig::default());
}

/// Settings shared by every layout built on this thread
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Current writing direction, re-emitting whenever the locale changes
    pub writing_direction: Stream<WritingDirection>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writing_direction(mut self, writing_direction: Stream<WritingDirection>) -> Self {
        self.writing_direction = writing_direction;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            writing_direction: Stream::just(WritingDirection::LeftToRight),
        }
    }
}

/// Install `config` for this thread, returning the previous one
///
/// Only streams built afterwards see the new configuration.
pub fn set_layout_config(config: LayoutConfig) -> LayoutConfig {
    tracing::debug!("LayoutConfig: installed new configuration");
    LAYOUT_CONFIG.with(|current| current.replace(config))
}

/// The configuration installed for this thread
pub fn layout_config() -> LayoutConfig {
    LAYOUT_CONFIG.with(|current| current.borrow().clone())
}

/// Shorthand for the configured writing-direction stream
pub fn writing_direction() -> Stream<WritingDirection> {
    layout_config().writing_direction
}
