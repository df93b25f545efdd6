//! Attribute bindings
//!
//! A binding set maps each [`LayoutAttribute`] to the constant or stream that
//! drives it. Keys are unique: binding an attribute again replaces the
//! previous source.

use rustc_hash::FxHashMap;
use tether_core::{GeometryValue, Point, Rect, Result, Size, Stream};

use crate::attribute::LayoutAttribute;

/// A constant or a stream of geometry values
#[derive(Clone, Debug)]
pub enum AttributeSource {
    /// Treated as a stream emitting this value once
    Constant(GeometryValue),
    Stream(Stream<GeometryValue>),
}

impl AttributeSource {
    pub fn to_stream(&self) -> Stream<GeometryValue> {
        match self {
            AttributeSource::Constant(value) => Stream::just(*value),
            AttributeSource::Stream(stream) => stream.clone(),
        }
    }

    /// The value, if it is known ahead of time
    pub fn constant(&self) -> Option<&GeometryValue> {
        match self {
            AttributeSource::Constant(value) => Some(value),
            AttributeSource::Stream(_) => None,
        }
    }
}

impl From<GeometryValue> for AttributeSource {
    fn from(value: GeometryValue) -> Self {
        AttributeSource::Constant(value)
    }
}

impl From<f64> for AttributeSource {
    fn from(value: f64) -> Self {
        AttributeSource::Constant(value.into())
    }
}

impl From<Point> for AttributeSource {
    fn from(value: Point) -> Self {
        AttributeSource::Constant(value.into())
    }
}

impl From<Size> for AttributeSource {
    fn from(value: Size) -> Self {
        AttributeSource::Constant(value.into())
    }
}

impl From<Rect> for AttributeSource {
    fn from(value: Rect) -> Self {
        AttributeSource::Constant(value.into())
    }
}

impl From<Stream<GeometryValue>> for AttributeSource {
    fn from(stream: Stream<GeometryValue>) -> Self {
        AttributeSource::Stream(stream)
    }
}

impl From<&Stream<GeometryValue>> for AttributeSource {
    fn from(stream: &Stream<GeometryValue>) -> Self {
        AttributeSource::Stream(stream.clone())
    }
}

/// A set of attribute bindings for one target
///
/// ```ignore
/// let bindings = Bindings::new()
///     .bind(LayoutAttribute::Size, Size::new(40.0, 20.0))
///     .bind(LayoutAttribute::Center, parent_bounds.center());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    sources: FxHashMap<LayoutAttribute, AttributeSource>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Bindings::insert`]
    pub fn bind(mut self, attribute: LayoutAttribute, source: impl Into<AttributeSource>) -> Self {
        self.insert(attribute, source);
        self
    }

    /// Bind `attribute`, returning the source it replaced
    pub fn insert(
        &mut self,
        attribute: LayoutAttribute,
        source: impl Into<AttributeSource>,
    ) -> Option<AttributeSource> {
        self.sources.insert(attribute, source.into())
    }

    pub fn remove(&mut self, attribute: LayoutAttribute) -> Option<AttributeSource> {
        self.sources.remove(&attribute)
    }

    pub fn get(&self, attribute: LayoutAttribute) -> Option<&AttributeSource> {
        self.sources.get(&attribute)
    }

    pub fn contains(&self, attribute: LayoutAttribute) -> bool {
        self.sources.contains_key(&attribute)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Bound attributes in evaluation order, whatever order they were bound in
    pub fn iter(&self) -> impl Iterator<Item = (LayoutAttribute, &AttributeSource)> + '_ {
        LayoutAttribute::ALL
            .into_iter()
            .filter_map(|attribute| self.sources.get(&attribute).map(|source| (attribute, source)))
    }

    /// Check every constant against its attribute's expected kind
    pub fn validate(&self) -> Result<()> {
        for (attribute, source) in self.iter() {
            if let Some(value) = source.constant() {
                attribute.check(value)?;
            }
        }
        Ok(())
    }

    /// Bind everything in `other`, replacing sources already bound here
    pub fn merge(&mut self, other: Bindings) {
        self.sources.extend(other.sources);
    }
}
