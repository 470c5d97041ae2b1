//! Descriptors for color spaces: identity, coordinate metadata, conversion
//! edges and the catalog of formats owned by the space.

use std::borrow::Cow;

use crate::color::{Component, Components, SpaceId};
use crate::format::Format;
use crate::gamut::GamutMethod;

/// A pure function transforming the components of one space into another.
/// Missing components arrive as NaN.
pub type CoordTransform = fn(&Components) -> Components;

/// Metadata about a single coordinate of a space.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordMeta {
    /// Short id used to reference the coordinate, e.g. `"c"` in `oklch.c`.
    pub id: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// The hard range of the coordinate. Values outside of it are out of
    /// gamut.
    pub range: Option<[Component; 2]>,
    /// A reference range that does not limit the gamut but is used to map
    /// percentages.
    pub ref_range: Option<[Component; 2]>,
    /// True for hue angles in degrees.
    pub is_angle: bool,
}

impl CoordMeta {
    /// A coordinate with a hard range.
    pub const fn ranged(id: &'static str, name: &'static str, min: Component, max: Component) -> Self {
        Self {
            id,
            name,
            range: Some([min, max]),
            ref_range: None,
            is_angle: false,
        }
    }

    /// A coordinate with only a reference range.
    pub const fn unbounded(
        id: &'static str,
        name: &'static str,
        min: Component,
        max: Component,
    ) -> Self {
        Self {
            id,
            name,
            range: None,
            ref_range: Some([min, max]),
            is_angle: false,
        }
    }

    /// A hue angle in degrees.
    pub const fn angle(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            range: None,
            ref_range: Some([0.0, 360.0]),
            is_angle: true,
        }
    }

    /// The range used to map percentages and scaled numbers, the hard range
    /// if there is one.
    pub fn reference(&self) -> Option<[Component; 2]> {
        self.range.or(self.ref_range)
    }
}

/// A directed conversion edge to an adjacent space, along with its inverse.
#[derive(Clone, Debug)]
pub struct Edge {
    /// The space the edge leads to.
    pub target: SpaceId,
    /// Transform from the owning space into `target`.
    pub forward: CoordTransform,
    /// Transform from `target` back into the owning space.
    pub inverse: CoordTransform,
}

impl Edge {
    /// Create a new edge.
    pub fn new(
        target: impl Into<SpaceId>,
        forward: CoordTransform,
        inverse: CoordTransform,
    ) -> Self {
        Self {
            target: target.into(),
            forward,
            inverse,
        }
    }
}

/// Describes a color space that can be registered.
#[derive(Clone, Debug)]
pub struct SpaceDescriptor {
    pub(crate) id: SpaceId,
    pub(crate) css_id: Option<Cow<'static, str>>,
    pub(crate) aliases: Vec<Cow<'static, str>>,
    pub(crate) name: Cow<'static, str>,
    pub(crate) coords: [CoordMeta; 3],
    pub(crate) base: Option<Edge>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) formats: Vec<Format>,
    pub(crate) default_format: Option<Cow<'static, str>>,
    pub(crate) gamut_mapping: Option<GamutMethod>,
}

impl SpaceDescriptor {
    /// Start describing a space with the given id, name and coordinates.
    pub fn new(
        id: impl Into<SpaceId>,
        name: impl Into<Cow<'static, str>>,
        coords: [CoordMeta; 3],
    ) -> Self {
        Self {
            id: id.into(),
            css_id: None,
            aliases: vec![],
            name: name.into(),
            coords,
            base: None,
            edges: vec![],
            formats: vec![],
            default_format: None,
            gamut_mapping: None,
        }
    }

    /// Set the id used for this space in CSS, e.g. in `color(<css-id> ...)`.
    pub fn css_id(mut self, css_id: impl Into<Cow<'static, str>>) -> Self {
        self.css_id = Some(css_id.into());
        self
    }

    /// Add an alias the space can be looked up by.
    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the edge towards the hub space.
    pub fn base(mut self, edge: Edge) -> Self {
        self.base = Some(edge);
        self
    }

    /// Add a direct conversion edge to another space.
    pub fn edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add a format to the catalog of this space. The first format added is
    /// the default unless [`SpaceDescriptor::default_format`] is used.
    pub fn format(mut self, mut format: Format) -> Self {
        if format.space.is_none() {
            format.space = Some(self.id.clone());
        }
        self.formats.push(format);
        self
    }

    /// Designate the format used when `"default"` is requested.
    pub fn default_format(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.default_format = Some(id.into());
        self
    }

    /// Set the strategy used when mapping colors into the gamut of this space
    /// without an explicit method.
    pub fn gamut_mapping(mut self, method: GamutMethod) -> Self {
        self.gamut_mapping = Some(method);
        self
    }

    /// The canonical id of the space.
    pub fn id(&self) -> &SpaceId {
        &self.id
    }

    /// The id used in CSS, falling back to the canonical id.
    pub fn css_id_or_id(&self) -> &str {
        self.css_id.as_deref().unwrap_or(self.id.as_str())
    }

    /// Alternative ids of the space.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|a| a.as_ref())
    }

    /// Human readable name of the space.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metadata for each of the 3 coordinates.
    pub fn coords(&self) -> &[CoordMeta; 3] {
        &self.coords
    }

    /// The edge towards the hub, if any.
    pub fn base_edge(&self) -> Option<&Edge> {
        self.base.as_ref()
    }

    /// Direct edges to other spaces.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The formats owned by this space.
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// The default gamut mapping strategy, if one was registered.
    pub fn default_gamut_mapping(&self) -> Option<&GamutMethod> {
        self.gamut_mapping.as_ref()
    }

    /// True if any coordinate limits the gamut of the space.
    pub fn is_bounded(&self) -> bool {
        self.coords.iter().any(|c| c.range.is_some() && !c.is_angle)
    }

    /// All the ids this space answers to.
    pub(crate) fn all_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(self.css_id.as_deref())
            .chain(self.aliases())
    }

    /// Find the index of a coordinate by id or name (case-insensitive).
    pub fn coord_index(&self, id_or_name: &str) -> Option<usize> {
        self.coords.iter().position(|c| {
            c.id.eq_ignore_ascii_case(id_or_name) || c.name.eq_ignore_ascii_case(id_or_name)
        })
    }

    /// Look up a format owned by this space. `"default"` resolves to the
    /// designated default format, or the first format in the catalog.
    pub fn get_format(&self, id: &str) -> Option<&Format> {
        if id == "default" {
            return self.default_format_descriptor();
        }
        self.formats.iter().find(|f| f.id == id)
    }

    /// The format used when `"default"` is requested.
    pub fn default_format_descriptor(&self) -> Option<&Format> {
        match &self.default_format {
            Some(id) => self.formats.iter().find(|f| f.id == *id),
            None => self.formats.first(),
        }
    }
}
