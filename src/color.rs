//! A [`Color`] represents a color value specified in any of the registered
//! color spaces.

use std::borrow::Cow;
use std::fmt;

use bitflags::bitflags;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// The coordinates of a color with missing ("none") components set to
/// [`None`].
pub type Coords = [Option<Component>; 3];

/// Represent the three components that describe any color.
///
/// Inside a conversion chain a missing component travels as NaN, which makes
/// any arithmetic that depends on it produce NaN as well.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }

    /// Returns true if any of the components is NaN.
    pub fn any_nan(&self) -> bool {
        self.0.is_nan() || self.1.is_nan() || self.2.is_nan()
    }

    /// Return the component at the given index.
    pub fn get(&self, index: usize) -> Component {
        match index {
            0 => self.0,
            1 => self.1,
            _ => self.2,
        }
    }

    /// Set the component at the given index.
    pub fn set(&mut self, index: usize, value: Component) {
        match index {
            0 => self.0 = value,
            1 => self.1 = value,
            _ => self.2 = value,
        }
    }

    /// Return the components as an array.
    pub fn to_array(&self) -> [Component; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[Component; 3]> for Components {
    fn from(value: [Component; 3]) -> Self {
        Self(value[0], value[1], value[2])
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0, self.1, self.2)
    }
}

bitflags! {
    /// Flags to mark any missing components on a [`Color`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Flags : u8 {
        /// Set when the first component of a [`Color`] is missing.
        const C0_IS_NONE = 1 << 0;
        /// Set when the second component of a [`Color`] is missing.
        const C1_IS_NONE = 1 << 1;
        /// Set when the third component of a [`Color`] is missing.
        const C2_IS_NONE = 1 << 2;
        /// Set when the alpha component of a [`Color`] is missing.
        const ALPHA_IS_NONE = 1 << 3;
    }
}

impl Flags {
    /// The flag for the component at the given index.
    pub fn for_component(index: usize) -> Self {
        match index {
            0 => Flags::C0_IS_NONE,
            1 => Flags::C1_IS_NONE,
            _ => Flags::C2_IS_NONE,
        }
    }
}

/// Identifier of a color space in a registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(Cow<'static, str>);

impl SpaceId {
    /// Create a space id from a static string.
    pub const fn new(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SpaceId {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for SpaceId {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl AsRef<str> for SpaceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for SpaceId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SpaceId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Struct that can hold a color of any color space.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    /// The three components that make up any color.
    pub components: Components,
    /// The alpha component of the color.
    pub alpha: Component,
    /// Holds any flags that might be enabled for this color.
    pub flags: Flags,
    /// The color space in which the components are set.
    pub space: SpaceId,
}

impl Color {
    /// Create a new [`Color`]. Each color or alpha component can take values
    /// that can be converted into a [`ComponentDetails`]. This automates the
    /// process of settings values to missing. For example:
    /// ```rust
    /// use colorway::Color;
    /// let c = Color::new("srgb", None, None, None, 1.0);
    /// ```
    /// will set all the color components to missing.
    pub fn new(
        space: impl Into<SpaceId>,
        c0: impl Into<ComponentDetails>,
        c1: impl Into<ComponentDetails>,
        c2: impl Into<ComponentDetails>,
        alpha: impl Into<ComponentDetails>,
    ) -> Self {
        let mut flags = Flags::empty();

        let c0 = c0.into().value_and_flag(&mut flags, Flags::C0_IS_NONE);
        let c1 = c1.into().value_and_flag(&mut flags, Flags::C1_IS_NONE);
        let c2 = c2.into().value_and_flag(&mut flags, Flags::C2_IS_NONE);
        let alpha = alpha
            .into()
            .value_and_flag(&mut flags, Flags::ALPHA_IS_NONE);

        Self {
            components: Components(c0, c1, c2),
            alpha,
            flags,
            space: space.into(),
        }
    }

    /// Create a color from coordinates where missing components are [`None`].
    pub fn from_coords(
        space: impl Into<SpaceId>,
        coords: Coords,
        alpha: Option<Component>,
    ) -> Self {
        Self::new(space, coords[0], coords[1], coords[2], alpha)
    }

    /// Create a color from the output of a conversion chain. Any NaN
    /// component is powerless and is marked as missing.
    pub(crate) fn from_transformed(
        space: SpaceId,
        components: Components,
        alpha: Option<Component>,
    ) -> Self {
        let nan_to_none = |v: Component| if v.is_nan() { None } else { Some(v) };
        Self::new(
            space,
            nan_to_none(components.0),
            nan_to_none(components.1),
            nan_to_none(components.2),
            alpha,
        )
    }

    /// Return the components ready to be passed through a conversion chain,
    /// with missing components set to NaN.
    pub(crate) fn components_for_transform(&self) -> Components {
        let coords = self.coords();
        Components(
            coords[0].unwrap_or(Component::NAN),
            coords[1].unwrap_or(Component::NAN),
            coords[2].unwrap_or(Component::NAN),
        )
    }

    /// Return the first component of the color.
    pub fn c0(&self) -> Option<Component> {
        self.coord(0)
    }

    /// Return the second component of the color.
    pub fn c1(&self) -> Option<Component> {
        self.coord(1)
    }

    /// Return the third component of the color.
    pub fn c2(&self) -> Option<Component> {
        self.coord(2)
    }

    /// Return the component at the given index, or [`None`] if it is missing.
    pub fn coord(&self, index: usize) -> Option<Component> {
        if self.flags.contains(Flags::for_component(index)) {
            None
        } else {
            Some(self.components.get(index))
        }
    }

    /// Return all three coordinates.
    pub fn coords(&self) -> Coords {
        [self.coord(0), self.coord(1), self.coord(2)]
    }

    /// Return the alpha component of the color.
    pub fn alpha(&self) -> Option<Component> {
        if self.flags.contains(Flags::ALPHA_IS_NONE) {
            None
        } else {
            Some(self.alpha)
        }
    }

    /// Return a copy of this color with the component at `index` replaced.
    pub fn with_coord(&self, index: usize, value: Option<Component>) -> Self {
        let mut coords = self.coords();
        coords[index] = value;
        Self::from_coords(self.space.clone(), coords, self.alpha())
    }
}

/// A struct that holds details about a component passed to any of the `new`
/// functions. Any components that can be passed implements a
/// `From<?> for ComponentDetails`.
pub struct ComponentDetails {
    value: Component,
    is_none: bool,
}

impl ComponentDetails {
    /// Extract the value and set the given flag if the component is none.
    pub fn value_and_flag(&self, flags: &mut Flags, flag: Flags) -> Component {
        if self.is_none {
            *flags |= flag;
        }
        self.value
    }
}

impl From<Component> for ComponentDetails {
    fn from(value: Component) -> Self {
        Self {
            value,
            is_none: false,
        }
    }
}

impl From<Option<Component>> for ComponentDetails {
    fn from(value: Option<Component>) -> Self {
        if let Some(value) = value {
            Self::from(value)
        } else {
            Self {
                value: 0.0,
                is_none: true,
            }
        }
    }
}

/// Any of the input shapes accepted where a color is expected.
#[derive(Clone, Debug)]
pub enum ColorInput<'a> {
    /// An existing color value.
    Color(Cow<'a, Color>),
    /// Text that is parsed with the registered formats.
    Text(&'a str),
    /// A space id or alias with coordinates and an alpha.
    Parts {
        /// Id or alias of the color space.
        space: &'a str,
        /// The coordinates, [`None`] for missing.
        coords: Coords,
        /// The alpha, [`None`] for missing.
        alpha: Option<Component>,
    },
}

impl From<Color> for ColorInput<'_> {
    fn from(value: Color) -> Self {
        Self::Color(Cow::Owned(value))
    }
}

impl<'a> From<&'a Color> for ColorInput<'a> {
    fn from(value: &'a Color) -> Self {
        Self::Color(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a str> for ColorInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for ColorInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<(&'a str, [Component; 3])> for ColorInput<'a> {
    fn from((space, coords): (&'a str, [Component; 3])) -> Self {
        Self::Parts {
            space,
            coords: coords.map(Some),
            alpha: Some(1.0),
        }
    }
}

impl<'a> From<(&'a str, [Component; 3], Component)> for ColorInput<'a> {
    fn from((space, coords, alpha): (&'a str, [Component; 3], Component)) -> Self {
        Self::Parts {
            space,
            coords: coords.map(Some),
            alpha: Some(alpha),
        }
    }
}
