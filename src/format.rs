//! Format descriptors: how the values of a space are written as text and read
//! back.
//!
//! A format is either *functional* (`name(a b c / alpha)`), rendered by the
//! generic rules in [`crate::serialize`], or *custom* with its own parse and
//! serialize hooks (e.g. `#rrggbb`).

use std::borrow::Cow;

use crate::color::{Component, Coords, SpaceId};
use crate::gamut::GamutPolicy;
use crate::math::map_range;
use crate::serialize::SerializeOptions;
use crate::space::CoordMeta;

/// Parses text into coordinates and an alpha, or returns [`None`] if the text
/// is not in this format.
pub type ParseHook = fn(&str) -> Option<(Coords, Option<Component>)>;

/// Writes coordinates and an alpha as text.
pub type SerializeHook = fn(&Coords, Option<Component>, &SerializeOptions) -> String;

/// The textual type of a single coordinate argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordType {
    /// A plain number, optionally scaled so that `range` maps onto the
    /// reference range of the coordinate, e.g. `<number>[0,255]` for `rgb()`.
    Number {
        /// The range written in text.
        range: Option<[Component; 2]>,
    },
    /// A percentage of the reference range of the coordinate.
    Percentage,
    /// A hue angle, written in degrees.
    Angle,
}

impl CoordType {
    /// A plain, unscaled number.
    pub const NUMBER: CoordType = CoordType::Number { range: None };

    /// A number scaled from `[min, max]`.
    pub const fn number_in(min: Component, max: Component) -> Self {
        CoordType::Number {
            range: Some([min, max]),
        }
    }

    /// The range of the coordinate values, `[0, 1]` if it declares none.
    fn coord_range(meta: &CoordMeta) -> [Component; 2] {
        meta.reference().unwrap_or([0.0, 1.0])
    }

    /// The range 100% maps to: `[-100, 100]` for coordinates centered around
    /// zero, `[0, 100]` otherwise.
    fn percentage_range(meta: &CoordMeta) -> [Component; 2] {
        let symmetric = meta.range.is_none() && Self::coord_range(meta)[0] < 0.0;
        if symmetric {
            [-100.0, 100.0]
        } else {
            [0.0, 100.0]
        }
    }

    /// Convert a coordinate value into the number written in text, along with
    /// the unit to append.
    pub fn to_text(&self, meta: &CoordMeta, value: Component) -> (Component, &'static str) {
        match self {
            CoordType::Number { range: None } => (value, ""),
            CoordType::Number { range: Some(range) } => {
                (map_range(Self::coord_range(meta), *range, value), "")
            }
            CoordType::Percentage => (
                map_range(Self::coord_range(meta), Self::percentage_range(meta), value),
                "%",
            ),
            CoordType::Angle => (value, "deg"),
        }
    }

    /// Convert a number read from text into a coordinate value.
    pub fn from_text(&self, meta: &CoordMeta, value: Component) -> Component {
        match self {
            CoordType::Number { range: None } | CoordType::Angle => value,
            CoordType::Number { range: Some(range) } => {
                map_range(*range, Self::coord_range(meta), value)
            }
            CoordType::Percentage => {
                map_range(Self::percentage_range(meta), Self::coord_range(meta), value)
            }
        }
    }
}

/// The allowed textual types for each coordinate. The first type of each
/// coordinate is used when serializing.
pub type CoordGrammar = [Vec<CoordType>; 3];

/// Rendering rules for the `name(a b c / alpha)` syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct Functional {
    /// The function name, e.g. `lab`, or `color` for the generic wrapper.
    pub name: Cow<'static, str>,
    /// Allowed argument types per coordinate.
    pub coords: CoordGrammar,
    /// Separate arguments with commas (legacy syntax).
    pub commas: bool,
    /// Force alpha to always (`Some(true)`) or never (`Some(false)`) be
    /// written.
    pub alpha: Option<bool>,
    /// The id written as the first argument of `color()`, overriding the CSS
    /// id of the space.
    pub css_id: Option<Cow<'static, str>>,
}

impl Functional {
    /// The type used to serialize the coordinate at `index`.
    pub fn serialize_type(&self, index: usize) -> CoordType {
        self.coords[index]
            .first()
            .copied()
            .unwrap_or(CoordType::NUMBER)
    }

    /// Returns true if text of type `ty` is accepted for the coordinate at
    /// `index`.
    pub fn accepts(&self, index: usize, ty: &CoordType) -> bool {
        let allowed = &self.coords[index];
        if allowed.is_empty() {
            return matches!(ty, CoordType::Number { .. });
        }
        allowed.iter().any(|a| {
            matches!(
                (a, ty),
                (CoordType::Number { .. }, CoordType::Number { .. })
                    | (CoordType::Angle, CoordType::Number { .. })
                    | (CoordType::Angle, CoordType::Angle)
                    | (CoordType::Percentage, CoordType::Percentage)
            )
        })
    }

    /// Find the allowed type that text of type `ty` resolves through.
    pub fn resolve_type(&self, index: usize, ty: &CoordType) -> CoordType {
        match ty {
            CoordType::Number { .. } => self.coords[index]
                .iter()
                .find(|a| matches!(a, CoordType::Number { .. }))
                .copied()
                .unwrap_or(CoordType::NUMBER),
            other => *other,
        }
    }
}

/// Hooks of a format with its own syntax.
#[derive(Clone, Debug, Default)]
pub struct Custom {
    /// Parse text in this format. Serialize-only formats have none.
    pub parse: Option<ParseHook>,
    /// Serialize a color in this format. Parse-only formats have none.
    pub serialize: Option<SerializeHook>,
    /// Parse hooks with a higher priority are tried first. Hooks with equal
    /// priority are tried in registration order.
    pub priority: i32,
}

/// The two kinds of formats.
#[derive(Clone, Debug)]
pub enum FormatKind {
    /// The generic functional syntax.
    Functional(Functional),
    /// A syntax with its own hooks.
    Custom(Custom),
}

/// Describes how to parse and serialize the values of a space.
#[derive(Clone, Debug)]
pub struct Format {
    /// The id the format is requested by.
    pub id: Cow<'static, str>,
    /// The space the format writes values in. [`None`] means the space of the
    /// value being serialized.
    pub space: Option<SpaceId>,
    /// Gamut mapping applied even when the caller does not request it.
    pub to_gamut: GamutPolicy,
    /// The rendering rules.
    pub kind: FormatKind,
}

impl Format {
    /// A functional format with spaces between arguments.
    pub fn functional(
        id: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        coords: CoordGrammar,
    ) -> Self {
        Self {
            id: id.into(),
            space: None,
            to_gamut: GamutPolicy::Off,
            kind: FormatKind::Functional(Functional {
                name: name.into(),
                coords,
                commas: false,
                alpha: None,
                css_id: None,
            }),
        }
    }

    /// A custom format with the given hooks.
    pub fn custom(
        id: impl Into<Cow<'static, str>>,
        parse: Option<ParseHook>,
        serialize: Option<SerializeHook>,
    ) -> Self {
        Self {
            id: id.into(),
            space: None,
            to_gamut: GamutPolicy::Off,
            kind: FormatKind::Custom(Custom {
                parse,
                serialize,
                priority: 0,
            }),
        }
    }

    /// The generic `color(<space> a b c)` format.
    pub fn color() -> Self {
        let any = || vec![CoordType::NUMBER, CoordType::Percentage];
        Self::functional("color", "color", [any(), any(), any()])
    }

    /// The format used when nothing else matches: plain numbers in the
    /// generic `color()` syntax.
    pub fn fallback() -> Self {
        Self::functional(
            "color",
            "color",
            [
                vec![CoordType::NUMBER],
                vec![CoordType::NUMBER],
                vec![CoordType::NUMBER],
            ],
        )
    }

    /// Use commas between arguments.
    pub fn with_commas(mut self) -> Self {
        if let FormatKind::Functional(ref mut functional) = self.kind {
            functional.commas = true;
        }
        self
    }

    /// Always (`true`) or never (`false`) write the alpha.
    pub fn with_alpha(mut self, include: bool) -> Self {
        if let FormatKind::Functional(ref mut functional) = self.kind {
            functional.alpha = Some(include);
        }
        self
    }

    /// Write `id` as the first argument of `color()` instead of the CSS id
    /// of the space.
    pub fn with_css_id(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        if let FormatKind::Functional(ref mut functional) = self.kind {
            functional.css_id = Some(id.into());
        }
        self
    }

    /// Try the parse hook of this custom format before hooks of a lower
    /// priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        if let FormatKind::Custom(ref mut custom) = self.kind {
            custom.priority = priority;
        }
        self
    }

    /// Map into gamut whenever this format is used.
    pub fn with_to_gamut(mut self, policy: GamutPolicy) -> Self {
        self.to_gamut = policy;
        self
    }

    /// Pin the format to a space other than its owner.
    pub fn for_space(mut self, space: impl Into<SpaceId>) -> Self {
        self.space = Some(space.into());
        self
    }

    /// The functional rules, if this is a functional format.
    pub fn as_functional(&self) -> Option<&Functional> {
        match &self.kind {
            FormatKind::Functional(functional) => Some(functional),
            FormatKind::Custom(_) => None,
        }
    }

    /// The custom hooks, if this is a custom format.
    pub fn as_custom(&self) -> Option<&Custom> {
        match &self.kind {
            FormatKind::Functional(_) => None,
            FormatKind::Custom(custom) => Some(custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    const LIGHTNESS: CoordMeta = CoordMeta::unbounded("l", "Lightness", 0.0, 100.0);
    const A: CoordMeta = CoordMeta::unbounded("a", "A", -125.0, 125.0);
    const RED: CoordMeta = CoordMeta::ranged("r", "Red", 0.0, 1.0);

    #[test]
    fn percentages_map_onto_reference_range() {
        assert_eq!(CoordType::Percentage.to_text(&LIGHTNESS, 50.0), (50.0, "%"));
        let (value, unit) = CoordType::Percentage.to_text(&A, 62.5);
        assert_component_eq!(value, 50.0);
        assert_eq!(unit, "%");
        assert_component_eq!(CoordType::Percentage.from_text(&A, -100.0), -125.0);
        assert_component_eq!(CoordType::Percentage.from_text(&RED, 50.0), 0.5);
    }

    #[test]
    fn scaled_numbers_map_onto_reference_range() {
        let ty = CoordType::number_in(0.0, 255.0);
        assert_component_eq!(ty.to_text(&RED, 1.0).0, 255.0);
        assert_component_eq!(ty.from_text(&RED, 51.0), 0.2);
        assert_eq!(CoordType::NUMBER.to_text(&A, -20.0), (-20.0, ""));
    }

    #[test]
    fn functional_accepts_declared_types() {
        let format = Format::functional(
            "hsl",
            "hsl",
            [
                vec![CoordType::NUMBER, CoordType::Angle],
                vec![CoordType::Percentage, CoordType::NUMBER],
                vec![CoordType::Percentage],
            ],
        );
        let functional = format.as_functional().expect("functional");
        assert!(functional.accepts(0, &CoordType::Angle));
        assert!(functional.accepts(0, &CoordType::NUMBER));
        assert!(!functional.accepts(0, &CoordType::Percentage));
        assert!(!functional.accepts(2, &CoordType::NUMBER));
        assert_eq!(functional.serialize_type(1), CoordType::Percentage);
    }

    #[test]
    fn builders_only_touch_functional_formats() {
        let format = Format::custom("hex", None, None)
            .with_commas()
            .with_alpha(false)
            .with_priority(2);
        assert!(format.as_functional().is_none());
        assert_eq!(format.as_custom().map(|custom| custom.priority), Some(2));

        let format = Format::color()
            .with_commas()
            .with_alpha(true)
            .with_css_id("--custom")
            .with_priority(2);
        let functional = format.as_functional().expect("functional");
        assert!(functional.commas);
        assert_eq!(functional.alpha, Some(true));
        assert_eq!(functional.css_id.as_deref(), Some("--custom"));
    }
}
