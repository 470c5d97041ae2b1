//! Writing colors as text.
//!
//! ```rust
//! use colorway::{AlphaFormat, Registry, SerializeOptions};
//! let registry = Registry::builtin();
//! let options = SerializeOptions {
//!     format: Some("rgba"),
//!     ..SerializeOptions::default()
//! };
//! let text = registry.serialize(("srgb", [1.0, 0.0, 0.0], 0.5), &options).unwrap();
//! assert_eq!(text, "rgba(255, 0, 0, 0.5)");
//! ```

use std::borrow::Cow;

use tracing::debug;

use crate::color::{Color, ColorInput, Component};
use crate::error::{ColorError, ColorResult};
use crate::format::{CoordType, Format, FormatKind, Functional};
use crate::gamut::{in_gamut_of, GamutOptions, GamutPolicy};
use crate::math::to_precision;
use crate::registry::Registry;
use crate::space::SpaceDescriptor;

/// How many digits are written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Precision {
    /// The precision of the registry defaults.
    #[default]
    Default,
    /// Round to the given number of significant digits.
    Significant(u32),
    /// Write the values as they are.
    Full,
}

impl Precision {
    /// The number of significant digits, or [`None`] for full precision.
    fn digits(self, default: u32) -> Option<u32> {
        match self {
            Precision::Default => Some(default),
            Precision::Significant(digits) => Some(digits),
            Precision::Full => None,
        }
    }
}

/// How the alpha is written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AlphaKind {
    /// `0.5`
    #[default]
    Number,
    /// `50%`
    Percentage,
}

/// Whether and how the alpha is written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AlphaFormat {
    /// Always (`Some(true)`) or never (`Some(false)`) write the alpha. With
    /// [`None`] the format decides, or the alpha is written when it is below
    /// one or missing.
    pub include: Option<bool>,
    /// The notation of the alpha.
    pub kind: AlphaKind,
}

impl From<bool> for AlphaFormat {
    fn from(include: bool) -> Self {
        Self {
            include: Some(include),
            kind: AlphaKind::Number,
        }
    }
}

impl From<AlphaKind> for AlphaFormat {
    fn from(kind: AlphaKind) -> Self {
        Self {
            include: None,
            kind,
        }
    }
}

/// Options for [`Registry::serialize`].
#[derive(Clone, Debug)]
pub struct SerializeOptions<'a> {
    /// Digits written for each number.
    pub precision: Precision,
    /// Id of the format. Defaults to the format of the registry defaults.
    pub format: Option<&'a str>,
    /// Map the color into gamut before writing it.
    pub in_gamut: GamutPolicy,
    /// Override the type written for each coordinate.
    pub coords: Option<[Option<CoordType>; 3]>,
    /// Whether and how the alpha is written.
    pub alpha: AlphaFormat,
    /// Allow short forms, e.g. `#f00` for `#ff0000`.
    pub collapse: bool,
}

impl Default for SerializeOptions<'_> {
    fn default() -> Self {
        Self {
            precision: Precision::Default,
            format: None,
            in_gamut: GamutPolicy::On,
            coords: None,
            alpha: AlphaFormat::default(),
            collapse: true,
        }
    }
}

/// Write a number rounded to `digits` significant digits, never as `-0`.
fn format_number(value: Component, digits: Option<u32>) -> String {
    let value = match digits {
        Some(digits) => to_precision(value, digits),
        None => value,
    };
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

impl Registry {
    /// Write a color as text.
    pub fn serialize<'a>(
        &self,
        color: impl Into<ColorInput<'a>>,
        options: &SerializeOptions,
    ) -> ColorResult<String> {
        let mut color = self.normalize(color)?;
        let space = self.lookup(color.space.as_str())?;

        let format = self.resolve_format(space, options.format);

        if let Some(target) = format.space.as_ref() {
            if target != space.id() {
                color = self.convert(&color, target.as_str())?;
            }
        }
        let space = self.lookup(color.space.as_str())?;

        let policy = options.in_gamut.clone().or(format.to_gamut.clone());
        if policy.is_on() && !in_gamut_of(space, &color, self.defaults().epsilon) {
            let gamut_options = GamutOptions {
                method: policy.method().cloned(),
                ..GamutOptions::default()
            };
            color = self.to_gamut(&color, &gamut_options)?;
        }

        let digits = options.precision.digits(self.defaults().precision);

        match &format.kind {
            FormatKind::Custom(custom) => {
                let serialize = custom.serialize.ok_or_else(|| ColorError::UnsupportedOperation {
                    format: format.id.to_string(),
                    operation: "serialize",
                })?;
                let options = SerializeOptions {
                    precision: digits.map_or(Precision::Full, Precision::Significant),
                    ..options.clone()
                };
                Ok(serialize(&color.coords(), color.alpha(), &options))
            }
            FormatKind::Functional(functional) => Ok(serialize_functional(
                space, functional, &color, options, digits,
            )),
        }
    }

    /// Own space, then any space, then the default of the own space, then
    /// the generic fallback.
    fn resolve_format<'r>(
        &'r self,
        space: &'r SpaceDescriptor,
        requested: Option<&str>,
    ) -> Cow<'r, Format> {
        let requested = requested.unwrap_or(self.defaults().format.as_ref());

        if let Some(format) = space
            .get_format(requested)
            .or_else(|| self.find_format(requested))
        {
            return Cow::Borrowed(format);
        }

        match space.default_format_descriptor() {
            Some(format) => {
                debug!(space = %space.id(), requested, format = %format.id, "format not found, using the default of the space");
                Cow::Borrowed(format)
            }
            None => {
                debug!(space = %space.id(), requested, "format not found, using the generic fallback");
                Cow::Owned(Format::fallback())
            }
        }
    }
}

fn serialize_functional(
    space: &SpaceDescriptor,
    functional: &Functional,
    color: &Color,
    options: &SerializeOptions,
    digits: Option<u32>,
) -> String {
    let args = space
        .coords()
        .iter()
        .enumerate()
        .map(|(index, meta)| {
            let Some(value) = color.coord(index) else {
                return "none".to_string();
            };
            let ty = options
                .coords
                .and_then(|coords| coords[index])
                .unwrap_or_else(|| functional.serialize_type(index));
            let (number, unit) = ty.to_text(meta, value);
            format!("{}{unit}", format_number(number, digits))
        })
        .collect::<Vec<_>>();

    let separator = if functional.commas { ", " } else { " " };
    let mut text = format!("{}(", functional.name);
    if functional.name == "color" {
        text.push_str(
            functional
                .css_id
                .as_deref()
                .unwrap_or(space.css_id_or_id()),
        );
        text.push(' ');
    }
    text.push_str(&args.join(separator));

    let alpha = color.alpha();
    let include = options
        .alpha
        .include
        .or(functional.alpha)
        .unwrap_or_else(|| alpha.map_or(true, |alpha| alpha < 1.0));

    if include {
        let alpha = match (alpha, digits, options.alpha.kind) {
            (None, _, _) => "none".to_string(),
            (Some(alpha), None, _) => format_number(alpha, None),
            (Some(alpha), Some(_), AlphaKind::Number) => format_number(alpha, digits),
            (Some(alpha), Some(_), AlphaKind::Percentage) => {
                format!("{}%", format_number(alpha * 100.0, digits))
            }
        };
        text.push_str(if functional.commas { ", " } else { " / " });
        text.push_str(&alpha);
    }

    text.push(')');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SpaceId;
    use crate::gamut::GamutMethod;
    use crate::registry::RegistryBuilder;
    use crate::space::CoordMeta;

    fn serialize<'a>(color: impl Into<ColorInput<'a>>, options: &SerializeOptions) -> String {
        Registry::global()
            .serialize(color, options)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    fn with_format(format: &str) -> SerializeOptions<'_> {
        SerializeOptions {
            format: Some(format),
            ..SerializeOptions::default()
        }
    }

    #[test]
    fn default_format_of_srgb() {
        let red = ("srgb", [1.0, 0.0, 0.0]);
        assert_eq!(serialize(red, &SerializeOptions::default()), "color(srgb 1 0 0)");
    }

    #[test]
    fn alpha_policy() {
        let red = ("srgb", [1.0, 0.0, 0.0]);

        let forced = SerializeOptions {
            alpha: AlphaFormat::from(true),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(red, &forced), "color(srgb 1 0 0 / 1)");
        assert_eq!(
            serialize(&Color::new("srgb", 1.0, 0.0, 0.0, 1.5), &forced),
            "color(srgb 1 0 0 / 1)"
        );

        let translucent = ("srgb", [1.0, 0.0, 0.0], 0.5);
        assert_eq!(
            serialize(translucent, &SerializeOptions::default()),
            "color(srgb 1 0 0 / 0.5)"
        );

        let percentage = SerializeOptions {
            alpha: AlphaFormat::from(AlphaKind::Percentage),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(translucent, &percentage), "color(srgb 1 0 0 / 50%)");

        let hidden = SerializeOptions {
            alpha: AlphaFormat::from(false),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(translucent, &hidden), "color(srgb 1 0 0)");

        let missing = Color::new("srgb", 1.0, 0.0, 0.0, None);
        assert_eq!(
            serialize(&missing, &SerializeOptions::default()),
            "color(srgb 1 0 0 / none)"
        );
    }

    #[test]
    fn full_precision_writes_raw_alpha() {
        let options = SerializeOptions {
            precision: Precision::Full,
            alpha: AlphaFormat {
                include: Some(true),
                kind: AlphaKind::Percentage,
            },
            ..SerializeOptions::default()
        };
        assert_eq!(
            serialize(("srgb", [1.0, 0.0, 0.0], 0.25), &options),
            "color(srgb 1 0 0 / 0.25)"
        );
    }

    #[test]
    fn precision_rounds_significant_digits() {
        let color = ("srgb", [1.0 / 3.0, 0.5, 0.0]);
        assert_eq!(
            serialize(color, &SerializeOptions::default()),
            "color(srgb 0.33333 0.5 0)"
        );

        let options = SerializeOptions {
            precision: Precision::Significant(2),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(color, &options), "color(srgb 0.33 0.5 0)");
    }

    #[test]
    fn large_precision_writes_finite_numbers() {
        for digits in [39, 45, u32::MAX] {
            let options = SerializeOptions {
                precision: Precision::Significant(digits),
                ..SerializeOptions::default()
            };
            let srgb = serialize(("srgb", [0.2, 0.4, 1.0], 0.5), &options);
            let lab = serialize(("lab", [50.0, 20.0, -30.0]), &options);
            for text in [&srgb, &lab] {
                assert!(!text.contains("NaN") && !text.contains("inf"), "{text}");
            }
            assert!(srgb.ends_with(" / 0.5)"), "{srgb}");
        }
    }

    #[test]
    fn rgb_formats() {
        let red = ("srgb", [1.0, 0.0, 0.0]);
        assert_eq!(serialize(red, &with_format("rgb")), "rgb(100% 0% 0%)");
        assert_eq!(serialize(red, &with_format("rgb_number")), "rgb(255, 0, 0)");
        assert_eq!(
            serialize(("srgb", [1.0, 0.0, 0.0], 0.5), &with_format("rgba")),
            "rgba(255, 0, 0, 0.5)"
        );
        assert_eq!(serialize(red, &with_format("rgba")), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn functional_formats_of_other_spaces() {
        assert_eq!(
            serialize(("lab", [50.0, 20.0, -30.0]), &SerializeOptions::default()),
            "lab(50% 20 -30)"
        );
        assert_eq!(
            serialize(("oklch", [0.7, 0.15, 180.0]), &SerializeOptions::default()),
            "oklch(70% 0.15 180)"
        );
        assert_eq!(
            serialize(("hsl", [120.0, 50.0, 25.0]), &SerializeOptions::default()),
            "hsl(120 50% 25%)"
        );
        assert_eq!(
            serialize(&Color::new("lch", 50.0, 0.0, None, 1.0), &SerializeOptions::default()),
            "lch(50% 0 none)"
        );
        assert_eq!(
            serialize(("xyz", [0.25, 0.5, 0.75]), &SerializeOptions::default()),
            "color(xyz-d65 0.25 0.5 0.75)"
        );
    }

    #[test]
    fn coordinate_types_can_be_overridden() {
        let options = SerializeOptions {
            coords: Some([None, Some(CoordType::NUMBER), Some(CoordType::NUMBER)]),
            ..SerializeOptions::default()
        };
        assert_eq!(
            serialize(("hsl", [120.0, 50.0, 25.0]), &options),
            "hsl(120 50 25)"
        );
    }

    #[test]
    fn formats_of_other_spaces_convert_first() {
        assert_eq!(
            serialize(("hsl", [0.0, 100.0, 50.0]), &with_format("rgb")),
            "rgb(100% 0% 0%)"
        );
    }

    #[test]
    fn out_of_gamut_values() {
        let color = ("srgb", [1.2, 0.5, -0.1]);

        let off = SerializeOptions {
            in_gamut: GamutPolicy::Off,
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(color, &off), "color(srgb 1.2 0.5 -0.1)");

        let mapped = serialize(color, &SerializeOptions::default());
        assert_ne!(mapped, "color(srgb 1.2 0.5 -0.1)");
        let parsed = Registry::global().parse(&mapped).expect("parse");
        assert_eq!(
            Registry::global().in_gamut(&parsed, &GamutOptions::default()),
            Ok(true)
        );

        let clip = SerializeOptions {
            in_gamut: GamutMethod::Clip.into(),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(color, &clip), "color(srgb 1 0.5 0)");
    }

    #[test]
    fn hex_is_always_mapped() {
        let red = ("srgb", [1.0, 0.0, 0.0]);
        assert_eq!(serialize(red, &with_format("hex")), "#f00");

        let off = SerializeOptions {
            format: Some("hex"),
            in_gamut: GamutPolicy::Off,
            collapse: false,
            ..SerializeOptions::default()
        };
        assert_eq!(serialize(("srgb", [1.0, 0.0, 0.0], 0.5), &off), "#ff000080");

        let text = serialize(("srgb", [1.2, 0.5, -0.1]), &off);
        let parsed = Registry::global().parse(&text).expect("parse");
        assert_eq!(
            Registry::global().in_gamut(&parsed, &GamutOptions::default()),
            Ok(true)
        );
    }

    #[test]
    fn unknown_formats_fall_back() {
        let red = ("srgb", [1.0, 0.0, 0.0]);
        assert_eq!(serialize(red, &with_format("nope")), "color(srgb 1 0 0)");
    }

    #[test]
    fn parse_only_formats_cannot_serialize() {
        assert_eq!(
            Registry::global().serialize(("srgb", [1.0, 0.0, 0.0]), &with_format("keyword")),
            Err(ColorError::UnsupportedOperation {
                format: "keyword".into(),
                operation: "serialize"
            })
        );
    }

    #[test]
    fn spaces_without_formats_use_the_generic_fallback() {
        let mut builder = RegistryBuilder::new().hub("xyz");
        builder
            .register(SpaceDescriptor::new(
                "xyz",
                "XYZ",
                [
                    CoordMeta::unbounded("x", "X", 0.0, 1.0),
                    CoordMeta::unbounded("y", "Y", 0.0, 1.0),
                    CoordMeta::unbounded("z", "Z", 0.0, 1.0),
                ],
            ))
            .expect("register");
        let registry = builder.seal().expect("seal");

        assert_eq!(
            registry.serialize(("xyz", [0.1, 0.2, 0.3]), &SerializeOptions::default()),
            Ok("color(xyz 0.1 0.2 0.3)".to_string())
        );
    }

    #[test]
    fn color_function_writes_the_css_id() {
        let mut builder = RegistryBuilder::new().hub("xyz");
        builder
            .register(
                SpaceDescriptor::new(
                    "xyz",
                    "XYZ",
                    [
                        CoordMeta::unbounded("x", "X", 0.0, 1.0),
                        CoordMeta::unbounded("y", "Y", 0.0, 1.0),
                        CoordMeta::unbounded("z", "Z", 0.0, 1.0),
                    ],
                )
                .css_id("--xyz")
                .format(Format::color()),
            )
            .expect("register");
        builder
            .register_format("xyz", {
                let mut format = Format::color().with_css_id("--other");
                format.id = "other".into();
                format
            })
            .expect("register format");
        let registry = builder.seal().expect("seal");

        let color = ("xyz", [0.1, 0.2, 0.3]);
        assert_eq!(
            registry.serialize(color, &SerializeOptions::default()),
            Ok("color(--xyz 0.1 0.2 0.3)".to_string())
        );

        let options = SerializeOptions {
            format: Some("other"),
            ..SerializeOptions::default()
        };
        assert_eq!(
            registry.serialize(color, &options),
            Ok("color(--other 0.1 0.2 0.3)".to_string())
        );
        assert_eq!(
            registry.parse("color(--other 0.1 0.2 0.3)").map(|c| c.space),
            Ok(SpaceId::new("xyz"))
        );
    }

    #[test]
    fn numbers_are_never_negative_zero() {
        assert_eq!(format_number(-0.0, Some(5)), "0");
        assert_eq!(format_number(-0.0, None), "0");
        assert_eq!(format_number(-0.000001, Some(5)), "0");
    }
}
