//! Reading colors from text.
//!
//! Custom formats (`#rrggbb`, named colors) get the first look, highest
//! priority first and then in registration order. Everything else goes
//! through the functional grammar:
//!
//! ```text
//! name(a1 a2 a3)   name(a1 a2 a3 / alpha)
//! name(a1, a2, a3) name(a1, a2, a3, alpha)
//! color(<space> a1 a2 a3 [/ alpha])
//! ```
//!
//! Arguments are numbers, percentages, angles (`deg`, `rad`, `grad`, `turn`)
//! or `none`. Function names and keywords are case-insensitive.

use std::cmp::Reverse;
use std::str::FromStr;

use tracing::trace;

use crate::color::{Color, Component, Coords};
use crate::error::{ColorError, ColorResult};
use crate::format::{CoordType, Format, Functional};
use crate::registry::Registry;
use crate::space::SpaceDescriptor;

/// Angle units and the number of degrees in one unit. `grad` comes before
/// `rad` so the longer suffix wins.
const ANGLE_UNITS: [(&str, Component); 4] = [
    ("deg", 1.0),
    ("grad", 0.9),
    ("rad", 180.0 / std::f64::consts::PI as Component),
    ("turn", 360.0),
];

/// A single argument of a function.
#[derive(Clone, Debug, PartialEq)]
enum Arg {
    None,
    Number(Component),
    Percentage(Component),
    /// In degrees.
    Angle(Component),
    Ident(String),
}

impl Arg {
    fn parse(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();

        if token == "none" {
            return Some(Arg::None);
        }

        if let Some(number) = token.strip_suffix('%') {
            return parse_number(number).map(Arg::Percentage);
        }

        for (unit, degrees) in ANGLE_UNITS {
            if let Some(number) = token.strip_suffix(unit).and_then(parse_number) {
                return Some(Arg::Angle(number * degrees));
            }
        }

        if let Some(number) = parse_number(&token) {
            return Some(Arg::Number(number));
        }

        let is_ident = token
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '-')
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        is_ident.then_some(Arg::Ident(token))
    }
}

/// Only finite numbers; `inf` and `NaN` are not valid CSS.
fn parse_number(text: &str) -> Option<Component> {
    text.parse::<Component>().ok().filter(|n| n.is_finite())
}

/// A function split into its name and arguments.
#[derive(Debug, PartialEq)]
struct Function {
    name: String,
    args: Vec<Arg>,
    alpha: Option<Arg>,
}

impl Function {
    fn parse(text: &str) -> Option<Self> {
        let open = text.find('(')?;
        let name = text[..open].trim().to_ascii_lowercase();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }

        let body = text[open + 1..].trim_end().strip_suffix(')')?;
        if body.contains(['(', ')']) {
            return None;
        }

        let (main, alpha) = match body.split_once('/') {
            Some((main, alpha)) => (main, Some(alpha)),
            None => (body, None),
        };

        let mut tokens = if main.contains(',') {
            if alpha.is_some() {
                return None;
            }
            main.split(',')
                .map(str::trim)
                .map(|token| (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token))
                .collect::<Option<Vec<_>>>()?
        } else {
            main.split_whitespace().collect::<Vec<_>>()
        };

        let alpha = match alpha {
            Some(alpha) => {
                let mut parts = alpha.split_whitespace();
                let (Some(token), None) = (parts.next(), parts.next()) else {
                    return None;
                };
                Some(token)
            }
            None if main.contains(',') && tokens.len() == 4 => tokens.pop(),
            None => None,
        };

        Some(Self {
            name,
            args: tokens.into_iter().map(Arg::parse).collect::<Option<Vec<_>>>()?,
            alpha: alpha.map(Arg::parse).map_or(Some(None), |arg| arg.map(Some))?,
        })
    }
}

/// Map the arguments onto coordinates with the grammar of a format.
fn resolve_coords(space: &SpaceDescriptor, functional: &Functional, args: &[Arg]) -> Option<Coords> {
    if args.len() != 3 {
        return None;
    }

    let mut coords = [None; 3];
    for (index, (arg, meta)) in args.iter().zip(space.coords()).enumerate() {
        let (ty, value) = match arg {
            Arg::None => continue,
            Arg::Number(value) => (CoordType::NUMBER, *value),
            Arg::Percentage(value) => (CoordType::Percentage, *value),
            Arg::Angle(value) => (CoordType::Angle, *value),
            Arg::Ident(_) => return None,
        };
        if !functional.accepts(index, &ty) {
            return None;
        }
        coords[index] = Some(functional.resolve_type(index, &ty).from_text(meta, value));
    }
    Some(coords)
}

/// A missing alpha is opaque, a percentage is divided by 100.
fn resolve_alpha(alpha: &Option<Arg>) -> Option<Option<Component>> {
    match alpha {
        None => Some(Some(1.0)),
        Some(Arg::None) => Some(None),
        Some(Arg::Number(value)) => Some(Some(value.clamp(0.0, 1.0))),
        Some(Arg::Percentage(value)) => Some(Some((value / 100.0).clamp(0.0, 1.0))),
        Some(_) => None,
    }
}

impl Registry {
    /// Read a color from text in any of the registered formats.
    pub fn parse(&self, text: &str) -> ColorResult<Color> {
        let unrecognized = || ColorError::UnrecognizedFormat(text.to_string());
        let trimmed = text.trim();

        let mut hooks: Vec<_> = self
            .formats()
            .filter_map(|(space, format)| {
                let custom = format.as_custom()?;
                Some((custom.priority, space, format, custom.parse?))
            })
            .collect();
        hooks.sort_by_key(|&(priority, ..)| Reverse(priority));

        for (_, space, format, parse) in hooks {
            if let Some((coords, alpha)) = parse(trimmed) {
                let space = self.format_space(space, format);
                trace!(format = %format.id, space = %space.id(), "parsed custom format");
                return Ok(Color::from_coords(space.id().clone(), coords, alpha));
            }
        }

        let function = Function::parse(trimmed).ok_or_else(unrecognized)?;
        let alpha = resolve_alpha(&function.alpha).ok_or_else(unrecognized)?;

        if function.name == "color" {
            return self
                .parse_color_function(&function, alpha)
                .ok_or_else(unrecognized);
        }

        for (space, format) in self.formats() {
            let Some(functional) = format.as_functional() else {
                continue;
            };
            if functional.name != function.name.as_str() {
                continue;
            }

            let space = self.format_space(space, format);
            if let Some(coords) = resolve_coords(space, functional, &function.args) {
                trace!(format = %format.id, space = %space.id(), "parsed functional format");
                return Ok(Color::from_coords(space.id().clone(), coords, alpha));
            }
        }

        Err(unrecognized())
    }

    /// `color(<space> a b c)`: the space picks the grammar. Spaces that do
    /// not own a `color()` format are read with plain numbers. Formats that
    /// write their own id are found by that id.
    fn parse_color_function(&self, function: &Function, alpha: Option<Component>) -> Option<Color> {
        let (Arg::Ident(id), args) = function.args.split_first()? else {
            return None;
        };

        let fallback = Format::fallback();
        let (space, functional) = match self.get(id) {
            Some(space) => {
                let functional = space
                    .formats()
                    .iter()
                    .filter_map(Format::as_functional)
                    .find(|functional| functional.name == "color")
                    .or_else(|| fallback.as_functional())?;
                (space, functional)
            }
            None => self.formats().find_map(|(space, format)| {
                let functional = format.as_functional()?;
                (functional.name == "color" && functional.css_id.as_deref() == Some(id.as_str()))
                    .then(|| (self.format_space(space, format), functional))
            })?,
        };

        let coords = resolve_coords(space, functional, args)?;
        trace!(space = %space.id(), "parsed color()");
        Some(Color::from_coords(space.id().clone(), coords, alpha))
    }

    /// The space a format reads values into: the space the format is pinned
    /// to, or its owner.
    fn format_space<'r>(&'r self, owner: &'r SpaceDescriptor, format: &Format) -> &'r SpaceDescriptor {
        format
            .space
            .as_ref()
            .and_then(|id| self.get(id.as_str()))
            .unwrap_or(owner)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse with the process-wide registry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::global().parse(s)
    }
}
