//! The built-in catalog of CSS Color 4 spaces and their formats.
//!
//! Every edge is a thin wrapper around the typed [`crate::models`]. Arrows
//! point at the base of a space:
//!
//! ```text
//! hsl, hwb ─► srgb ─► srgb-linear ─► xyz-d65
//! display-p3, a98-rgb, rec2020 ───► xyz-d65
//! prophoto-rgb ─► xyz-d50 ────────► xyz-d65
//! lch ─► lab ─► xyz-d50
//! oklch ─► oklab ─► xyz-d65
//! hsl ◄─► hwb (direct edge)
//! ```

use crate::format::{CoordGrammar, CoordType};
use crate::space::SpaceDescriptor;

mod hex;
mod keywords;
mod lab;
mod rgb;

pub use keywords::KEYWORDS;

/// All built-in spaces in registration order. The order decides which space
/// answers a format id that several spaces share, e.g. `color`.
pub fn builtin() -> Vec<SpaceDescriptor> {
    vec![
        rgb::srgb(),
        rgb::srgb_linear(),
        rgb::hsl(),
        rgb::hwb(),
        rgb::display_p3(),
        rgb::a98_rgb(),
        rgb::prophoto_rgb(),
        rgb::rec2020(),
        lab::xyz_d65(),
        lab::xyz_d50(),
        lab::lab(),
        lab::lch(),
        lab::oklab(),
        lab::oklch(),
    ]
}

/// The grammar of a coordinate written as a percentage or a number.
fn percentage_or_number() -> Vec<CoordType> {
    vec![CoordType::Percentage, CoordType::NUMBER]
}

/// The grammar of a coordinate written as a number or a percentage.
fn number_or_percentage() -> Vec<CoordType> {
    vec![CoordType::NUMBER, CoordType::Percentage]
}

/// The grammar of a hue.
fn hue() -> Vec<CoordType> {
    vec![CoordType::NUMBER, CoordType::Angle]
}

/// `lab()`, `oklab()`: lightness first as a percentage.
fn lab_grammar() -> CoordGrammar {
    [
        percentage_or_number(),
        number_or_percentage(),
        number_or_percentage(),
    ]
}

/// `lch()`, `oklch()`: lightness, chroma and a hue.
fn lch_grammar() -> CoordGrammar {
    [percentage_or_number(), number_or_percentage(), hue()]
}

/// `hsl()`, `hwb()`: a hue followed by two percentages.
fn cylindrical_grammar() -> CoordGrammar {
    [hue(), percentage_or_number(), percentage_or_number()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamut::GamutMethod;

    #[test]
    fn bounded_spaces_default_to_css_mapping() {
        for space in builtin() {
            if space.is_bounded() {
                assert_eq!(
                    space.default_gamut_mapping(),
                    Some(&GamutMethod::Css),
                    "{}",
                    space.id()
                );
            } else {
                assert_eq!(space.default_gamut_mapping(), None, "{}", space.id());
            }
        }
    }

    #[test]
    fn every_space_has_a_default_format() {
        for space in builtin() {
            assert!(space.get_format("default").is_some(), "{}", space.id());
        }
    }
}
